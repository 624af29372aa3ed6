//! Astro Drift entry point
//!
//! Native: headless autopilot demo that records its score to a JSON file.
//! Web: canvas game driven by requestAnimationFrame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
        MouseEvent,
    };

    use astro_drift::consts::{MAX_SUBSTEPS, SIM_DT};
    use astro_drift::persistence::LocalStorageStore;
    use astro_drift::platform::canvas::CanvasSurface;
    use astro_drift::platform::{Key, KeyState};
    use astro_drift::renderer::draw_frame;
    use astro_drift::sim::TickOutcome;
    use astro_drift::{Arena, HighScores, Screen, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        keys: KeyState,
        canvas: HtmlCanvasElement,
        surface: CanvasSurface,
        accumulator: f32,
        last_time: f64,
        /// Screen the DOM currently shows
        shown: Screen,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.sample();
                if let TickOutcome::GameOver { score } = self.session.tick(&input) {
                    log::info!("Game over with score {}", score);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if matches!(
                self.session.screen(),
                Screen::Playing | Screen::NameEntry { .. }
            ) {
                draw_frame(self.session.game(), &mut self.surface);
            }
        }

        /// Size the canvas to the window and start a new session
        fn start(&mut self) {
            let window = web_sys::window().unwrap();
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.width() as f64);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.height() as f64);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.surface.resize(width, height);
            self.session.set_arena(Arena::sized_or_default(width as f32, height as f32));

            self.keys.reset();
            self.accumulator = 0.0;
            self.session.start_game();
        }

        /// Bring the DOM in line with the session screen
        fn sync_screen(&mut self, document: &Document) {
            let screen = self.session.screen();

            if let Some(el) = document.get_element_by_id("currentScore") {
                el.set_text_content(Some(&self.session.game().score.to_string()));
            }

            if screen == self.shown {
                return;
            }
            self.shown = screen;

            let in_game = matches!(screen, Screen::Playing | Screen::NameEntry { .. });
            set_hidden(document, "menu", screen != Screen::Menu);
            set_hidden(document, "game", !in_game);
            set_hidden(document, "scoreScreen", screen != Screen::HighScores);
            set_hidden(document, "nameEntry", !matches!(screen, Screen::NameEntry { .. }));

            if let Screen::NameEntry { score } = screen {
                if let Some(el) = document.get_element_by_id("finalScore") {
                    el.set_text_content(Some(&score.to_string()));
                }
                if let Some(input) = name_input(document) {
                    input.set_value("");
                    let _ = input.focus();
                }
            }
        }

        fn submit_name(&mut self, document: &Document) {
            let Some(input) = name_input(document) else {
                return;
            };
            match self.session.submit_name(&input.value()) {
                Ok(Some(rank)) => log::info!("New high score at rank {}", rank),
                Ok(None) => {}
                Err(e) => log::info!("Name rejected: {}", e),
            }
            self.sync_screen(document);
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("nameInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    /// Fill the high-score list, one row per entry
    fn show_high_scores(document: &Document, scores: &HighScores) {
        let Some(list) = document.get_element_by_id("highScores") else {
            return;
        };
        list.set_text_content(None);
        for (i, entry) in scores.entries().iter().enumerate() {
            if let Ok(row) = document.create_element("div") {
                row.set_class_name("score-entry");
                row.set_text_content(Some(&format!("{}. {} - {}", i + 1, entry.name, entry.score)));
                let _ = list.append_child(&row);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Astro Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let surface = CanvasSurface::new(ctx, canvas.width() as f64, canvas.height() as f64);
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(Arena::default(), seed, LocalStorageStore::new()),
            keys: KeyState::new(),
            canvas,
            surface,
            accumulator: 0.0,
            last_time: 0.0,
            shown: Screen::HighScores,
        }));
        game.borrow_mut().sync_screen(&document);

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&document, game.clone());
        setup_menu_buttons(&document, game.clone());
        setup_name_entry(&document, game.clone());

        request_animation_frame(game);

        log::info!("Astro Drift running!");
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Leave typing alone while the name field has focus
                if g.session.screen() != Screen::Playing {
                    return;
                }
                if let Some(key) = Key::from_code(&event.code()) {
                    if key == Key::Fire {
                        event.prevent_default();
                    }
                    g.keys.key_down(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().keys.key_up(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "playButton", move || {
                let mut g = game.borrow_mut();
                g.start();
                g.sync_screen(&doc);
            });
        }

        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "scoreButton", move || {
                let mut g = game.borrow_mut();
                let scores = g.session.show_scores();
                show_high_scores(&doc, &scores);
                g.sync_screen(&doc);
            });
        }

        let doc = document.clone();
        on_click(document, "backButton", move || {
            let mut g = game.borrow_mut();
            g.session.show_menu();
            g.sync_screen(&doc);
        });
    }

    fn setup_name_entry(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "submitButton", move || {
                game.borrow_mut().submit_name(&doc);
            });
        }

        if let Some(input) = name_input(document) {
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    game.borrow_mut().submit_name(&doc);
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.sync_screen(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use astro_drift::persistence::{FileStore, ScoreStore};
    use astro_drift::renderer::{CommandBuffer, draw_frame};
    use astro_drift::sim::TickOutcome;
    use astro_drift::sim::autopilot::steer;
    use astro_drift::{HighScores, Session, Settings};

    /// Name the demo records its scores under
    const DEMO_NAME: &str = "AUTOP";

    /// Load settings from the optional path argument, defaulting on failure
    pub fn settings_from_args() -> Settings {
        let Some(path) = std::env::args().nth(1) else {
            return Settings::default();
        };
        Settings::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load settings from {}: {}; using defaults", path, e);
            Settings::default()
        })
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Play one autopilot session and return the stored table afterwards
    pub fn run(settings: &Settings) -> HighScores {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Demo starting with seed: {}", seed);

        let mut session = Session::new(
            settings.arena(),
            seed,
            FileStore::new(&settings.score_file),
        );
        session.start_game();

        let mut frame = CommandBuffer::new();
        let mut outcome = TickOutcome::Continue;
        for _ in 0..settings.demo_ticks {
            let input = steer(session.game());
            outcome = session.tick(&input);
            draw_frame(session.game(), &mut frame);
            let drawn = frame.take().len();

            let game = session.game();
            if game.time_ticks % 600 == 0 {
                log::debug!(
                    "tick {}: score {}, {} asteroids, {} draw commands",
                    game.time_ticks,
                    game.score,
                    game.asteroids.len(),
                    drawn
                );
            }
            if matches!(outcome, TickOutcome::GameOver { .. }) {
                break;
            }
        }

        let game = session.game();
        match outcome {
            TickOutcome::GameOver { score } => {
                log::info!("Ship destroyed after {} ticks, score {}", game.time_ticks, score);
                if let Err(e) = session.submit_name(DEMO_NAME) {
                    log::error!("Could not record demo score: {}", e);
                }
            }
            _ => {
                let score = game.score;
                log::info!("Survived {} ticks, score {}", game.time_ticks, score);
                let mut store = FileStore::new(&settings.score_file);
                if let Err(e) = store.record(DEMO_NAME, score) {
                    log::error!("Could not record demo score: {}", e);
                }
            }
        }

        session.show_scores()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Astro Drift (native) starting...");

    let settings = headless::settings_from_args();
    let scores = headless::run(&settings);

    log::info!("High scores ({}):", settings.score_file.display());
    for (i, entry) in scores.entries().iter().enumerate() {
        log::info!("{}. {} {}", i + 1, entry.name, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
