//! Screen flow around the simulation
//!
//! Menu -> Playing -> NameEntry -> Menu, plus a high-score screen reachable
//! from the menu. The score is written only after a valid name is entered.

use crate::Arena;
use crate::highscores::{HighScores, NAME_LEN};
use crate::persistence::ScoreStore;
use crate::sim::{GameState, TickInput, TickOutcome, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    /// Game over; waiting for the player's name before saving `score`
    NameEntry { score: u64 },
    HighScores,
}

/// Name entry rejections; the screen stays on name entry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name must be exactly {NAME_LEN} characters, got {len}")]
    WrongLength { len: usize },

    #[error("no finished game is waiting for a name")]
    NotAwaitingName,
}

/// Uppercase a submitted name and check its length
pub fn normalize_name(raw: &str) -> Result<String, NameError> {
    let name = raw.to_uppercase();
    let len = name.chars().count();
    if len != NAME_LEN {
        return Err(NameError::WrongLength { len });
    }
    Ok(name)
}

/// One player's session: the current screen, the game, and the score store
pub struct Session<S: ScoreStore> {
    screen: Screen,
    game: GameState,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(arena: Arena, seed: u64, store: S) -> Self {
        Self {
            screen: Screen::Menu,
            game: GameState::new(arena, seed),
            store,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Arena size used from the next session on
    pub fn set_arena(&mut self, arena: Arena) {
        self.game.arena = arena;
    }

    /// Start a fresh game from any screen
    pub fn start_game(&mut self) {
        if let Screen::NameEntry { score } = self.screen {
            log::info!("Discarding unsaved score {score}");
        }
        self.game.start_session();
        self.screen = Screen::Playing;
    }

    /// Switch to the high-score screen and return the stored table
    pub fn show_scores(&mut self) -> HighScores {
        self.screen = Screen::HighScores;
        self.store.load()
    }

    pub fn show_menu(&mut self) {
        if let Screen::NameEntry { score } = self.screen {
            log::info!("Discarding unsaved score {score}");
        }
        self.screen = Screen::Menu;
    }

    /// Advance the game one tick while playing
    pub fn tick(&mut self, input: &TickInput) -> TickOutcome {
        if self.screen != Screen::Playing {
            return TickOutcome::Halted;
        }
        let outcome = tick(&mut self.game, input);
        if let TickOutcome::GameOver { score } = outcome {
            self.screen = Screen::NameEntry { score };
        }
        outcome
    }

    /// Save the finished game's score under `raw` and return to the menu
    ///
    /// Invalid names leave the screen on name entry. A failed write is
    /// logged and the session still returns to the menu.
    pub fn submit_name(&mut self, raw: &str) -> Result<Option<usize>, NameError> {
        let Screen::NameEntry { score } = self.screen else {
            return Err(NameError::NotAwaitingName);
        };
        let name = normalize_name(raw)?;

        let rank = match self.store.record(&name, score) {
            Ok(rank) => rank,
            Err(e) => {
                log::error!("Failed to save score {score} for {name}: {e}");
                None
            }
        };
        self.screen = Screen::Menu;
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreEntry;
    use crate::persistence::MemoryStore;
    use crate::sim::{Asteroid, GamePhase};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> Session<MemoryStore> {
        Session::new(Arena::default(), 77, MemoryStore::new())
    }

    /// Play until the ship dies with `score` on the board
    fn lose_with_score(session: &mut Session<MemoryStore>, score: u64) {
        session.start_game();
        let game = session.game_mut();
        game.asteroids.clear();
        game.score = score;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut asteroid = Asteroid::new(999, game.ship.pos, 2.0, &mut rng);
        asteroid.vel = glam::Vec2::ZERO;
        game.asteroids.push(asteroid);
        assert_eq!(
            session.tick(&TickInput::default()),
            TickOutcome::GameOver { score }
        );
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("abcde"), Ok("ABCDE".to_string()));
        assert_eq!(normalize_name("abc"), Err(NameError::WrongLength { len: 3 }));
        assert_eq!(normalize_name("abcdef"), Err(NameError::WrongLength { len: 6 }));
        assert_eq!(normalize_name(""), Err(NameError::WrongLength { len: 0 }));
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut session = session();
        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(session.tick(&TickInput::default()), TickOutcome::Halted);
        assert_eq!(session.game().phase, GamePhase::Idle);
    }

    #[test]
    fn test_game_over_requires_name() {
        let mut session = session();
        lose_with_score(&mut session, 500);
        assert_eq!(session.screen(), Screen::NameEntry { score: 500 });

        assert_eq!(
            session.submit_name("abc"),
            Err(NameError::WrongLength { len: 3 })
        );
        assert_eq!(session.screen(), Screen::NameEntry { score: 500 });
        assert!(session.store().load().is_empty());

        assert_eq!(session.submit_name("aaaaa"), Ok(Some(1)));
        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(
            session.store().load().entries(),
            &[HighScoreEntry::new("AAAAA", 500)]
        );
    }

    #[test]
    fn test_two_games_ranked() {
        let mut session = session();
        lose_with_score(&mut session, 500);
        session.submit_name("AAAAA").unwrap();
        lose_with_score(&mut session, 300);
        session.submit_name("BBBBB").unwrap();

        let scores = session.show_scores();
        assert_eq!(session.screen(), Screen::HighScores);
        assert_eq!(
            scores.entries(),
            &[HighScoreEntry::new("AAAAA", 500), HighScoreEntry::new("BBBBB", 300)]
        );

        session.show_menu();
        assert_eq!(session.screen(), Screen::Menu);
    }

    #[test]
    fn test_submit_without_game_over() {
        let mut session = session();
        assert_eq!(session.submit_name("AAAAA"), Err(NameError::NotAwaitingName));
        session.start_game();
        assert_eq!(session.submit_name("AAAAA"), Err(NameError::NotAwaitingName));
    }

    #[test]
    fn test_game_over_halts_until_restart() {
        let mut session = session();
        lose_with_score(&mut session, 0);
        let ticks = session.game().time_ticks;
        assert_eq!(session.tick(&TickInput::default()), TickOutcome::Halted);
        assert_eq!(session.game().time_ticks, ticks);

        session.start_game();
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.game().phase, GamePhase::Running);
    }
}
