//! Game state and core simulation types
//!
//! Every entity is owned by [`GameState`]; entities never reference each
//! other, collisions are found by cross-iterating the collections.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::fragment_sizes;
use crate::consts::*;
use crate::{Arena, velocity_from_angle};

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Ticking at the fixed rate
    Running,
    /// Ship destroyed; nothing mutates until the next session starts
    GameOver,
}

/// Rotation input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    fn sign(self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

/// Number of hull colours cycled through while invincible
pub const SHIP_COLOR_CYCLE: usize = 6;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in radians within [0, TAU) (0 = +x, screen y grows downward)
    pub rotation: f32,
    pub vel: Vec2,
    pub radius: f32,
    pub invincible: bool,
    /// Ticks spent invincible so far
    pub invincible_ticks: u32,
    /// Cosmetic colour-cycle position in [0, SHIP_COLOR_CYCLE)
    pub color_index: f32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            vel: Vec2::ZERO,
            radius: SHIP_RADIUS,
            invincible: false,
            invincible_ticks: 0,
            color_index: 0.0,
        }
    }

    /// Unit vector along the current heading
    #[inline]
    pub fn heading(&self) -> Vec2 {
        velocity_from_angle(self.rotation, 1.0)
    }

    pub fn rotate(&mut self, turn: Turn) {
        self.rotation = (self.rotation + turn.sign() * SHIP_ROTATION_STEP).rem_euclid(TAU);
        if self.rotation >= TAU {
            self.rotation = 0.0;
        }
    }

    /// Thrust (if held), drag, integrate, wrap
    pub fn apply_thrust_and_drag(&mut self, thrusting: bool, arena: &Arena) {
        if thrusting {
            self.vel += self.heading() * SHIP_THRUST;
        }
        self.vel *= SHIP_DRAG;
        self.pos = arena.wrap(self.pos + self.vel);
    }

    /// Spawn a projectile at the nose travelling along the heading
    pub fn fire(&self, id: u32) -> Projectile {
        let nose = self.pos + self.heading() * SHIP_NOSE_OFFSET;
        Projectile::new(id, nose, self.rotation)
    }

    pub fn grant_invincibility(&mut self) {
        self.invincible = true;
        self.invincible_ticks = 0;
    }

    /// Count down invincibility and advance the hull colour cycle
    pub fn tick_invincibility(&mut self) {
        if !self.invincible {
            return;
        }
        self.color_index = (self.color_index + SHIP_COLOR_STEP) % SHIP_COLOR_CYCLE as f32;
        self.invincible_ticks += 1;
        if self.invincible_ticks >= INVINCIBILITY_TICKS {
            self.invincible = false;
            self.invincible_ticks = 0;
        }
    }

    /// Palette slot for the current colour-cycle position
    pub fn color_slot(&self) -> usize {
        (self.color_index.floor() as usize) % SHIP_COLOR_CYCLE
    }
}

/// A drifting asteroid with a fixed irregular outline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Continuous size; radius is always `size * ASTEROID_SIZE_SCALE`
    pub size: f32,
    vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with random heading, speed, spin and outline
    pub fn new<R: Rng>(id: u32, pos: Vec2, size: f32, rng: &mut R) -> Self {
        let heading = rng.random::<f32>() * TAU;
        let speed = rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        let rotation_speed = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let vertices = Self::random_outline(size * ASTEROID_SIZE_SCALE, rng);

        Self {
            id,
            pos,
            vel: velocity_from_angle(heading, speed),
            rotation: 0.0,
            rotation_speed,
            size,
            vertices,
        }
    }

    /// Create an asteroid just outside a random screen edge
    pub fn spawn_outside_bounds<R: Rng>(id: u32, arena: &Arena, rng: &mut R) -> Self {
        let margin = ASTEROID_SPAWN_MARGIN;
        let pos = if rng.random_bool(0.5) {
            let x = if rng.random_bool(0.5) { -margin } else { arena.width + margin };
            Vec2::new(x, rng.random::<f32>() * arena.height)
        } else {
            let y = if rng.random_bool(0.5) { -margin } else { arena.height + margin };
            Vec2::new(rng.random::<f32>() * arena.width, y)
        };
        let size = rng.random_range(ASTEROID_SPAWN_MIN_SIZE..ASTEROID_SPAWN_MAX_SIZE);
        Self::new(id, pos, size, rng)
    }

    /// Evenly spaced vertex angles with radii in [0.5, 1.0) of the base radius
    fn random_outline<R: Rng>(radius: f32, rng: &mut R) -> Vec<Vec2> {
        let count = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                let r = radius * (0.5 + rng.random::<f32>() * 0.5);
                velocity_from_angle(angle, r)
            })
            .collect()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * ASTEROID_SIZE_SCALE
    }

    /// Outline relative to the asteroid centre, before rotation
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn tick(&mut self, arena: &Arena) {
        self.pos = arena.wrap(self.pos + self.vel);
        self.rotation += self.rotation_speed;
    }
}

/// A shot fired by the ship; collides as a point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before the projectile expires
    pub lifetime: u32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, angle: f32) -> Self {
        Self {
            id,
            pos,
            vel: velocity_from_angle(angle, PROJECTILE_SPEED),
            lifetime: PROJECTILE_LIFETIME,
        }
    }

    /// Advance one tick; returns true once the lifetime is exhausted
    pub fn tick(&mut self) -> bool {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime == 0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
}

impl PowerUpKind {
    pub fn apply(self, ship: &mut Ship) {
        match self {
            PowerUpKind::Invincibility => ship.grant_invincibility(),
        }
    }
}

/// A stationary pickup dropped by a destroyed asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Visual radius offset in [0, POWER_UP_PULSE_MAX]
    pub pulse: f32,
    pulse_step: f32,
}

impl PowerUp {
    pub fn new(id: u32, pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWER_UP_RADIUS,
            pulse: 0.0,
            pulse_step: POWER_UP_PULSE_STEP,
        }
    }

    /// Triangle-wave pulse between 0 and POWER_UP_PULSE_MAX
    pub fn tick(&mut self) {
        self.pulse = (self.pulse + self.pulse_step).clamp(0.0, POWER_UP_PULSE_MAX);
        if self.pulse >= POWER_UP_PULSE_MAX || self.pulse <= 0.0 {
            self.pulse_step = -self.pulse_step;
        }
    }

    /// Radius used for drawing
    pub fn visual_radius(&self) -> f32 {
        self.radius + self.pulse
    }
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
    pub ship: Ship,
    /// Live asteroids in insertion order
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles in insertion order
    pub projectiles: Vec<Projectile>,
    /// Live power-ups in insertion order
    pub power_ups: Vec<PowerUp>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game; call [`GameState::start_session`] to play
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self {
            seed,
            arena,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            ship: Ship::new(arena.center()),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset everything and begin a new session (Idle/GameOver -> Running)
    pub fn start_session(&mut self) {
        self.score = 0;
        self.time_ticks = 0;
        self.ship = Ship::new(self.arena.center());
        self.asteroids.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        for _ in 0..INITIAL_ASTEROIDS {
            self.spawn_asteroid_outside_bounds();
        }
        self.phase = GamePhase::Running;
        log::info!(
            "Session started ({}x{} arena, {} asteroids)",
            self.arena.width,
            self.arena.height,
            self.asteroids.len()
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn spawn_asteroid_outside_bounds(&mut self) {
        let id = self.next_entity_id();
        let asteroid = Asteroid::spawn_outside_bounds(id, &self.arena, &mut self.rng);
        self.asteroids.push(asteroid);
    }

    /// Append the children of a destroyed asteroid; returns how many spawned
    pub fn spawn_fragments(&mut self, pos: Vec2, size: f32) -> usize {
        let sizes = fragment_sizes(size);
        for &child_size in &sizes {
            let id = self.next_entity_id();
            let child = Asteroid::new(id, pos, child_size, &mut self.rng);
            self.asteroids.push(child);
        }
        sizes.len()
    }

    pub fn spawn_power_up(&mut self, pos: Vec2, kind: PowerUpKind) {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, pos, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_asteroid_shape() {
        let mut rng = rng();
        for id in 0..50 {
            let asteroid = Asteroid::new(id, Vec2::new(100.0, 100.0), 3.0, &mut rng);
            let radius = asteroid.radius();
            assert_eq!(radius, 30.0);
            let n = asteroid.vertices().len();
            assert!((ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES).contains(&n));
            for v in asteroid.vertices() {
                let r = v.length();
                assert!(r >= radius * 0.5 - 1e-3 && r < radius + 1e-3, "vertex radius {r}");
            }
            let speed = asteroid.vel.length();
            assert!((ASTEROID_MIN_SPEED - 1e-4..ASTEROID_MAX_SPEED + 1e-4).contains(&speed));
            assert!(asteroid.rotation_speed.abs() <= ASTEROID_MAX_SPIN);
        }
    }

    #[test]
    fn test_spawn_outside_bounds() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = rng();
        for id in 0..100 {
            let asteroid = Asteroid::spawn_outside_bounds(id, &arena, &mut rng);
            assert!(!arena.contains(asteroid.pos), "{:?} is on screen", asteroid.pos);
            assert!((ASTEROID_SPAWN_MIN_SIZE..ASTEROID_SPAWN_MAX_SIZE).contains(&asteroid.size));
            let on_vertical_edge = asteroid.pos.x == -ASTEROID_SPAWN_MARGIN
                || asteroid.pos.x == arena.width + ASTEROID_SPAWN_MARGIN;
            let on_horizontal_edge = asteroid.pos.y == -ASTEROID_SPAWN_MARGIN
                || asteroid.pos.y == arena.height + ASTEROID_SPAWN_MARGIN;
            assert!(on_vertical_edge || on_horizontal_edge);
        }
    }

    #[test]
    fn test_asteroid_tick_wraps_and_spins() {
        let arena = Arena::new(800.0, 600.0);
        let mut asteroid = Asteroid::new(1, Vec2::new(799.0, 10.0), 2.0, &mut rng());
        asteroid.vel = Vec2::new(3.0, -12.0);
        asteroid.rotation_speed = 0.02;
        asteroid.tick(&arena);
        assert!((asteroid.pos.x - 2.0).abs() < 1e-3);
        assert!((asteroid.pos.y - 598.0).abs() < 1e-3);
        assert!((asteroid.rotation - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_ship_thrust_and_drag() {
        let arena = Arena::default();
        let mut ship = Ship::new(arena.center());
        ship.apply_thrust_and_drag(true, &arena);
        assert!((ship.vel.x - SHIP_THRUST * SHIP_DRAG).abs() < 1e-6);
        assert!(ship.pos.x > arena.center().x);

        let before = ship.vel.length();
        ship.apply_thrust_and_drag(false, &arena);
        assert!((ship.vel.length() - before * SHIP_DRAG).abs() < 1e-6);
    }

    #[test]
    fn test_ship_rotation_step() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.rotate(Turn::Right);
        ship.rotate(Turn::Right);
        ship.rotate(Turn::Left);
        assert!((ship.rotation - SHIP_ROTATION_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_stays_wrapped() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.rotate(Turn::Left);
        assert!((ship.rotation - (TAU - SHIP_ROTATION_STEP)).abs() < 1e-5);

        for _ in 0..10_000 {
            ship.rotate(Turn::Right);
            assert!((0.0..TAU).contains(&ship.rotation), "{}", ship.rotation);
        }
        for _ in 0..25_000 {
            ship.rotate(Turn::Left);
            assert!((0.0..TAU).contains(&ship.rotation), "{}", ship.rotation);
        }
    }

    #[test]
    fn test_fire_from_nose() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.rotation = std::f32::consts::FRAC_PI_2;
        let shot = ship.fire(9);
        assert!((shot.pos - Vec2::new(100.0, 120.0)).length() < 1e-4);
        assert!((shot.vel - Vec2::new(0.0, PROJECTILE_SPEED)).length() < 1e-4);
        assert_eq!(shot.lifetime, PROJECTILE_LIFETIME);
    }

    #[test]
    fn test_invincibility_expires() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.grant_invincibility();
        for _ in 0..INVINCIBILITY_TICKS - 1 {
            ship.tick_invincibility();
        }
        assert!(ship.invincible);
        ship.tick_invincibility();
        assert!(!ship.invincible);
        assert_eq!(ship.invincible_ticks, 0);
    }

    #[test]
    fn test_invincibility_cycles_colors() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.grant_invincibility();
        let mut seen = [false; SHIP_COLOR_CYCLE];
        for _ in 0..60 {
            ship.tick_invincibility();
            seen[ship.color_slot()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_projectile_expires() {
        let mut shot = Projectile::new(1, Vec2::ZERO, 0.0);
        for _ in 0..PROJECTILE_LIFETIME - 1 {
            assert!(!shot.tick());
        }
        assert!(shot.tick());
        assert!((shot.pos.x - PROJECTILE_SPEED * PROJECTILE_LIFETIME as f32).abs() < 1e-2);
    }

    #[test]
    fn test_power_up_pulse_is_bounded() {
        let mut power_up = PowerUp::new(1, Vec2::ZERO, PowerUpKind::Invincibility);
        let mut peaked = false;
        for _ in 0..200 {
            power_up.tick();
            assert!((0.0..=POWER_UP_PULSE_MAX).contains(&power_up.pulse));
            peaked |= power_up.pulse >= POWER_UP_PULSE_MAX;
        }
        assert!(peaked);
    }

    #[test]
    fn test_start_session() {
        let mut state = GameState::new(Arena::default(), 42);
        assert_eq!(state.phase, GamePhase::Idle);
        state.start_session();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS);
        assert_eq!(state.ship.pos, state.arena.center());
        assert!(state.projectiles.is_empty() && state.power_ups.is_empty());
    }

    #[test]
    fn test_spawn_fragments_at_parent() {
        let mut state = GameState::new(Arena::default(), 1);
        let spawned = state.spawn_fragments(Vec2::new(100.0, 100.0), 3.5);
        assert_eq!(spawned, 3);
        assert!(state.asteroids.iter().all(|a| a.size == 1.75));
        assert!(state.asteroids.iter().all(|a| a.pos == Vec2::new(100.0, 100.0)));
    }
}
