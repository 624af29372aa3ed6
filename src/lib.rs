//! Astro Drift - a vector-style asteroid shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, fragmentation, tick driver)
//! - `renderer`: Draw-command surface and shape generation
//! - `platform`: Keyboard input and browser canvas adapters
//! - `persistence`: High-score stores (memory, JSON file, LocalStorage)
//! - `session`: Menu / playing / name entry / high-score screens
//! - `settings`: Serde-backed configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScores};
pub use session::{Screen, Session};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
///
/// Distances are in pixels and velocities in pixels per tick.
pub mod consts {
    /// Simulation rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena size (native runs; the browser uses the window size)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 0.3;
    /// Velocity multiplier applied every tick
    pub const SHIP_DRAG: f32 = 0.99;
    /// Rotation per tick of held input (5 degrees)
    pub const SHIP_ROTATION_STEP: f32 = 5.0 * std::f32::consts::PI / 180.0;
    /// Distance from ship centre to nose, where projectiles spawn
    pub const SHIP_NOSE_OFFSET: f32 = SHIP_RADIUS * 4.0 / 3.0;
    /// Invincibility duration (10 s at 60 Hz)
    pub const INVINCIBILITY_TICKS: u32 = 600;
    /// Colour-cycle advance per tick while invincible
    pub const SHIP_COLOR_STEP: f32 = 0.2;

    /// Asteroid radius = size * ASTEROID_SIZE_SCALE
    pub const ASTEROID_SIZE_SCALE: f32 = 10.0;
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    pub const ASTEROID_SPAWN_MIN_SIZE: f32 = 2.0;
    pub const ASTEROID_SPAWN_MAX_SIZE: f32 = 4.0;
    /// Spin is drawn from [-MAX_SPIN, MAX_SPIN)
    pub const ASTEROID_MAX_SPIN: f32 = 0.03;
    pub const ASTEROID_MIN_VERTICES: usize = 7;
    pub const ASTEROID_MAX_VERTICES: usize = 10;
    /// How far outside the screen edge new asteroids appear
    pub const ASTEROID_SPAWN_MARGIN: f32 = 20.0;
    pub const INITIAL_ASTEROIDS: usize = 5;
    /// Periodic spawning stops at this many live asteroids
    pub const MAX_ASTEROIDS: usize = 20;

    /// Spawn probability per tick: BASE + score / SCALE * GROWTH, capped at MAX
    pub const SPAWN_CHANCE_BASE: f64 = 0.01;
    pub const SPAWN_CHANCE_GROWTH: f64 = 0.02;
    pub const SPAWN_CHANCE_SCORE_SCALE: f64 = 10_000.0;
    pub const SPAWN_CHANCE_MAX: f64 = 0.03;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 7.0;
    pub const PROJECTILE_LIFETIME: u32 = 50;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Power-up defaults
    pub const POWER_UP_RADIUS: f32 = 15.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.03;
    pub const POWER_UP_PULSE_MAX: f32 = 5.0;
    pub const POWER_UP_PULSE_STEP: f32 = 0.2;

    /// Points per unit of asteroid size
    pub const SCORE_PER_SIZE: f32 = 100.0;
}

/// Toroidal play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(consts::DEFAULT_WIDTH, consts::DEFAULT_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Arena of the given size, or the default when either side is
    /// non-positive or non-finite (wrapping needs a positive extent)
    pub fn sized_or_default(width: f32, height: f32) -> Self {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Self::new(width, height)
        } else {
            log::warn!("Ignoring invalid arena size {}x{}", width, height);
            Self::default()
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Wrap a position into [0, width) x [0, height)
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_coord(pos.x, self.width), wrap_coord(pos.y, self.height))
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }
}

/// `rem_euclid` can round up to exactly `extent` for tiny negative inputs
#[inline]
fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Velocity vector for a heading (radians) and speed
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
