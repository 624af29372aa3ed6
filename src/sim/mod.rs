//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed 60 Hz timestep, distances in pixels per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    AsteroidHit, CollisionReport, HitCause, circles_overlap, fragment_sizes, scan_asteroids,
    score_for_size,
};
pub use state::{
    Asteroid, GamePhase, GameState, PowerUp, PowerUpKind, Projectile, SHIP_COLOR_CYCLE, Ship, Turn,
};
pub use tick::{TickInput, TickOutcome, spawn_chance, tick};
