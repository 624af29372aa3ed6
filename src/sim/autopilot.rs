//! Demo pilot
//!
//! Produces inputs from the current state alone, so a demo run is as
//! deterministic as the simulation itself.

use super::state::GameState;
use super::tick::TickInput;
use crate::{distance, normalize_angle};

/// Fire once every this many ticks while lined up
const FIRE_INTERVAL: u64 = 12;
/// Heading error (radians) considered lined up
const AIM_TOLERANCE: f32 = 0.15;
/// Drift forward when nothing is closer than this
const CRUISE_DISTANCE: f32 = 150.0;

/// Aim at the nearest asteroid and shoot it
pub fn steer(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let nearest = state.asteroids.iter().min_by(|a, b| {
        distance(ship.pos, a.pos)
            .partial_cmp(&distance(ship.pos, b.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(target) = nearest else {
        return TickInput::default();
    };

    let to_target = target.pos - ship.pos;
    let desired = to_target.y.atan2(to_target.x);
    let error = normalize_angle(desired - ship.rotation);
    let aligned = error.abs() < AIM_TOLERANCE;

    TickInput {
        rotate_left: error < -AIM_TOLERANCE / 2.0,
        rotate_right: error > AIM_TOLERANCE / 2.0,
        thrust: aligned && to_target.length() > CRUISE_DISTANCE && ship.vel.length() < 1.0,
        fire: aligned && state.time_ticks % FIRE_INTERVAL == 0,
    }
}
