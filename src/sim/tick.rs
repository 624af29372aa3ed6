//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one 60 Hz step.

use rand::Rng;

use super::collision::{
    CollisionReport, HitCause, remove_indices, scan_asteroids, score_for_size, ship_power_up_hits,
};
use super::state::{GamePhase, GameState, PowerUpKind, Turn};
use crate::consts::*;

/// Input sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// One shot this tick (edge-triggered by the input layer)
    pub fire: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Halted,
    /// The session continues
    Continue,
    /// The ship was destroyed this tick (reported once per session)
    GameOver { score: u64 },
}

/// Per-tick asteroid spawn probability for a score
pub fn spawn_chance(score: u64) -> f64 {
    (SPAWN_CHANCE_BASE + score as f64 / SPAWN_CHANCE_SCORE_SCALE * SPAWN_CHANCE_GROWTH)
        .min(SPAWN_CHANCE_MAX)
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Halted;
    }

    state.time_ticks += 1;
    let arena = state.arena;

    // Fire from the pose the player saw when pressing the key
    if input.fire {
        let id = state.next_entity_id();
        let projectile = state.ship.fire(id);
        state.projectiles.push(projectile);
    }

    // Ship
    if input.rotate_left {
        state.ship.rotate(Turn::Left);
    }
    if input.rotate_right {
        state.ship.rotate(Turn::Right);
    }
    state.ship.apply_thrust_and_drag(input.thrust, &arena);
    state.ship.tick_invincibility();

    // Power-ups
    for power_up in &mut state.power_ups {
        power_up.tick();
    }
    let pickups = ship_power_up_hits(&state.ship, &state.power_ups);
    for &i in &pickups {
        let kind = state.power_ups[i].kind;
        kind.apply(&mut state.ship);
        log::debug!("Picked up {:?}", kind);
    }
    remove_indices(&mut state.power_ups, &pickups);

    // Projectiles
    state.projectiles.retain_mut(|p| !p.tick());

    // Asteroids
    for asteroid in &mut state.asteroids {
        asteroid.tick(&arena);
    }
    let report = scan_asteroids(&state.ship, &state.projectiles, &state.asteroids);
    apply_collisions(state, &report);

    if report.ship_destroyed {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks with score {}",
            state.time_ticks,
            state.score
        );
        return TickOutcome::GameOver { score: state.score };
    }

    maybe_spawn_asteroid(state);

    TickOutcome::Continue
}

/// Apply a collision report: score, drops, removals, then fragments
fn apply_collisions(state: &mut GameState, report: &CollisionReport) {
    if report.hits.is_empty() {
        return;
    }

    let mut destroyed = Vec::with_capacity(report.hits.len());
    let mut spent = Vec::new();
    let mut fragments = Vec::with_capacity(report.hits.len());
    let mut drops = Vec::new();

    for hit in &report.hits {
        let asteroid = &state.asteroids[hit.asteroid];
        let (pos, size) = (asteroid.pos, asteroid.size);
        let points = score_for_size(size);
        state.score += points;

        if let HitCause::Shot { projectile } = hit.cause {
            spent.push(projectile);
            if state.rng.random_bool(POWER_UP_DROP_CHANCE) {
                drops.push(pos);
            }
        }

        log::debug!(
            "Asteroid {} (size {:.2}) destroyed by {:?}: +{}",
            asteroid.id,
            size,
            hit.cause,
            points
        );
        destroyed.push(hit.asteroid);
        fragments.push((pos, size));
    }

    remove_indices(&mut state.asteroids, &destroyed);
    remove_indices(&mut state.projectiles, &spent);

    for (pos, size) in fragments {
        state.spawn_fragments(pos, size);
    }
    for pos in drops {
        state.spawn_power_up(pos, PowerUpKind::Invincibility);
    }
}

/// Difficulty ramp: spawn more often as the score grows
fn maybe_spawn_asteroid(state: &mut GameState) {
    let chance = spawn_chance(state.score);
    if state.rng.random_bool(chance) && state.asteroids.len() < MAX_ASTEROIDS {
        state.spawn_asteroid_outside_bounds();
    }
}
