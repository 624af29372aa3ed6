//! Keyboard state
//!
//! Key events arrive asynchronously; the game samples a snapshot at the
//! start of every tick. Fire is edge-triggered: each press queues exactly
//! one shot no matter how long the key is held.

use crate::sim::TickInput;

/// Named game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Thrust),
            "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Held keys plus queued shots
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    thrust: bool,
    fire: bool,
    pending_shots: u32,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: Key) -> &mut bool {
        match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Thrust => &mut self.thrust,
            Key::Fire => &mut self.fire,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        let held = self.slot(key);
        let was_held = *held;
        *held = true;
        // Auto-repeat sends key_down again while held; only the first counts
        if key == Key::Fire && !was_held {
            self.pending_shots += 1;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        *self.slot(key) = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Thrust => self.thrust,
            Key::Fire => self.fire,
        }
    }

    /// Snapshot for one tick; consumes at most one queued shot
    pub fn sample(&mut self) -> TickInput {
        let fire = self.pending_shots > 0;
        if fire {
            self.pending_shots -= 1;
        }
        TickInput {
            rotate_left: self.left,
            rotate_right: self.right,
            thrust: self.thrust,
            fire,
        }
    }

    /// Drop held keys and queued shots (focus loss, new session)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
