//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard state, edge-triggered fire)
//! - Drawing to an HTML canvas (wasm32 only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use input::{Key, KeyState};
