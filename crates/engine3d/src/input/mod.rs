//! Input subsystem.
//!
//! Public API is platform-agnostic. The runtime translates winit events into
//! `InputEvent`s through `platform::winit` and feeds them into `InputState`,
//! which the engine polls once per processed tick.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
