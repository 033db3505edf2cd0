//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single engine window, wires them to the
//! GPU layer and drives the app through the fixed-timestep gate.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx, WindowMode};
