//! engine3d: a minimal real-time 3D scaffold.
//!
//! One window, one GPU context, one colored triangle under a perspective or
//! orthographic projection, with mouse free-look and a fixed-timestep loop.

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod engine;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

pub use engine::{run, EngineConfig, EngineState};
