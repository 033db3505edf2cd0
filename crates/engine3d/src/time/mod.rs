//! Time subsystem.
//!
//! Fixed-timestep gating decoupled from the runtime so it can be driven with
//! synthetic timestamps in tests. Intended usage:
//! - one `FrameGate` per loop
//! - `next_deadline()` to decide how long the loop may sleep
//! - `try_tick()` before running a frame; `None` means not yet

mod frame_gate;

pub use frame_gate::{FrameGate, FrameTime};
