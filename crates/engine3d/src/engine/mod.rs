//! The demo engine: configuration, keyboard controls and per-tick state.

mod config;
mod controls;
mod state;

use anyhow::Result;

use crate::window::Runtime;

pub use config::EngineConfig;
pub use controls::{ControlActions, Controls};
pub use state::{EngineState, InputOutcome};

/// Runs the engine until the window is closed or Escape is pressed.
pub fn run(config: EngineConfig) -> Result<()> {
    let runtime_config = config.runtime_config();
    let gpu_init = config.gpu_init();
    Runtime::run(runtime_config, gpu_init, EngineState::new(config))
}
