//! Logging utilities.
//!
//! Logger initialization lives here so binaries only need a single call.
//! Everything else in the crate logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
