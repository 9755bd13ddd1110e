//! Logging utilities.
//!
//! Every subsystem reports through the `log` facade; this module only owns the
//! one-time `env_logger` installation used by binaries and tools.

mod init;

pub use init::{init_logging, LoggingConfig};
