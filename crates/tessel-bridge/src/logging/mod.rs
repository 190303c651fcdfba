//! Logging setup.
//!
//! Library code only talks to the `log` facade. Binaries and tests call
//! [`init_logging`] once to install `env_logger` behind it.

mod init;

pub use init::{init_logging, LoggingConfig};
