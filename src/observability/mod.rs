//! Structured logging setup for the command-line tools.

mod logging;

pub use logging::{init_logging, verbosity_to_directive, LOG_LEVEL_ENV};
