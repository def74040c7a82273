//! Shared utilities for the account service.

pub mod logging;

pub use logging::{init_logging, LogFormat};
