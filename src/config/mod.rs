//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (query cache timings, API paths, messages)
//! - CLI option types and parsing
//! - Validation of user-supplied settings

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel};
