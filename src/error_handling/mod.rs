//! Error handling.
//!
//! This module provides:
//! - The fetch error surfaced to the user (`FetchError::FetchFailed`)
//! - Diagnostic failure causes kept for logging
//! - Initialization error types

mod types;

// Re-export public API
pub use types::{FailureCause, FetchError, InitializationError};
