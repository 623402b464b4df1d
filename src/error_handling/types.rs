//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use std::fmt;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::FETCH_FAILED_MESSAGE;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// What went wrong underneath a [`FetchError::FetchFailed`].
///
/// Kept for logs only; the user always sees the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The request never produced a response (connect, DNS, timeout, ...).
    Transport(String),
    /// The body was not the expected JSON.
    Decode(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Status(code) => write!(f, "HTTP status {}", code),
            FailureCause::Transport(msg) => write!(f, "transport error: {}", msg),
            FailureCause::Decode(msg) => write!(f, "invalid response body: {}", msg),
        }
    }
}

/// Error raised by the data-fetch layer.
///
/// There is a single kind: every failure to obtain a successful, parseable
/// response becomes `FetchFailed`, whose `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request failed; `url` and `cause` are diagnostic context.
    #[error("{message}", message = FETCH_FAILED_MESSAGE)]
    FetchFailed {
        /// The URL that was requested
        url: String,
        /// Underlying reason
        cause: FailureCause,
    },
}

impl FetchError {
    /// Builds a `FetchFailed` for the given URL and cause.
    pub fn failed(url: impl Into<String>, cause: FailureCause) -> Self {
        FetchError::FetchFailed {
            url: url.into(),
            cause,
        }
    }

    /// The message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::FetchFailed { .. } => FETCH_FAILED_MESSAGE,
        }
    }

    /// Diagnostic cause of the failure.
    pub fn cause(&self) -> &FailureCause {
        match self {
            FetchError::FetchFailed { cause, .. } => cause,
        }
    }

    /// URL that was being fetched.
    pub fn url(&self) -> &str {
        match self {
            FetchError::FetchFailed { url, .. } => url,
        }
    }
}
