//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use url::Url;

use crate::cache::QueryOptions;
use crate::config::constants::{
    API_URL_ENV, BUILD_TIME_API_URL, DEFAULT_CACHE_TIME, DEFAULT_RETRY_COUNT,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_STALE_TIME, DEFAULT_USER_AGENT, MAX_RETRY_COUNT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

/// Browser configuration.
///
/// Parsed from the command line (with environment fallbacks) by the binary, or
/// constructed programmatically by library users and tests.
///
/// # Examples
///
/// ```no_run
/// use countries_browser::Config;
///
/// let config = Config {
///     api_url: Some("https://countries.example.com/api".to_string()),
///     retry: 0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "countries_browser",
    version,
    about = "Browse countries from a countries API: list, search by name, filter by region"
)]
pub struct Config {
    /// Base URL of the countries API (overrides the build-time value)
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Seconds during which cached data is served without refetching
    #[arg(long, default_value_t = DEFAULT_STALE_TIME.as_secs())]
    pub stale_time_secs: u64,

    /// Seconds an unobserved cache entry is retained before eviction
    #[arg(long, default_value_t = DEFAULT_CACHE_TIME.as_secs())]
    pub cache_time_secs: u64,

    /// Retries after a failed request
    #[arg(long, default_value_t = DEFAULT_RETRY_COUNT)]
    pub retry: usize,

    /// Delay before the first retry in milliseconds (doubles per retry)
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            stale_time_secs: DEFAULT_STALE_TIME.as_secs(),
            cache_time_secs: DEFAULT_CACHE_TIME.as_secs(),
            retry: DEFAULT_RETRY_COUNT,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigValidationError`] found, naming the field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == Some(0) {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0 (omit it to disable the timeout)".to_string(),
            });
        }
        if self.retry > MAX_RETRY_COUNT {
            return Err(ConfigValidationError {
                field: "retry",
                message: format!("must be at most {}", MAX_RETRY_COUNT),
            });
        }
        if self.cache_time_secs < self.stale_time_secs {
            return Err(ConfigValidationError {
                field: "cache_time_secs",
                message: "must be greater than or equal to stale_time_secs".to_string(),
            });
        }
        self.api_base()?;
        Ok(())
    }

    /// Resolves the API base URL.
    ///
    /// The runtime value (`--api-url` / `COUNTRIES_API_URL`) wins over the value
    /// captured at build time. There is no default.
    ///
    /// # Errors
    ///
    /// Returns an error when no base URL is configured, when it does not parse,
    /// or when it cannot carry path segments (e.g. `mailto:`).
    pub fn api_base(&self) -> Result<Url, ConfigValidationError> {
        let not_blank = |s: &&str| !s.is_empty();
        let raw = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(not_blank)
            .or_else(|| BUILD_TIME_API_URL.map(str::trim).filter(not_blank))
            .ok_or_else(|| ConfigValidationError {
                field: "api_url",
                message: format!("no API base URL configured; pass --api-url or set {}", API_URL_ENV),
            })?;

        let url = Url::parse(raw).map_err(|e| ConfigValidationError {
            field: "api_url",
            message: format!("'{}' is not a valid URL: {}", raw, e),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigValidationError {
                field: "api_url",
                message: format!("'{}' cannot be used as a base URL", raw),
            });
        }
        Ok(url)
    }

    /// Query cache options derived from this configuration.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: Duration::from_secs(self.stale_time_secs),
            cache_time: Duration::from_secs(self.cache_time_secs),
            retry: self.retry,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            enabled: true,
        }
    }
}
