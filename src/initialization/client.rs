//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for all countries API requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - A request timeout only when `timeout_seconds` is set
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut builder = ClientBuilder::new().user_agent(config.user_agent.clone());
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;
    Ok(Arc::new(client))
}
