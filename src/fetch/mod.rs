//! Data-fetch layer for the countries API.
//!
//! One function does the work: [`fetch_json`] issues a single GET and turns any
//! unsuccessful outcome into [`FetchError::FetchFailed`]. It never retries;
//! retries are the query cache's business.

mod query;


use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ConfigValidationError;
use crate::error_handling::{FailureCause, FetchError};
use crate::models::Country;

pub use query::CountriesQuery;

/// Performs one HTTP GET against `url` and parses the JSON body.
///
/// # Errors
///
/// Returns `FetchError::FetchFailed` when the request cannot be sent, the
/// status is not 2xx, or the body does not parse as `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &Url,
) -> Result<T, FetchError> {
    debug!("GET {}", url);
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::failed(url.as_str(), FailureCause::Transport(e.to_string())))?;

    let status = response.status();
    if !status.is_success() {
        debug!("GET {} returned {}", url, status);
        return Err(FetchError::failed(
            url.as_str(),
            FailureCause::Status(status.as_u16()),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::failed(url.as_str(), FailureCause::Transport(e.to_string())))?;

    serde_json::from_str(&body)
        .map_err(|e| FetchError::failed(url.as_str(), FailureCause::Decode(e.to_string())))
}

/// Fetches a list of countries from `url`.
pub async fn fetch_countries(
    client: &reqwest::Client,
    url: &Url,
) -> Result<Vec<Country>, FetchError> {
    fetch_json(client, url).await
}

/// Shared HTTP client bound to an API base URL.
#[derive(Debug, Clone)]
pub struct CountriesApi {
    client: Arc<reqwest::Client>,
    base: Url,
}

impl CountriesApi {
    /// Binds `client` to `base`.
    ///
    /// # Errors
    ///
    /// Fails when `base` cannot carry path segments.
    pub fn new(client: Arc<reqwest::Client>, base: Url) -> Result<Self, ConfigValidationError> {
        if base.cannot_be_a_base() {
            return Err(ConfigValidationError {
                field: "api_url",
                message: format!("'{}' cannot be used as a base URL", base),
            });
        }
        Ok(Self { client, base })
    }

    /// Base URL requests are built from.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Runs the request behind `query`.
    pub async fn fetch(&self, query: &CountriesQuery) -> Result<Vec<Country>, FetchError> {
        let url = query.url(&self.base);
        fetch_countries(&self.client, &url).await
    }
}
