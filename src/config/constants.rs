//! Configuration constants.
//!
//! This module defines the constants used throughout the application, including
//! query cache timings, retry parameters, API paths and user-facing strings.

use std::time::Duration;

/// Environment variable holding the base URL of the countries API.
///
/// Read at build time (`option_env!`) as a fallback and at runtime (environment,
/// `.env` file) with precedence over the build-time value.
pub const API_URL_ENV: &str = "COUNTRIES_API_URL";

/// Build-time value of [`API_URL_ENV`], if one was set when the crate was compiled.
pub const BUILD_TIME_API_URL: Option<&str> = option_env!("COUNTRIES_API_URL");

// API paths (appended to the base URL)
/// Path of the full country list
pub const ALL_COUNTRIES_PATH: &str = "countries";
/// Path prefix of the search-by-name endpoint; the term follows as a segment
pub const SEARCH_COUNTRY_PATH: &str = "countries";
/// Path prefix of the region filter; the region name follows as a segment
pub const FILTER_BY_REGION_PATH: &str = "regions";

/// Message surfaced to the user whenever any countries request fails.
///
/// Identical for all three endpoints and for every failure cause.
pub const FETCH_FAILED_MESSAGE: &str = "Please enter a valid country name.";

// Query cache defaults
/// Data younger than this is served from the cache without a request (1 hour)
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60 * 60);
/// Unobserved cache entries are evicted after this long (2 hours)
pub const DEFAULT_CACHE_TIME: Duration = Duration::from_secs(120 * 60);
/// Number of retries after a failed fetch (total attempts = retries + 1)
pub const DEFAULT_RETRY_COUNT: usize = 1;
/// Delay before the first retry; doubles with each further retry
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// Upper bound for the delay between retries
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);
/// Highest retry count accepted by config validation
pub const MAX_RETRY_COUNT: usize = 10;

/// Default User-Agent string for API requests.
pub const DEFAULT_USER_AGENT: &str = concat!("countries_browser/", env!("CARGO_PKG_VERSION"));

// Terminal UI strings
/// Shown while no result set has produced countries
pub const LOADING_TEXT: &str = "Loading...";
/// Shown in place of an empty search field
pub const SEARCH_PLACEHOLDER: &str = "Enter a country name";
/// Label of the "no region" choice
pub const ALL_REGIONS_LABEL: &str = "All Regions";
