// Shared test helpers for mock API setup and sample country data.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use countries_browser::{Config, CountriesApi, CountriesView, QueryOptions};

/// A minimal country record in the API's shape.
#[allow(dead_code)] // Used by other test files
pub fn country_json(common: &str, region: &str) -> Value {
    json!({
        "name": { "common": common, "official": format!("Republic of {}", common) },
        "region": region,
        "capital": [format!("{} City", common)],
        "population": 1_000_000
    })
}

/// A JSON array of countries, all in `region`.
#[allow(dead_code)] // Used by other test files
pub fn countries_body(names: &[&str], region: &str) -> Value {
    Value::Array(names.iter().map(|n| country_json(n, region)).collect())
}

/// Query options with the production cache timings and a short retry delay.
#[allow(dead_code)] // Used by other test files
pub fn fast_retry_options() -> QueryOptions {
    QueryOptions {
        retry_delay: Duration::from_millis(10),
        ..Default::default()
    }
}

/// Mounts a GET mock for `route` answering 200 with `body`, expected `times` times.
#[allow(dead_code)] // Used by other test files
pub async fn mount_ok(server: &MockServer, route: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts a GET mock for `route` answering `status`, expected `times` times.
#[allow(dead_code)] // Used by other test files
pub async fn mount_status(server: &MockServer, route: &str, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

/// Builds a view talking to `server`.
#[allow(dead_code)] // Used by other test files
pub fn view_for(server: &MockServer) -> CountriesView {
    let base = Url::parse(&server.uri()).expect("mock server URL should parse");
    let api = CountriesApi::new(Arc::new(reqwest::Client::new()), base)
        .expect("mock server URL should be a base URL");
    CountriesView::new(api, fast_retry_options())
}

/// Builds a config pointing at `server` with a short retry delay.
#[allow(dead_code)] // Used by other test files
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api_url: Some(server.uri()),
        retry_delay_ms: 10,
        ..Default::default()
    }
}
