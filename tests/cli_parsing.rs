//! Tests for CLI argument parsing.

use clap::Parser;
use countries_browser::config::{LogFormat, LogLevel};
use countries_browser::Config;

#[test]
fn test_defaults() {
    let config = Config::try_parse_from(["countries_browser", "--api-url", "http://localhost:5000"])
        .expect("defaults should parse");
    assert_eq!(config.api_url.as_deref(), Some("http://localhost:5000"));
    assert!(matches!(config.log_level, LogLevel::Warn));
    assert!(matches!(config.log_format, LogFormat::Plain));
    assert_eq!(config.timeout_seconds, None);
    assert_eq!(config.stale_time_secs, 3600);
    assert_eq!(config.cache_time_secs, 7200);
    assert_eq!(config.retry, 1);
    assert_eq!(config.retry_delay_ms, 1000);
}

#[test]
fn test_all_options() {
    let config = Config::try_parse_from([
        "countries_browser",
        "--api-url",
        "https://api.example.com/v1",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--timeout-seconds",
        "15",
        "--user-agent",
        "tester/1.0",
        "--stale-time-secs",
        "60",
        "--cache-time-secs",
        "120",
        "--retry",
        "3",
        "--retry-delay-ms",
        "250",
    ])
    .expect("all options should parse");

    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.timeout_seconds, Some(15));
    assert_eq!(config.user_agent, "tester/1.0");
    assert_eq!(config.retry, 3);
    assert!(config.validate().is_ok());

    let options = config.query_options();
    assert_eq!(options.stale_time.as_secs(), 60);
    assert_eq!(options.cache_time.as_secs(), 120);
    assert_eq!(options.retry_delay.as_millis(), 250);
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Config::try_parse_from(["countries_browser", "--log-level", "loud"]);
    assert!(result.is_err());
}

#[test]
fn test_non_numeric_retry_rejected() {
    let result = Config::try_parse_from(["countries_browser", "--retry", "once"]);
    assert!(result.is_err());
}
