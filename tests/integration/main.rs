//! Integration tests for Sumi-Sieve
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! probe and full sieve paths over real HTTP.

mod crawl_tests;
mod probe_tests;

use sumi_sieve::config::{Config, UserAgentConfig};
use sumi_sieve::crawler::ProbeMode;

/// Address nothing listens on, so connecting is refused immediately
pub const CLOSED_PORT_URL: &str = "http://127.0.0.1:1/down";

/// Creates a test configuration with short timeouts
pub fn create_test_config(mode: ProbeMode) -> Config {
    let mut config = Config::default();
    config.probe.timeout_ms = 1_000;
    config.probe.mode = mode;
    config.fetch.timeout_ms = 2_000;
    config.user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    config
}
