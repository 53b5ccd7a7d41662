//! Sumi-Sieve: a single-page link sieve
//!
//! This crate fetches one seed page, classifies its outbound links as internal
//! or external relative to the seed's domain token, probes every link
//! concurrently, and reports which links are forbidden or unreachable.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use crawler::ProbeError;
use thiserror::Error;

/// Generic message shown to users when a run fails
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// Main error type for Sumi-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Probe transport error for {url}: {source}")]
    ProbeTransport { url: String, source: ProbeError },

    #[error("Probe batch deadline exceeded with {pending} probe(s) still pending")]
    BatchDeadline { pending: usize },

    #[error("Probe task failed: {0}")]
    ProbeTaskFailed(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SieveError {
    /// Returns the user-safe message for this error
    ///
    /// Whole-run failures never leak internal detail past the boundary; the
    /// full error is only logged.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

/// Errors raised by the page-fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page (content type '{content_type}')")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler};
pub use state::{CrawlResult, FailureKind, ProbeOutcome};
pub use url::{classify_links, extract_domain_token, validate_seed_url, DomainToken, LinkClass};
