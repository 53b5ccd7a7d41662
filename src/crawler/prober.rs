//! Single-link liveness probe
//!
//! A probe is one HEAD request against a discovered link. Only the status
//! line matters; the body is never read. The per-request timeout comes from
//! the client the probe is handed.

use reqwest::Client;
use thiserror::Error;

/// Transport-level failure of a single probe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Too many redirects")]
    Redirect,

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else if e.is_connect() {
            ProbeError::Connect(e.to_string())
        } else if e.is_redirect() {
            ProbeError::Redirect
        } else {
            ProbeError::Request(e.to_string())
        }
    }
}

/// Probes a URL with a single HEAD request
///
/// Any HTTP response, including 4xx and 5xx, is a successful probe and its
/// status code is returned. Only transport failures are errors.
///
/// The argument order and owned types let this function be passed directly
/// to [`probe_all`](crate::crawler::probe_all).
///
/// # Arguments
///
/// * `url` - The link to probe
/// * `client` - Shared HTTP client carrying the per-probe timeout
pub async fn head_probe(url: String, client: Client) -> Result<u16, ProbeError> {
    let response = client.head(&url).send().await?;
    Ok(response.status().as_u16())
}
