//! HTTP fetcher implementation
//!
//! This module handles the single page fetch for a run, including:
//! - Building HTTP clients with proper user agent strings
//! - One GET request for the seed page
//! - Error classification into `FetchError`
//! - Handing the body to the parser

use crate::config::UserAgentConfig;
use crate::crawler::parser::parse_html;
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed by both the fetch and probe clients
pub const MAX_REDIRECTS: usize = 10;

/// Result of fetching the seed page
#[derive(Debug, Clone, Default)]
pub struct DiscoveredPage {
    /// Final URL after redirects, used to resolve relative links
    pub final_url: String,

    /// Page title (if any)
    pub title: Option<String>,

    /// Absolute link URL -> occurrence count
    pub links: HashMap<String, u32>,
}

/// Formats the user agent string sent with every request
///
/// Format: `CrawlerName/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Builds an HTTP client with proper configuration
///
/// The timeout applies to each request made with the client, so the probe
/// client built with the probe timeout bounds every single probe.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_sieve::config::UserAgentConfig;
/// use sumi_sieve::crawler::build_http_client;
///
/// let config = UserAgentConfig::default();
/// let client = build_http_client(&config, Duration::from_secs(2)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the seed page and extracts its title and links
///
/// This is a single best-effort pass: one GET, no retries, no JavaScript.
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx response | Parsed `DiscoveredPage` |
/// | Non-2xx response | `FetchError::Status` |
/// | Non-HTML content type | `FetchError::ContentMismatch` |
/// | Transport failure | `FetchError::Request` |
/// | Body read failure | `FetchError::Body` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The seed URL
pub async fn fetch_page(client: &Client, url: &str) -> Result<DiscoveredPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let final_url = response.url().clone();
    tracing::debug!("Fetched {} (final URL {})", url, final_url);

    let body = response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;

    Ok(discover_links(&body, &final_url))
}

/// Returns true if a `Content-Type` value can be parsed for links
///
/// A missing header is accepted and the body is treated as HTML.
fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

/// Parses a fetched body into a `DiscoveredPage`
pub fn discover_links(body: &str, final_url: &Url) -> DiscoveredPage {
    let parsed = parse_html(body, final_url);

    DiscoveredPage {
        final_url: final_url.to_string(),
        title: parsed.title,
        links: parsed.links,
    }
}
