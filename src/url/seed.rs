use crate::UrlError;
use url::Url;

/// Validates a user-supplied seed URL before a run starts
///
/// A seed is accepted when it parses, uses the `http` or `https` scheme, and
/// has a host containing at least one dot (`example.com`, `127.0.0.1`).
/// Anything past this check is treated as valid by the crawler.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::validate_seed_url;
///
/// assert!(validate_seed_url("https://www.example.com").is_ok());
/// assert!(validate_seed_url("ftp://example.com").is_err());
/// assert!(validate_seed_url("notaurl").is_err());
/// ```
pub fn validate_seed_url(seed: &str) -> Result<Url, UrlError> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(UrlError::Malformed("seed URL is empty".to_string()));
    }

    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("'{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;

    if !host.contains('.') || host.starts_with('.') || host.ends_with('.') {
        return Err(UrlError::Malformed(format!(
            "host '{}' must look like a domain (e.g., 'example.com')",
            host
        )));
    }

    Ok(url)
}
