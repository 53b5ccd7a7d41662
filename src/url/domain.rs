use std::fmt;

/// Naive domain token derived from a seed URL
///
/// The token is the second dot-separated component of the seed text, so
/// `https://www.example.com` yields `example`. An empty token means the seed
/// could not produce a usable token and every link is treated as external.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainToken(String);

impl DomainToken {
    /// Returns the token text (empty when degenerate)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the seed URL did not yield a usable token
    pub fn is_degenerate(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DomainToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the domain token from a seed URL
///
/// Splits the seed on the literal `.` character and takes the component at
/// index 1. This is a textual heuristic, not public-suffix-aware parsing.
///
/// The function is total: an empty seed, a seed without any `.`, or an empty
/// second component all produce a degenerate (empty) token.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::extract_domain_token;
///
/// assert_eq!(extract_domain_token("https://www.example.com").as_str(), "example");
/// assert_eq!(extract_domain_token("https://example.com").as_str(), "com");
/// assert!(extract_domain_token("notaurl").is_degenerate());
/// assert!(extract_domain_token("").is_degenerate());
/// ```
pub fn extract_domain_token(seed_url: &str) -> DomainToken {
    let token = seed_url.split('.').nth(1).unwrap_or_default();
    DomainToken(token.to_string())
}
