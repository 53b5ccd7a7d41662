use serde::Deserialize;
use url::Url;

/// How a domain token is matched against a discovered link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Token occurs anywhere in the link text (legacy behavior)
    ///
    /// `http://www.otherapp.com/example` matches the token `example` even
    /// though the token is only a path segment.
    #[default]
    Substring,

    /// Token equals one dot-separated label of the link's host
    HostLabel,
}

/// Checks if a link matches a domain token under the given policy
///
/// An empty token never matches.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::{token_matches, MatchPolicy};
///
/// assert!(token_matches("example", "https://www.example.com/about", MatchPolicy::Substring));
/// assert!(token_matches("example", "http://www.otherapp.com/example", MatchPolicy::Substring));
/// assert!(!token_matches("example", "http://www.otherapp.com/example", MatchPolicy::HostLabel));
/// ```
pub fn token_matches(token: &str, link: &str, policy: MatchPolicy) -> bool {
    if token.is_empty() {
        return false;
    }

    match policy {
        MatchPolicy::Substring => link.contains(token),
        MatchPolicy::HostLabel => host_has_label(link, token),
    }
}

/// Returns true if the host of `link` has a label equal to `token`
fn host_has_label(link: &str, token: &str) -> bool {
    let Ok(parsed) = Url::parse(link) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    host.split('.').any(|l| l.eq_ignore_ascii_case(token))
}
