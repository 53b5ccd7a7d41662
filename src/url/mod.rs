//! URL handling module for Sumi-Sieve
//!
//! This module provides domain token extraction, token matching, seed
//! validation, and internal/external link classification.

mod domain;
mod matcher;
mod seed;

use std::collections::HashMap;

// Re-export main functions
pub use domain::{extract_domain_token, DomainToken};
pub use matcher::{token_matches, MatchPolicy};
pub use seed::validate_seed_url;

/// Link classification relative to the seed's domain token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Link belongs to the seed's domain
    Internal,
    /// Link points somewhere else
    External,
}

/// Discovered links split by classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// Links whose text matches the domain token (sorted)
    pub internal: Vec<String>,
    /// All remaining links (sorted)
    pub external: Vec<String>,
}

impl ClassifiedLinks {
    /// Returns the total number of classified links
    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    /// Returns true if no links were classified
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Classifies a single link against a domain token
///
/// A degenerate token classifies every link as external.
pub fn classify_link(token: &DomainToken, link: &str, policy: MatchPolicy) -> LinkClass {
    if token_matches(token.as_str(), link, policy) {
        LinkClass::Internal
    } else {
        LinkClass::External
    }
}

/// Partitions discovered links into internal and external sets
///
/// Every key of `links` lands in exactly one of the two output vectors. The
/// vectors are sorted so repeated runs over the same input render
/// identically; callers should still treat them as sets.
///
/// # Arguments
///
/// * `token` - The domain token extracted from the seed URL
/// * `links` - Discovered links mapped to their occurrence counts
/// * `policy` - How the token is matched against each link
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use sumi_sieve::url::{classify_links, extract_domain_token, MatchPolicy};
///
/// let token = extract_domain_token("https://www.example.com");
/// let links = HashMap::from([
///     ("https://www.example.com/about".to_string(), 1),
///     ("https://www.otherapp.com".to_string(), 1),
/// ]);
///
/// let classified = classify_links(&token, &links, MatchPolicy::Substring);
/// assert_eq!(classified.internal, vec!["https://www.example.com/about"]);
/// assert_eq!(classified.external, vec!["https://www.otherapp.com"]);
/// ```
pub fn classify_links(
    token: &DomainToken,
    links: &HashMap<String, u32>,
    policy: MatchPolicy,
) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();

    for link in links.keys() {
        match classify_link(token, link, policy) {
            LinkClass::Internal => classified.internal.push(link.clone()),
            LinkClass::External => classified.external.push(link.clone()),
        }
    }

    classified.internal.sort();
    classified.external.sort();
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn links(urls: &[&str]) -> HashMap<String, u32> {
        urls.iter().map(|u| (u.to_string(), 1)).collect()
    }

    fn as_set(urls: &[String]) -> HashSet<&str> {
        urls.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_internal_and_external() {
        let token = extract_domain_token("https://www.example.com");
        let discovered = links(&[
            "https://www.example.com/about",
            "https://www.otherapp.com",
        ]);

        let classified = classify_links(&token, &discovered, MatchPolicy::Substring);

        assert_eq!(token.as_str(), "example");
        assert_eq!(classified.internal, vec!["https://www.example.com/about"]);
        assert_eq!(classified.external, vec!["https://www.otherapp.com"]);
    }

    #[test]
    fn test_substring_misclassifies_path_segment() {
        let token = extract_domain_token("https://www.example.com");
        let discovered = links(&[
            "https://www.example.com/about",
            "https://www.otherapp.com",
            "https://www.otherapp.com/example",
        ]);

        let classified = classify_links(&token, &discovered, MatchPolicy::Substring);

        assert_eq!(
            as_set(&classified.internal),
            HashSet::from([
                "https://www.example.com/about",
                "https://www.otherapp.com/example"
            ])
        );
        assert_eq!(
            as_set(&classified.external),
            HashSet::from(["https://www.otherapp.com"])
        );
    }

    #[test]
    fn test_host_label_fixes_path_segment() {
        let token = extract_domain_token("https://www.example.com");
        let discovered = links(&[
            "https://www.example.com/about",
            "https://www.otherapp.com/example",
        ]);

        let classified = classify_links(&token, &discovered, MatchPolicy::HostLabel);

        assert_eq!(classified.internal, vec!["https://www.example.com/about"]);
        assert_eq!(
            classified.external,
            vec!["https://www.otherapp.com/example"]
        );
    }

    #[test]
    fn test_degenerate_token_all_external() {
        let token = extract_domain_token("notaurl");
        let discovered = links(&["https://www.example.com/about", "https://notaurl.com/"]);

        for policy in [MatchPolicy::Substring, MatchPolicy::HostLabel] {
            let classified = classify_links(&token, &discovered, policy);
            assert!(classified.internal.is_empty());
            assert_eq!(classified.external.len(), 2);
        }
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let token = extract_domain_token("https://docs.rust-lang.org");
        let discovered = links(&[
            "https://docs.rust-lang.org/std",
            "https://crates.io/",
            "https://github.com/rust-lang/rust",
            "https://www.rust-lang.org/learn",
            "https://example.com/",
        ]);

        let classified = classify_links(&token, &discovered, MatchPolicy::Substring);

        assert_eq!(classified.len(), discovered.len());
        let internal = as_set(&classified.internal);
        let external = as_set(&classified.external);
        assert!(internal.is_disjoint(&external));
        for key in discovered.keys() {
            assert!(internal.contains(key.as_str()) || external.contains(key.as_str()));
        }
    }

    #[test]
    fn test_output_is_sorted() {
        let token = extract_domain_token("https://www.example.com");
        let discovered = links(&[
            "https://www.example.com/z",
            "https://www.example.com/a",
            "https://www.example.com/m",
        ]);

        let classified = classify_links(&token, &discovered, MatchPolicy::Substring);

        assert_eq!(
            classified.internal,
            vec![
                "https://www.example.com/a",
                "https://www.example.com/m",
                "https://www.example.com/z"
            ]
        );
    }

    #[test]
    fn test_empty_links() {
        let token = extract_domain_token("https://www.example.com");
        let classified = classify_links(&token, &HashMap::new(), MatchPolicy::Substring);
        assert!(classified.is_empty());
    }

    #[test]
    fn test_classify_single_link() {
        let token = extract_domain_token("https://www.example.com");
        assert_eq!(
            classify_link(&token, "https://shop.example.com/", MatchPolicy::Substring),
            LinkClass::Internal
        );
        assert_eq!(
            classify_link(&token, "https://other.org/", MatchPolicy::Substring),
            LinkClass::External
        );
    }
}
