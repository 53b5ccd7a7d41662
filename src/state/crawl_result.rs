use crate::state::ProbeOutcome;
use crate::url::DomainToken;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Complete outcome of one sieve run over a single seed page
///
/// Built once by the crawler after every stage has finished and handed to
/// the caller as a whole.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// The user-supplied entry point
    pub seed_url: String,

    /// Token derived from `seed_url` and used for classification
    pub domain_token: DomainToken,

    /// Page title reported by the fetcher
    pub page_title: Option<String>,

    /// Absolute link URL -> number of anchors pointing at it
    pub discovered_links: HashMap<String, u32>,

    /// Absolute link URL -> final probe outcome
    pub probe_results: HashMap<String, ProbeOutcome>,

    /// Links matching the domain token (sorted)
    pub internal_links: Vec<String>,

    /// Links not matching the domain token (sorted)
    pub external_links: Vec<String>,

    /// Links whose probe outcome is not acceptable (sorted)
    pub forbidden_links: Vec<String>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last stage finished
    pub finished_at: DateTime<Utc>,
}

impl CrawlResult {
    /// Returns the number of unique discovered links
    pub fn total_links(&self) -> usize {
        self.discovered_links.len()
    }

    /// Returns the number of anchors seen, counting duplicates
    pub fn total_occurrences(&self) -> u64 {
        self.discovered_links.values().map(|&c| c as u64).sum()
    }

    /// Returns the occurrence count for a link (0 if not discovered)
    pub fn occurrences(&self, url: &str) -> u32 {
        self.discovered_links.get(url).copied().unwrap_or(0)
    }

    /// Returns the probe outcome for a link
    pub fn outcome(&self, url: &str) -> Option<&ProbeOutcome> {
        self.probe_results.get(url)
    }

    /// Returns the number of links that got no response at all
    pub fn unreachable_count(&self) -> usize {
        self.probe_results
            .values()
            .filter(|o| o.is_unreachable())
            .count()
    }

    /// Returns how long the run took, in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
