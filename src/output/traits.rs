//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! summary figures shared by every report format.

use crate::state::CrawlResult;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary statistics for a sieve run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    /// Unique links discovered on the seed page
    pub total_links: usize,

    /// Sum of all occurrence counts
    pub total_occurrences: u64,

    pub internal_links: usize,
    pub external_links: usize,
    pub forbidden_links: usize,

    /// Links whose probe never got a response
    pub unreachable_links: usize,

    /// Links that answered `200 OK`
    pub ok_links: usize,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: i64,
}

impl ReportSummary {
    /// Computes the summary figures from a finished run
    pub fn from_result(result: &CrawlResult) -> Self {
        Self {
            total_links: result.total_links(),
            total_occurrences: result.total_occurrences(),
            internal_links: result.internal_links.len(),
            external_links: result.external_links.len(),
            forbidden_links: result.forbidden_links.len(),
            unreachable_links: result.unreachable_count(),
            ok_links: result.probe_results.values().filter(|o| o.is_ok()).count(),
            duration_ms: result.duration_ms(),
        }
    }

    /// Returns the share of links that answered `200 OK`, as a percentage
    pub fn reachable_rate(&self) -> f64 {
        if self.total_links == 0 {
            return 0.0;
        }
        (self.ok_links as f64 / self.total_links as f64) * 100.0
    }

    /// Returns the share of forbidden links, as a percentage
    pub fn forbidden_rate(&self) -> f64 {
        if self.total_links == 0 {
            return 0.0;
        }
        (self.forbidden_links as f64 / self.total_links as f64) * 100.0
    }
}

/// Trait for output handlers
///
/// An output handler receives the finished run exactly once.
pub trait OutputHandler {
    /// Renders the run result to this handler's destination
    ///
    /// # Arguments
    ///
    /// * `result` - The complete result of the run
    fn emit(&self, result: &CrawlResult) -> OutputResult<()>;
}
