//! State module for a single sieve run
//!
//! # Components
//!
//! - `ProbeOutcome`: What probing a single link resolved to
//! - `FailureKind`: Reporting bucket for forbidden links
//! - `CrawlResult`: The complete result handed back to the caller

mod crawl_result;
mod probe_outcome;

// Re-export main types
pub use crawl_result::CrawlResult;
pub use probe_outcome::{FailureKind, ProbeOutcome, UNREACHABLE_STATUS};
