//! Crawler module for the single-page sieve
//!
//! This module contains the core pipeline, including:
//! - Fetching the seed page and extracting its links
//! - Probing every link concurrently
//! - Aggregating forbidden links
//! - Overall run coordination

mod coordinator;
mod dispatcher;
mod fetcher;
mod forbidden;
mod parser;
mod prober;

pub use coordinator::{run_crawl, Crawler};
pub use dispatcher::{probe_all, DispatchOptions, ProbeMode, DEADLINE_REASON};
pub use fetcher::{
    build_http_client, discover_links, fetch_page, user_agent_string, DiscoveredPage, MAX_REDIRECTS,
};
pub use forbidden::{aggregate_forbidden, forbidden_breakdown, ForbiddenPolicy};
pub use parser::{parse_html, ParsedPage};
pub use prober::{head_probe, ProbeError};
