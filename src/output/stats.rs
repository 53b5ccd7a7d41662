//! Terminal summary of a sieve run
//!
//! This module prints a short plain-text overview of a finished run,
//! including totals and the forbidden links grouped by failure kind.

use crate::crawler::{forbidden_breakdown, ForbiddenPolicy};
use crate::output::traits::{OutputHandler, OutputResult, ReportSummary};
use crate::state::CrawlResult;
use std::fmt::Write as _;
use std::io::Write;

/// Terminal summary output handler
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSummary {
    policy: ForbiddenPolicy,
}

impl TerminalSummary {
    /// Creates a summary handler that groups forbidden links under `policy`
    pub fn new(policy: ForbiddenPolicy) -> Self {
        Self { policy }
    }
}

impl OutputHandler for TerminalSummary {
    fn emit(&self, result: &CrawlResult) -> OutputResult<()> {
        let text = format_summary(result, self.policy);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Formats the plain-text summary of a run
pub fn format_summary(result: &CrawlResult, policy: ForbiddenPolicy) -> String {
    let summary = ReportSummary::from_result(result);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Sieve Summary ===\n");
    let _ = writeln!(out, "Seed: {}", result.seed_url);
    if let Some(title) = &result.page_title {
        let _ = writeln!(out, "Title: {}", title);
    }
    let _ = writeln!(out, "Domain token: {}", display_token(result));
    let _ = writeln!(out);

    let _ = writeln!(out, "Links:");
    let _ = writeln!(
        out,
        "  Unique: {} ({} occurrences)",
        summary.total_links, summary.total_occurrences
    );
    let _ = writeln!(out, "  Internal: {}", summary.internal_links);
    let _ = writeln!(out, "  External: {}", summary.external_links);
    let _ = writeln!(
        out,
        "  Forbidden: {} ({:.1}%)",
        summary.forbidden_links,
        summary.forbidden_rate()
    );
    let _ = writeln!(out);

    let breakdown = forbidden_breakdown(&result.probe_results, policy);
    if !breakdown.is_empty() {
        let _ = writeln!(out, "Forbidden by Kind:");
        for (kind, urls) in &breakdown {
            let _ = writeln!(out, "  {}: {}", kind, urls.len());
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Reachable: {:.1}% ({} / {} links answered 200) in {} ms",
        summary.reachable_rate(),
        summary.ok_links,
        summary.total_links,
        summary.duration_ms
    );

    out
}

fn display_token(result: &CrawlResult) -> String {
    if result.domain_token.is_degenerate() {
        "(none)".to_string()
    } else {
        result.domain_token.to_string()
    }
}
