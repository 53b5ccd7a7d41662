//! Markdown report generation
//!
//! This module renders a human-readable markdown report of a sieve run,
//! including run metadata, totals, and the internal, external and forbidden
//! link lists.

use crate::crawler::ProbeMode;
use crate::output::traits::{OutputHandler, OutputResult, ReportSummary};
use crate::state::CrawlResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Markdown report output handler
///
/// Writes to `path` when one is set, otherwise to stdout.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReport {
    path: Option<PathBuf>,
    probe_mode: ProbeMode,
    config_hash: Option<String>,
}

impl MarkdownReport {
    /// Creates a report handler for the given destination
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Records the probe mode the run used
    pub fn with_probe_mode(mut self, mode: ProbeMode) -> Self {
        self.probe_mode = mode;
        self
    }

    /// Records the hash of the configuration file the run used
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Returns the destination path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Formats the report for a finished run
    pub fn render(&self, result: &CrawlResult) -> String {
        format_markdown_report(result, self.probe_mode, self.config_hash.as_deref())
    }
}

impl OutputHandler for MarkdownReport {
    fn emit(&self, result: &CrawlResult) -> OutputResult<()> {
        let markdown = self.render(result);

        match &self.path {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(markdown.as_bytes())?;
                tracing::info!("Report written to {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(markdown.as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Formats a sieve run as markdown
///
/// # Arguments
///
/// * `result` - The finished run
/// * `mode` - The probe mode the run used
/// * `config_hash` - Hash of the configuration file, if one was loaded
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(
    result: &CrawlResult,
    mode: ProbeMode,
    config_hash: Option<&str>,
) -> String {
    let summary = ReportSummary::from_result(result);
    let mut md = String::new();

    // Title
    md.push_str("# Sumi-Sieve Link Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", result.seed_url));
    md.push_str(&format!("- **Domain Token**: `{}`\n", result.domain_token));
    if let Some(title) = &result.page_title {
        md.push_str(&format!("- **Page Title**: {}\n", title));
    }
    md.push_str(&format!(
        "- **Started**: {}\n",
        result.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        result.finished_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Duration**: {} ms\n", summary.duration_ms));
    md.push_str(&format!("- **Probe Mode**: {:?}\n", mode));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Totals
    md.push_str("## Totals\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Unique Links | {} |\n", summary.total_links));
    md.push_str(&format!(
        "| Link Occurrences | {} |\n",
        summary.total_occurrences
    ));
    md.push_str(&format!("| Internal | {} |\n", summary.internal_links));
    md.push_str(&format!("| External | {} |\n", summary.external_links));
    md.push_str(&format!("| Forbidden | {} |\n", summary.forbidden_links));
    md.push_str(&format!(
        "| Unreachable | {} |\n",
        summary.unreachable_links
    ));
    md.push('\n');
    md.push_str(&format!(
        "Reachable: {:.2}%, forbidden: {:.2}%\n\n",
        summary.reachable_rate(),
        summary.forbidden_rate()
    ));

    push_link_list(&mut md, "Internal Links", &result.internal_links, result);
    push_link_list(&mut md, "External Links", &result.external_links, result);

    // Forbidden links, with status and bucket
    md.push_str(&format!(
        "## Forbidden Links ({})\n\n",
        result.forbidden_links.len()
    ));
    if result.forbidden_links.is_empty() {
        md.push_str("None.\n");
    } else {
        md.push_str("| URL | Status | Kind |\n");
        md.push_str("|-----|--------|------|\n");

        for url in &result.forbidden_links {
            let (status, kind) = match result.outcome(url) {
                Some(outcome) => (
                    outcome.to_string(),
                    outcome
                        .failure_kind()
                        .map(|k| k.label())
                        .unwrap_or("-")
                        .to_string(),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            md.push_str(&format!("| {} | {} | {} |\n", url, status, kind));
        }
    }

    md
}

fn push_link_list(md: &mut String, heading: &str, links: &[String], result: &CrawlResult) {
    md.push_str(&format!("## {} ({})\n\n", heading, links.len()));
    if links.is_empty() {
        md.push_str("None.\n\n");
        return;
    }

    for url in links {
        match result.occurrences(url) {
            n if n > 1 => md.push_str(&format!("- {} (x{})\n", url, n)),
            _ => md.push_str(&format!("- {}\n", url)),
        }
    }
    md.push('\n');
}
