//! Output module for rendering sieve results
//!
//! This module handles:
//! - Generating a markdown report of a finished run
//! - Printing a short terminal summary

mod markdown;
pub mod stats;
mod traits;

pub use markdown::{format_markdown_report, MarkdownReport};
pub use stats::{format_summary, TerminalSummary};
pub use traits::{OutputError, OutputHandler, OutputResult, ReportSummary};
