//! Sumi-Sieve main entry point
//!
//! This is the command-line interface for the Sumi-Sieve link sieve.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use sumi_sieve::config::{load_config_with_hash, validate, Config};
use sumi_sieve::crawler::{user_agent_string, Crawler, ProbeMode};
use sumi_sieve::output::{MarkdownReport, OutputHandler, TerminalSummary};
use sumi_sieve::url::MatchPolicy;
use sumi_sieve::{validate_seed_url, SieveError, GENERIC_FAILURE_MESSAGE};
use tracing_subscriber::EnvFilter;

/// Exit code for invalid input or configuration
const EXIT_USAGE: u8 = 2;

/// Sumi-Sieve: a single-page link sieve
///
/// Sumi-Sieve fetches one page, sorts its links into internal and external
/// relative to the page's domain, probes every link concurrently, and reports
/// which ones are forbidden or unreachable.
#[derive(Parser, Debug)]
#[command(name = "sumi-sieve")]
#[command(version)]
#[command(about = "A single-page link sieve", long_about = None)]
struct Cli {
    /// The page to sieve (http or https)
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Abort the whole batch on the first transport failure
    #[arg(long, conflicts_with = "relaxed")]
    strict: bool,

    /// Record transport failures as unreachable links (default)
    #[arg(long, conflicts_with = "strict")]
    relaxed: bool,

    /// Match the domain token against host labels instead of the whole URL
    #[arg(long)]
    host_match: bool,

    /// Write the markdown report to this file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and seed, print the plan, and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match load_effective_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Err(e) = validate_seed_url(&cli.seed) {
        tracing::error!("Rejected seed URL '{}': {}", cli.seed, e);
        eprintln!("Invalid seed URL: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }
    let seed = cli.seed.trim();

    if cli.dry_run {
        handle_dry_run(&config, seed);
        return ExitCode::SUCCESS;
    }

    match handle_sieve(&config, config_hash, seed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Sieve failed: {:#}", e);
            let message = e
                .downcast_ref::<SieveError>()
                .map(SieveError::user_message)
                .unwrap_or(GENERIC_FAILURE_MESSAGE);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sieve=info,warn"),
            1 => EnvFilter::new("sumi_sieve=debug,info"),
            _ => EnvFilter::new("sumi_sieve=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    if cli.strict {
        config.probe.mode = ProbeMode::Strict;
    } else if cli.relaxed {
        config.probe.mode = ProbeMode::Relaxed;
    }
    if cli.host_match {
        config.classify.match_policy = MatchPolicy::HostLabel;
    }
    if let Some(path) = &cli.output {
        config.output.report_path = Some(path.display().to_string());
    }

    validate(&config).context("command-line overrides")?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config, seed: &str) {
    let token = sumi_sieve::extract_domain_token(seed);

    println!("=== Sumi-Sieve Dry Run ===\n");

    println!("Seed: {}", seed);
    if token.is_degenerate() {
        println!("Domain token: (none, every link will be external)");
    } else {
        println!("Domain token: {}", token);
    }

    println!("\nProbe:");
    println!("  Mode: {:?}", config.probe.mode);
    println!("  Timeout: {}ms", config.probe.timeout_ms);
    match config.probe.batch_deadline_ms {
        Some(ms) => println!("  Batch deadline: {}ms", ms),
        None => println!("  Batch deadline: none"),
    }

    println!("\nClassification: {:?}", config.classify.match_policy);
    println!("Forbidden policy: {:?}", config.forbidden.policy);
    println!("Fetch timeout: {}ms", config.fetch.timeout_ms);
    println!("User agent: {}", user_agent_string(&config.user_agent));

    match &config.output.report_path {
        Some(path) => println!("Report: {}", path),
        None => println!("Report: stdout"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main sieve run
async fn handle_sieve(
    config: &Config,
    config_hash: Option<String>,
    seed: &str,
) -> anyhow::Result<()> {
    let crawler = Crawler::new(config)?;
    let result = crawler.run(seed).await?;

    tracing::info!(
        "Sieve completed in {} ms: {} link(s), {} forbidden",
        result.duration_ms(),
        result.total_links(),
        result.forbidden_links.len()
    );

    let mut report = MarkdownReport::new(config.output.report_path.as_ref().map(PathBuf::from))
        .with_probe_mode(config.probe.mode);
    if let Some(hash) = config_hash {
        report = report.with_config_hash(hash);
    }
    report.emit(&result)?;

    // The markdown already went to stdout when no report file is set
    if report.path().is_some() {
        TerminalSummary::new(config.forbidden.policy).emit(&result)?;
    }

    Ok(())
}
