//! Crawler coordinator - pipeline orchestration
//!
//! Runs the stages of a single sieve run in order:
//! 1. Fetch the seed page (title + counted links)
//! 2. Extract the domain token from the seed URL
//! 3. Classify links as internal or external
//! 4. Probe every link concurrently
//! 5. Aggregate the forbidden links
//!
//! Stages never overlap; only the probe stage is internally parallel.

use crate::config::Config;
use crate::crawler::{
    aggregate_forbidden, build_http_client, fetch_page, head_probe, probe_all, DiscoveredPage,
    ProbeError,
};
use crate::state::CrawlResult;
use crate::url::{classify_links, extract_domain_token};
use crate::SieveError;
use chrono::Utc;
use reqwest::Client;
use std::future::Future;

/// Main crawler structure
///
/// Holds the configuration and the two HTTP clients, built once and reused
/// for every run.
pub struct Crawler {
    config: Config,
    fetch_client: Client,
    probe_client: Client,
}

impl Crawler {
    /// Creates a new crawler instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Clients built successfully
    /// * `Err(SieveError)` - An HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, SieveError> {
        let fetch_client = build_http_client(&config.user_agent, config.fetch.timeout())?;
        let probe_client = build_http_client(&config.user_agent, config.probe.timeout())?;

        Ok(Self {
            config: config.clone(),
            fetch_client,
            probe_client,
        })
    }

    /// Returns the configuration this crawler was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches the seed page and runs the full pipeline on it
    ///
    /// The seed is assumed to have passed [`validate_seed_url`](crate::url::validate_seed_url).
    pub async fn run(&self, seed_url: &str) -> Result<CrawlResult, SieveError> {
        tracing::info!("Fetching seed page {}", seed_url);
        let page = fetch_page(&self.fetch_client, seed_url).await?;
        tracing::info!(
            "Discovered {} unique link(s) on {}",
            page.links.len(),
            page.final_url
        );

        self.analyze(seed_url, page).await
    }

    /// Runs the classification and probe stages on an already-fetched page
    pub async fn analyze(
        &self,
        seed_url: &str,
        page: DiscoveredPage,
    ) -> Result<CrawlResult, SieveError> {
        self.analyze_with(seed_url, page, head_probe).await
    }

    /// Runs the classification and probe stages with a custom probe
    ///
    /// # Arguments
    ///
    /// * `seed_url` - The seed URL the page was fetched from
    /// * `page` - Title and counted links of the seed page
    /// * `probe` - Probe run once per link (see [`probe_all`])
    pub async fn analyze_with<F, Fut>(
        &self,
        seed_url: &str,
        page: DiscoveredPage,
        probe: F,
    ) -> Result<CrawlResult, SieveError>
    where
        F: Fn(String, Client) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = Result<u16, ProbeError>> + Send + 'static,
    {
        let started_at = Utc::now();

        let domain_token = extract_domain_token(seed_url);
        if domain_token.is_degenerate() {
            tracing::warn!(
                "ClassificationDegenerate: no domain token in seed '{}', all links are external",
                seed_url
            );
        } else {
            tracing::debug!("Domain token for {}: {}", seed_url, domain_token);
        }

        let classified = classify_links(
            &domain_token,
            &page.links,
            self.config.classify.match_policy,
        );
        tracing::info!(
            "Classified {} internal and {} external link(s)",
            classified.internal.len(),
            classified.external.len()
        );

        let options = self.config.probe.dispatch_options();
        tracing::info!(
            "Probing {} link(s) in {:?} mode",
            page.links.len(),
            options.mode
        );
        let probe_results = probe_all(&page.links, &self.probe_client, probe, &options).await?;

        let forbidden_links = aggregate_forbidden(&probe_results, self.config.forbidden.policy);
        tracing::info!("Found {} forbidden link(s)", forbidden_links.len());

        Ok(CrawlResult {
            seed_url: seed_url.to_string(),
            domain_token,
            page_title: page.title,
            discovered_links: page.links,
            probe_results,
            internal_links: classified.internal,
            external_links: classified.external,
            forbidden_links,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Runs one complete sieve pass over a seed URL
///
/// # Example
///
/// ```no_run
/// use sumi_sieve::config::Config;
/// use sumi_sieve::crawler::run_crawl;
///
/// # async fn example() -> Result<(), sumi_sieve::SieveError> {
/// let result = run_crawl(&Config::default(), "https://www.example.com").await?;
/// println!("{} forbidden link(s)", result.forbidden_links.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, seed_url: &str) -> Result<CrawlResult, SieveError> {
    let crawler = Crawler::new(config)?;
    crawler.run(seed_url).await
}
