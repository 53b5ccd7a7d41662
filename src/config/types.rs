use crate::crawler::{DispatchOptions, ForbiddenPolicy, ProbeMode};
use crate::url::MatchPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Sieve
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub forbidden: ForbiddenConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Liveness probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Per-probe request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,

    /// Transport failure policy
    #[serde(default)]
    pub mode: ProbeMode,

    /// Optional deadline for the whole probe batch (milliseconds)
    #[serde(rename = "batch-deadline-ms", default)]
    pub batch_deadline_ms: Option<u64>,
}

impl ProbeConfig {
    /// Returns the per-probe timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the dispatch options for a probe batch
    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            mode: self.mode,
            batch_deadline: self.batch_deadline_ms.map(Duration::from_millis),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_probe_timeout_ms(),
            mode: ProbeMode::default(),
            batch_deadline_ms: None,
        }
    }
}

/// Seed page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Request timeout for the seed page (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_fetch_timeout_ms")]
    pub timeout_ms: u64,
}

impl FetchConfig {
    /// Returns the seed fetch timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Link classification configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyConfig {
    /// How the domain token is matched against links
    #[serde(rename = "match-policy", default)]
    pub match_policy: MatchPolicy,
}

/// Forbidden-link configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForbiddenConfig {
    /// Which probe outcomes count as forbidden
    #[serde(default)]
    pub policy: ForbiddenPolicy,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiSieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/crawler".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to write the markdown report to (stdout when unset)
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_probe_timeout_ms() -> u64 {
    2_000
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}
