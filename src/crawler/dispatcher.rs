//! Concurrent probe dispatcher
//!
//! Fans one probe task out per discovered link and fans the reports back in
//! through a single channel. The collecting loop is the only writer of the
//! result map, so no locking is involved.
//!
//! # Failure Policy
//!
//! | Condition | Strict | Relaxed |
//! |-----------|--------|---------|
//! | HTTP response (any status) | Recorded | Recorded |
//! | Transport error | Abort batch → `ProbeTransport` | Recorded as `Unreachable` |
//! | Batch deadline expires | Abort batch → `BatchDeadline` | Pending links → `Unreachable` |
//! | Probe task dies silently | Abort batch → `ProbeTaskFailed` | Abort batch → `ProbeTaskFailed` |

use crate::crawler::ProbeError;
use crate::state::ProbeOutcome;
use crate::SieveError;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Reason recorded for links still pending when the batch deadline expires
pub const DEADLINE_REASON: &str = "batch deadline exceeded";

/// What to do when a single probe fails at the transport level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeMode {
    /// Any transport error fails the whole batch
    Strict,

    /// Transport errors are recorded as unreachable and the batch continues
    #[default]
    Relaxed,
}

/// Options for one dispatch batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Transport failure policy
    pub mode: ProbeMode,

    /// Optional deadline for the whole batch, on top of per-probe timeouts
    pub batch_deadline: Option<Duration>,
}

/// A single probe result sent back to the collector
#[derive(Debug)]
struct ProbeReport {
    url: String,
    outcome: Result<u16, ProbeError>,
}

/// Probes every link concurrently and returns one outcome per link
///
/// Each key of `links` gets its own task running `probe(url, client)`. The
/// client is cloned into each task; clones share one connection pool. The
/// collector waits for exactly `links.len()` reports, in whatever order they
/// arrive.
///
/// On success the returned map has exactly one entry per input link. It is
/// never partial: when the batch fails, everything collected so far is
/// dropped and the remaining tasks are aborted.
///
/// # Arguments
///
/// * `links` - Discovered links mapped to their occurrence counts
/// * `client` - Shared HTTP client
/// * `probe` - The probe to run per link (usually [`head_probe`](crate::crawler::head_probe))
/// * `options` - Failure policy and optional batch deadline
///
/// # Returns
///
/// * `Ok(HashMap)` - URL → final probe outcome, one entry per link
/// * `Err(SieveError)` - The batch was aborted
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use sumi_sieve::crawler::{head_probe, probe_all, DispatchOptions};
///
/// # async fn example() -> Result<(), sumi_sieve::SieveError> {
/// let links = HashMap::from([("https://www.example.com/".to_string(), 1)]);
/// let client = reqwest::Client::new();
/// let results = probe_all(&links, &client, head_probe, &DispatchOptions::default()).await?;
/// assert_eq!(results.len(), 1);
/// # Ok(())
/// # }
/// ```
pub async fn probe_all<F, Fut>(
    links: &HashMap<String, u32>,
    client: &Client,
    probe: F,
    options: &DispatchOptions,
) -> Result<HashMap<String, ProbeOutcome>, SieveError>
where
    F: Fn(String, Client) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<u16, ProbeError>> + Send + 'static,
{
    let expected = links.len();
    let mut results = HashMap::with_capacity(expected);
    if expected == 0 {
        return Ok(results);
    }

    let (tx, mut rx) = mpsc::channel::<ProbeReport>(expected);
    let mut tasks = JoinSet::new();

    for url in links.keys() {
        let tx = tx.clone();
        let client = client.clone();
        let probe = probe.clone();
        let url = url.clone();

        tasks.spawn(async move {
            let outcome = probe(url.clone(), client).await;
            // A closed channel means the batch was already abandoned
            let _ = tx.send(ProbeReport { url, outcome }).await;
        });
    }

    // Only the tasks hold senders now, so `recv` yields None once they are all gone
    drop(tx);

    tracing::debug!("Dispatched {} probe(s)", expected);

    // A deadline too far out to represent is the same as no deadline
    let deadline = options
        .batch_deadline
        .and_then(|d| Instant::now().checked_add(d));
    let mut received = 0;

    while received < expected {
        let next = match deadline {
            Some(at) => match tokio::time::timeout_at(at, rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    tasks.abort_all();
                    return expire_pending(links, results, options.mode);
                }
            },
            None => rx.recv().await,
        };

        let Some(report) = next else {
            tasks.abort_all();
            return Err(SieveError::ProbeTaskFailed(format!(
                "only {} of {} probes reported",
                received, expected
            )));
        };

        received += 1;

        match report.outcome {
            Ok(status) => {
                tracing::debug!("Probe {} -> HTTP {}", report.url, status);
                results.insert(report.url, ProbeOutcome::Status(status));
            }
            Err(error) => match options.mode {
                ProbeMode::Strict => {
                    tracing::debug!("Probe {} failed in strict mode: {}", report.url, error);
                    tasks.abort_all();
                    return Err(SieveError::ProbeTransport {
                        url: report.url,
                        source: error,
                    });
                }
                ProbeMode::Relaxed => {
                    tracing::warn!("Link {} is unreachable: {}", report.url, error);
                    results.insert(
                        report.url,
                        ProbeOutcome::Unreachable {
                            reason: error.to_string(),
                        },
                    );
                }
            },
        }
    }

    Ok(results)
}

/// Resolves a batch whose deadline expired before every report arrived
fn expire_pending(
    links: &HashMap<String, u32>,
    mut results: HashMap<String, ProbeOutcome>,
    mode: ProbeMode,
) -> Result<HashMap<String, ProbeOutcome>, SieveError> {
    let pending = links.len() - results.len();

    match mode {
        ProbeMode::Strict => Err(SieveError::BatchDeadline { pending }),
        ProbeMode::Relaxed => {
            tracing::warn!(
                "Batch deadline exceeded, marking {} pending link(s) unreachable",
                pending
            );
            for url in links.keys() {
                results
                    .entry(url.clone())
                    .or_insert_with(|| ProbeOutcome::Unreachable {
                        reason: DEADLINE_REASON.to_string(),
                    });
            }
            Ok(results)
        }
    }
}
