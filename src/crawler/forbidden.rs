//! Forbidden-link aggregation
//!
//! Derives the forbidden subset from probe results. By default anything other
//! than exactly `200 OK` is forbidden, with no special handling for 401/403.

use crate::state::{FailureKind, ProbeOutcome};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Which probe outcomes count as forbidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForbiddenPolicy {
    /// Everything except exactly `200 OK`
    #[default]
    NotOk,

    /// Everything outside the 2xx range
    NotSuccess,
}

impl ForbiddenPolicy {
    /// Returns true if the outcome is forbidden under this policy
    pub fn is_forbidden(&self, outcome: &ProbeOutcome) -> bool {
        match self {
            Self::NotOk => !outcome.is_ok(),
            Self::NotSuccess => !outcome.is_success(),
        }
    }
}

/// Collects the links whose probe outcome is forbidden
///
/// The result is sorted. Running this twice over the same map yields the
/// same vector.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use sumi_sieve::crawler::{aggregate_forbidden, ForbiddenPolicy};
/// use sumi_sieve::ProbeOutcome;
///
/// let results = HashMap::from([
///     ("https://a.example.com".to_string(), ProbeOutcome::Status(200)),
///     ("https://b.example.com".to_string(), ProbeOutcome::Status(403)),
/// ]);
///
/// let forbidden = aggregate_forbidden(&results, ForbiddenPolicy::NotOk);
/// assert_eq!(forbidden, vec!["https://b.example.com"]);
/// ```
pub fn aggregate_forbidden(
    results: &HashMap<String, ProbeOutcome>,
    policy: ForbiddenPolicy,
) -> Vec<String> {
    let mut forbidden: Vec<String> = results
        .iter()
        .filter(|(_, outcome)| policy.is_forbidden(outcome))
        .map(|(url, _)| url.clone())
        .collect();

    forbidden.sort();
    forbidden
}

/// Groups the forbidden links by failure kind
///
/// Links that are forbidden only because of the policy (e.g. a 204 under
/// `NotOk`) land in [`FailureKind::Other`].
pub fn forbidden_breakdown(
    results: &HashMap<String, ProbeOutcome>,
    policy: ForbiddenPolicy,
) -> BTreeMap<FailureKind, Vec<String>> {
    let mut breakdown: BTreeMap<FailureKind, Vec<String>> = BTreeMap::new();

    for (url, outcome) in results {
        if !policy.is_forbidden(outcome) {
            continue;
        }
        let kind = outcome.failure_kind().unwrap_or(FailureKind::Other);
        breakdown.entry(kind).or_default().push(url.clone());
    }

    for urls in breakdown.values_mut() {
        urls.sort();
    }

    breakdown
}
