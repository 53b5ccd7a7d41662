//! Probe outcome definitions for discovered links
//!
//! This module defines what a single liveness probe can resolve to, and the
//! failure buckets used when reporting forbidden links.

use std::fmt;

/// Numeric status recorded for a link whose probe never got a response
pub const UNREACHABLE_STATUS: u16 = 0;

/// Final outcome of probing one discovered link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// The link answered with this HTTP status code
    Status(u16),

    /// The probe failed at the transport level (DNS, connect, timeout)
    ///
    /// Only produced in relaxed probe mode; strict mode aborts the batch.
    Unreachable {
        /// Why the probe did not complete
        reason: String,
    },
}

impl ProbeOutcome {
    /// Returns true if the link answered exactly `200 OK`
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Status(200))
    }

    /// Returns true if the link answered with any 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Status(code) if (200..300).contains(code))
    }

    /// Returns true if the probe failed at the transport level
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns the numeric status, using the sentinel for unreachable links
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status(code) => *code,
            Self::Unreachable { .. } => UNREACHABLE_STATUS,
        }
    }

    /// Returns the failure bucket for this outcome, or None for `200 OK`
    pub fn failure_kind(&self) -> Option<FailureKind> {
        let code = match self {
            Self::Unreachable { .. } => return Some(FailureKind::Unreachable),
            Self::Status(200) => return None,
            Self::Status(code) => *code,
        };

        Some(match code {
            401 | 402 | 403 | 407 => FailureKind::AuthRequired,
            404 | 410 => FailureKind::NotFound,
            400..=499 => FailureKind::ClientError,
            500..=599 => FailureKind::ServerError,
            _ => FailureKind::Other,
        })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Unreachable { reason } => write!(f, "unreachable ({})", reason),
        }
    }
}

/// Reporting bucket for a forbidden link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// 401, 402, 403 or 407
    AuthRequired,

    /// 404 or 410
    NotFound,

    /// Any other 4xx
    ClientError,

    /// Any 5xx
    ServerError,

    /// No response at all
    Unreachable,

    /// Non-200 status outside the error ranges (1xx, other 2xx, 3xx)
    Other,
}

impl FailureKind {
    /// Returns a short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Auth Required",
            Self::NotFound => "Not Found",
            Self::ClientError => "Client Error",
            Self::ServerError => "Server Error",
            Self::Unreachable => "Unreachable",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
