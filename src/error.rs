use std::fmt;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `starscout`.
///
/// Each surface defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the CLI continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ScoutError {
    // ── Policy ──────────────────────────────────────────────────────────
    #[error("policy: {0}")]
    Policy(#[from] PolicyError),

    // ── Candidate input ─────────────────────────────────────────────────
    #[error("candidates: {0}")]
    Candidates(#[from] CandidateError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Policy errors ───────────────────────────────────────────────────────────

/// One rejected field in a policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    /// Canonical snake_case field name, regardless of the spelling used in
    /// the document.
    pub field: &'static str,
    pub message: String,
}

impl PolicyViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn violation_summary(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Every violated field found in one validation pass. A document that
    /// produces this error is rejected as a whole.
    #[error("rejected: {}", violation_summary(.0))]
    Invalid(Vec<PolicyViolation>),

    #[error("unsupported format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Candidate input errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

// ─── Convenience re-exports ──────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ScoutError>;
