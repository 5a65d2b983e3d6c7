//! Disposition gating — turns a scored verdict into an action under policy.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::{IntegrationMode, ScoutPolicyConfig};
use crate::evaluate::{Recommendation, StarEvaluation};
use crate::trigger::TriggerDecision;

/// Risk score below which autonomous integration is downgraded to a report,
/// unless the policy allows proceeding with warnings.
const SECURITY_WARNING_FLOOR: f64 = 9.0;

// ── Disposition ──────────────────────────────────────────────────────────────

/// What the caller may do with a recommendation under the active policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Integrate without further ceremony.
    Proceed,
    /// Surface the recommendation and stop.
    Report,
    /// Stop and ask; `operations` lists what needs sign-off.
    Confirm { operations: Vec<String> },
}

impl Disposition {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::Confirm { .. })
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => write!(f, "proceed"),
            Self::Report => write!(f, "report"),
            Self::Confirm { operations } if operations.is_empty() => write!(f, "confirm"),
            Self::Confirm { operations } => write!(f, "confirm ({})", operations.join(", ")),
        }
    }
}

// ── Gating ───────────────────────────────────────────────────────────────────

/// Whether the trigger decision clears the policy's search threshold.
pub fn passes_trigger(policy: &ScoutPolicyConfig, decision: &TriggerDecision) -> bool {
    decision.should_search && decision.confidence >= policy.trigger_threshold
}

/// Operations from `requested` that the policy always gates behind explicit
/// confirmation, whatever the integration mode.
pub fn gated_operations(policy: &ScoutPolicyConfig, requested: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|op| {
            policy
                .ask_for_permissions
                .iter()
                .any(|gated| gated.eq_ignore_ascii_case(op))
        })
        .cloned()
        .collect()
}

/// Decide what to do with a scored repository under the active policy.
///
/// Only adopt and trial verdicts are actionable; assess and avoid are always
/// reported. Privileged operations require confirmation in every mode, and in
/// autonomous mode an evaluation carrying risk warnings is downgraded to a
/// report unless `allow_security_warnings` is set.
pub fn disposition(
    policy: &ScoutPolicyConfig,
    evaluation: &StarEvaluation,
    requested_operations: &[String],
) -> Disposition {
    match evaluation.recommendation {
        Recommendation::Avoid | Recommendation::Assess => Disposition::Report,
        Recommendation::Adopt | Recommendation::Trial => match policy.integration_mode {
            IntegrationMode::Recommend => Disposition::Report,
            IntegrationMode::Ask => Disposition::Confirm {
                operations: requested_operations.to_vec(),
            },
            IntegrationMode::Autonomous => {
                autonomous_disposition(policy, evaluation, requested_operations)
            }
        },
    }
}

fn autonomous_disposition(
    policy: &ScoutPolicyConfig,
    evaluation: &StarEvaluation,
    requested_operations: &[String],
) -> Disposition {
    let gated = gated_operations(policy, requested_operations);
    if !gated.is_empty() {
        debug!(
            repo = evaluation.repo.full_name.as_str(),
            operations = ?gated,
            "Privileged operations require confirmation"
        );
        return Disposition::Confirm { operations: gated };
    }

    if evaluation.risk_score < SECURITY_WARNING_FLOOR && !policy.allow_security_warnings {
        debug!(
            repo = evaluation.repo.full_name.as_str(),
            risk = evaluation.risk_score,
            "Risk warnings present, downgrading to report"
        );
        return Disposition::Report;
    }

    Disposition::Proceed
}

// ── Tests ────────────────────────────────────────────────────────────────────
