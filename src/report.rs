//! Scout report — the assembled outcome of one scouting pass.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::evaluate::StarEvaluation;
use crate::policy::ScoutPolicyConfig;
use crate::policy::gating::{self, Disposition};
use crate::trigger::TriggerDecision;

/// Everything one scouting pass produced: the trigger decision, the ranked
/// candidate evaluations and the policy that governed the run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutReport {
    pub task_description: String,
    pub decision: TriggerDecision,
    /// Ranked best-first by total score.
    pub evaluations: Vec<StarEvaluation>,
    pub policy: ScoutPolicyConfig,
    pub generated_at: DateTime<Utc>,
}

impl ScoutReport {
    pub fn new(
        task_description: impl Into<String>,
        decision: TriggerDecision,
        evaluations: Vec<StarEvaluation>,
        policy: ScoutPolicyConfig,
    ) -> Self {
        Self {
            task_description: task_description.into(),
            decision,
            evaluations,
            policy,
            generated_at: Utc::now(),
        }
    }

    /// Highest-ranked candidate, if any survived evaluation.
    pub fn top(&self) -> Option<&StarEvaluation> {
        self.evaluations.first()
    }

    /// Disposition for the top candidate under the report's policy.
    pub fn top_disposition(&self, requested_operations: &[String]) -> Option<Disposition> {
        self.top()
            .map(|evaluation| gating::disposition(&self.policy, evaluation, requested_operations))
    }

    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "task: {}", self.task_description);
        let _ = writeln!(
            out,
            "trigger: search={} confidence={:.2} category={}",
            if self.decision.should_search { "yes" } else { "no" },
            self.decision.confidence,
            self.decision.category
        );
        if !self.decision.matched_keywords.is_empty() {
            let _ = writeln!(
                out,
                "matched: {}",
                self.decision.matched_keywords.join(", ")
            );
        }
        if !self.decision.suggested_queries.is_empty() {
            let _ = writeln!(
                out,
                "queries: {}",
                self.decision.suggested_queries.join(" | ")
            );
        }

        if self.evaluations.is_empty() {
            let _ = writeln!(out, "candidates: none evaluated");
            return out;
        }

        let _ = writeln!(out, "candidates:");
        for (rank, evaluation) in self.evaluations.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {:<40} {:<6} total={:.2} stars={:.1} time={:.1} align={:.1} risk={:.1}",
                rank + 1,
                evaluation.repo.full_name,
                evaluation.recommendation,
                evaluation.total_score,
                evaluation.star_score,
                evaluation.time_score,
                evaluation.alignment_score,
                evaluation.risk_score,
            );
        }

        out
    }
}
