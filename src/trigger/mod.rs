//! Trigger classifier — decides whether a task is worth a library search.
//!
//! Pure keyword-tier analysis of a natural-language task description. The
//! classifier is total: any string input produces a decision, never an error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

pub(crate) mod keywords;

use keywords::{KeywordHit, scan};

/// Confidence at or above which a search is considered worthwhile.
pub const SEARCH_THRESHOLD: f64 = 0.6;

/// Confidence at or above which the decision classifies as high.
const HIGH_CONFIDENCE: f64 = 0.8;

/// Confidence assigned when nothing in any tier matches.
const NO_MATCH_CONFIDENCE: f64 = 0.3;

/// Boost for the first additional positive keyword; decays per keyword.
const EXTRA_KEYWORD_BOOST: f64 = 0.05;
const BOOST_DECAY: f64 = 0.01;
const BOOST_FLOOR: f64 = 0.01;

const MAX_QUERIES: usize = 4;
const MAX_QUERY_KEYWORDS: usize = 3;

// ── Decision types ───────────────────────────────────────────────────────────

/// Confidence band of a trigger decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TriggerCategory {
    High,
    Medium,
    Low,
}

impl TriggerCategory {
    /// Band a confidence value per the documented thresholds.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            Self::High
        } else if confidence >= SEARCH_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Outcome of analyzing one task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDecision {
    pub should_search: bool,
    pub confidence: f64,
    pub category: TriggerCategory,
    /// Distinct keyword hits across all tiers, high tier first.
    pub matched_keywords: Vec<String>,
    /// 1–4 ready-to-run search queries; empty when no positive keyword hit.
    pub suggested_queries: Vec<String>,
}

// ── Classifier ───────────────────────────────────────────────────────────────

/// Analyze a task description for search-worthiness.
///
/// `technology` is an optional hint (e.g. `"rust"`); when present, at least
/// one suggested query carries it.
pub fn analyze(task_description: &str, technology: Option<&str>) -> TriggerDecision {
    let hits = scan(task_description);

    let confidence = confidence_from(&hits);
    let category = TriggerCategory::from_confidence(confidence);
    let should_search = confidence >= SEARCH_THRESHOLD;

    let matched_keywords: Vec<String> = hits.iter().map(|h| h.keyword.to_string()).collect();
    let suggested_queries = build_queries(&hits, technology);

    debug!(
        confidence,
        category = %category,
        matched = matched_keywords.len(),
        "trigger decision"
    );

    TriggerDecision {
        should_search,
        confidence,
        category,
        matched_keywords,
        suggested_queries,
    }
}

/// Highest base score among all hits, plus a diminishing boost per extra
/// positive keyword. Negative keywords never boost, so confidence stays
/// non-decreasing in the number of matched keywords.
fn confidence_from(hits: &[KeywordHit]) -> f64 {
    let Some(base) = hits
        .iter()
        .map(|h| h.base)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    else {
        return NO_MATCH_CONFIDENCE;
    };

    let positives = hits.iter().filter(|h| h.tier.is_positive()).count();
    let extras = positives.saturating_sub(1);

    let mut confidence = base;
    for i in 0..extras {
        #[allow(clippy::cast_precision_loss)]
        let boost = (EXTRA_KEYWORD_BOOST - BOOST_DECAY * i as f64).max(BOOST_FLOOR);
        confidence += boost;
    }

    confidence.clamp(0.0, 1.0)
}

/// Build search queries from the positive hits, strongest keyword first.
fn build_queries(hits: &[KeywordHit], technology: Option<&str>) -> Vec<String> {
    let mut positives: Vec<&KeywordHit> = hits.iter().filter(|h| h.tier.is_positive()).collect();
    positives.sort_by(|a, b| b.base.partial_cmp(&a.base).unwrap_or(Ordering::Equal));

    let tech = technology
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut queries: Vec<String> = Vec::new();
    let mut push = |q: String, queries: &mut Vec<String>| {
        if !queries.contains(&q) {
            queries.push(q);
        }
    };

    for (i, hit) in positives.iter().take(MAX_QUERY_KEYWORDS).enumerate() {
        push(format!("{} library", hit.keyword), &mut queries);
        if i == 0
            && let Some(t) = &tech
        {
            push(format!("{} {t}", hit.keyword), &mut queries);
        }
    }

    queries.truncate(MAX_QUERIES);
    queries
}

// ── Tests ────────────────────────────────────────────────────────────────────
