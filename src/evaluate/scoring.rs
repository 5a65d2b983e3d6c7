//! STAR sub-scores — Stars, Time, Alignment, Risk, each on a 0–10 scale.

use chrono::{DateTime, Utc};

use super::{EvaluationContext, GithubRepo};
use crate::trigger::keywords::contains_word;

// ── Weights ──────────────────────────────────────────────────────────────────

const STAR_WEIGHT: f64 = 0.30;
const TIME_WEIGHT: f64 = 0.25;
const ALIGNMENT_WEIGHT: f64 = 0.25;
const RISK_WEIGHT: f64 = 0.20;

/// Fixed weighted sum of the four sub-scores; weights sum to 1, so the
/// result stays on the 0–10 scale.
pub(crate) fn total_score(star: f64, time: f64, alignment: f64, risk: f64) -> f64 {
    STAR_WEIGHT * star + TIME_WEIGHT * time + ALIGNMENT_WEIGHT * alignment + RISK_WEIGHT * risk
}

// ── Stars ────────────────────────────────────────────────────────────────────

const FORKS_LIFT_CAP: f64 = 0.5;

/// Popularity score: piecewise log staircase on stars with a small lift from
/// forks. Band results are clamped so bands never overlap.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn star_score(stars: u64, forks: u64) -> f64 {
    let lift = ((forks as f64 + 1.0).log10() / 8.0).min(FORKS_LIFT_CAP);
    let s = stars as f64;

    let banded = if stars >= 20_000 {
        9.0 + (s / 20_000.0).log10().clamp(0.0, 1.0) + lift
    } else if stars >= 1_000 {
        (5.0 + 3.0 * (s / 1_000.0).log10() / 20.0_f64.log10() + lift).min(8.0)
    } else if stars >= 100 {
        (3.0 + 2.0 * (s / 100.0).log10() + lift).min(5.0)
    } else {
        (1.5 * (s + 1.0).log10() + lift).min(4.0)
    };

    banded.clamp(0.0, 10.0)
}

// ── Time ─────────────────────────────────────────────────────────────────────

/// Recency score: staircase on days since the last push. Future timestamps
/// (clock skew) count as zero days old.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn time_score(days_since_push: i64) -> f64 {
    let d = days_since_push.max(0) as f64;

    if d <= 7.0 {
        10.0 - d / 7.0
    } else if d <= 30.0 {
        9.0 - 2.0 * (d - 7.0) / 23.0
    } else if d <= 90.0 {
        7.0 - 2.0 * (d - 30.0) / 60.0
    } else if d <= 365.0 {
        5.0 - 2.0 * (d - 90.0) / 275.0
    } else if d <= 730.0 {
        3.0 - 1.5 * (d - 365.0) / 365.0
    } else {
        (1.5 - 1.5 * (d - 730.0) / 1095.0).max(0.0)
    }
}

// ── Alignment ────────────────────────────────────────────────────────────────

const ALIGNMENT_NEUTRAL_BASE: f64 = 4.0;
const ALIGNMENT_MATCH_SPAN: f64 = 6.0;
const TECHNOLOGY_BONUS: f64 = 2.0;
const MIN_TASK_WORD_LEN: usize = 3;

/// Filler words that carry no task signal.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "are", "was", "were", "will",
    "would", "should", "could", "can", "has", "have", "had", "not", "but", "all", "any", "our",
    "your", "their", "its", "when", "where", "than", "then", "what", "which", "who", "how", "use",
    "using", "used", "new", "about", "over", "under", "more", "most", "some", "each",
];

/// Task-relevance score: neutral base plus the fraction of task keywords
/// found in the repo's description, topics and name, plus a flat bonus when
/// the technology hint matches the repo language. Missing description or
/// topics simply contribute nothing.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn alignment_score(repo: &GithubRepo, ctx: &EvaluationContext) -> f64 {
    let keywords = task_keywords(ctx);
    let haystack = repo_haystack(repo);

    let fraction = if keywords.is_empty() {
        0.0
    } else {
        let matched = keywords
            .iter()
            .filter(|k| contains_word(&haystack, k))
            .count();
        matched as f64 / keywords.len() as f64
    };

    let mut score = ALIGNMENT_NEUTRAL_BASE + ALIGNMENT_MATCH_SPAN * fraction;

    if technology_matches(ctx.technology.as_deref(), repo.language.as_deref()) {
        score += TECHNOLOGY_BONUS;
    }

    score.min(10.0)
}

fn technology_matches(technology: Option<&str>, language: Option<&str>) -> bool {
    let (Some(tech), Some(lang)) = (technology, language) else {
        return false;
    };
    let tech = tech.trim().to_lowercase();
    let lang = lang.trim().to_lowercase();
    if tech.is_empty() || lang.is_empty() {
        return false;
    }
    tech == lang || tech.contains(&lang) || lang.contains(&tech)
}

/// Distinct lowercase keywords: explicit context keywords first, then
/// significant words of the task description.
fn task_keywords(ctx: &EvaluationContext) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for keyword in &ctx.keywords {
        let k = keyword.trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }

    for raw in ctx
        .task_description
        .split(|c: char| !c.is_ascii_alphanumeric())
    {
        let w = raw.to_lowercase();
        if w.len() >= MIN_TASK_WORD_LEN && !STOPWORDS.contains(&w.as_str()) && !out.contains(&w) {
            out.push(w);
        }
    }

    out
}

fn repo_haystack(repo: &GithubRepo) -> String {
    let mut hay = String::new();
    if let Some(description) = &repo.description {
        hay.push_str(&description.to_lowercase());
    }
    for topic in &repo.topics {
        hay.push(' ');
        hay.push_str(&topic.to_lowercase());
    }
    hay.push(' ');
    hay.push_str(&repo.full_name.to_lowercase().replace(['/', '-', '_', '.'], " "));
    hay
}

// ── Risk ─────────────────────────────────────────────────────────────────────

const ARCHIVED_PENALTY: f64 = 8.0;
const MISSING_LICENSE_PENALTY: f64 = 2.0;
const ISSUE_BACKLOG_PENALTY: f64 = 1.5;
const FLEDGLING_PENALTY: f64 = 1.0;
const ISSUE_BACKLOG_THRESHOLD: u64 = 500;
const FLEDGLING_AGE_DAYS: i64 = 90;

/// Safety score, inverted: 10 is safest. Penalties compound additively and
/// the result floors at 0. An archived repo lands at 2 or below on its own.
pub(crate) fn risk_score(repo: &GithubRepo, now: DateTime<Utc>) -> f64 {
    let mut score = 10.0;

    if repo.archived {
        score -= ARCHIVED_PENALTY;
    }
    if repo.license.is_none() {
        score -= MISSING_LICENSE_PENALTY;
    }
    if repo.open_issues_count > ISSUE_BACKLOG_THRESHOLD {
        score -= ISSUE_BACKLOG_PENALTY;
    }
    if (now - repo.created_at).num_days() < FLEDGLING_AGE_DAYS {
        score -= FLEDGLING_PENALTY;
    }

    score.max(0.0)
}

// ── Tests ────────────────────────────────────────────────────────────────────
