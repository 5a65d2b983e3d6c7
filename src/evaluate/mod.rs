//! STAR evaluation — scores repositories on Stars, Time, Alignment and Risk.

mod scoring;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;
use tracing::debug;

// ── GithubRepo ───────────────────────────────────────────────────────────────

/// Repository record as supplied by an external search collaborator.
///
/// Accepts both the raw GitHub API field names (`stargazers_count`,
/// `html_url`, nested `license` object) and the short names used in
/// fixtures. Everything except the name, URL and the two timestamps is
/// optional and defaults to the conservative value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRepo {
    /// Owner/name slug, e.g. `tokio-rs/tokio`.
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "html_url")]
    pub url: String,
    #[serde(default, alias = "stargazers_count")]
    pub stars: u64,
    #[serde(default, alias = "forks_count")]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    /// License identifier; the GitHub API nests this in an object.
    #[serde(default, deserialize_with = "license_field")]
    pub license: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub pushed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "open_issues")]
    pub open_issues_count: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Accepts `"MIT"`, the GitHub API's `{"spdx_id": "MIT", ...}` object, or
/// null. `NOASSERTION` counts as no license.
fn license_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map
            .get("spdx_id")
            .or_else(|| map.get("key"))
            .or_else(|| map.get("name"))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty() && *s != "NOASSERTION")
            .map(str::to_owned),
        _ => None,
    }))
}

// ── EvaluationContext ────────────────────────────────────────────────────────

/// What the caller is actually trying to build; drives alignment scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub task_description: String,
    /// Keywords the trigger classifier matched, if any.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Language/framework hint, matched against the repo language.
    #[serde(default)]
    pub technology: Option<String>,
}

impl EvaluationContext {
    pub fn new(task_description: impl Into<String>) -> Self {
        Self {
            task_description: task_description.into(),
            keywords: Vec::new(),
            technology: None,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }
}

// ── Recommendation ───────────────────────────────────────────────────────────

const ADOPT_FLOOR: f64 = 8.0;
const TRIAL_FLOOR: f64 = 6.0;
const TRIAL_CEILING: f64 = 7.5;
const AVOID_TOTAL_FLOOR: f64 = 4.0;
const AVOID_RISK_CEILING: f64 = 2.0;

/// Final verdict for one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Recommendation {
    /// Popular, active, aligned and safe. Use it.
    Adopt,
    /// Promising; pilot it behind an abstraction first.
    Trial,
    /// Middle of the pack; needs human judgment.
    Assess,
    /// Archived, risky or a bad fit.
    Avoid,
}

fn recommend(total: f64, risk: f64, archived: bool) -> Recommendation {
    if archived || risk <= AVOID_RISK_CEILING || total < AVOID_TOTAL_FLOOR {
        Recommendation::Avoid
    } else if total >= ADOPT_FLOOR {
        Recommendation::Adopt
    } else if (TRIAL_FLOOR..TRIAL_CEILING).contains(&total) {
        Recommendation::Trial
    } else {
        Recommendation::Assess
    }
}

// ── StarEvaluation ───────────────────────────────────────────────────────────

/// Scored repository. Sub-scores and the total all sit on a 0-10 scale.
#[derive(Debug, Clone, Serialize)]
pub struct StarEvaluation {
    pub repo: GithubRepo,
    pub star_score: f64,
    pub time_score: f64,
    pub alignment_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
    pub recommendation: Recommendation,
}

// ── Evaluation ───────────────────────────────────────────────────────────────

/// Score a single repository against the task context.
pub fn evaluate(repo: &GithubRepo, context: &EvaluationContext) -> StarEvaluation {
    evaluate_at(repo, context, Utc::now())
}

/// Clock-injected variant of [`evaluate`], shared by batch ranking and tests.
pub fn evaluate_at(
    repo: &GithubRepo,
    context: &EvaluationContext,
    now: DateTime<Utc>,
) -> StarEvaluation {
    let star_score = scoring::star_score(repo.stars, repo.forks);
    let time_score = scoring::time_score((now - repo.pushed_at).num_days());
    let alignment_score = scoring::alignment_score(repo, context);
    let risk_score = scoring::risk_score(repo, now);
    let total_score = scoring::total_score(star_score, time_score, alignment_score, risk_score);
    let recommendation = recommend(total_score, risk_score, repo.archived);

    debug!(
        repo = repo.full_name.as_str(),
        total = total_score,
        verdict = %recommendation,
        "Scored repository"
    );

    StarEvaluation {
        repo: repo.clone(),
        star_score,
        time_score,
        alignment_score,
        risk_score,
        total_score,
        recommendation,
    }
}

/// Score every candidate and rank best-first. The sort is stable, so repos
/// with equal totals keep their input order.
pub fn evaluate_all(repos: &[GithubRepo], context: &EvaluationContext) -> Vec<StarEvaluation> {
    evaluate_all_at(repos, context, Utc::now())
}

/// Clock-injected variant of [`evaluate_all`]. One `now` is shared across the
/// batch so recency is judged consistently.
pub fn evaluate_all_at(
    repos: &[GithubRepo],
    context: &EvaluationContext,
    now: DateTime<Utc>,
) -> Vec<StarEvaluation> {
    let mut evaluations: Vec<StarEvaluation> = repos
        .iter()
        .map(|repo| evaluate_at(repo, context, now))
        .collect();

    evaluations.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });

    evaluations
}

// ── Tests ────────────────────────────────────────────────────────────────────
