//! Scout policy — validated autonomy configuration for the decision engine.

pub mod gating;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use tracing::debug;

use crate::error::{PolicyError, PolicyViolation};

// ── Defaults ─────────────────────────────────────────────────────────────────

/// Default trigger threshold, aligned with the classifier's search cutoff.
pub const DEFAULT_TRIGGER_THRESHOLD: f64 = crate::trigger::SEARCH_THRESHOLD;
pub const DEFAULT_MAX_REPOS_TO_EVALUATE: usize = 5;
pub const DEFAULT_MAX_AUTO_INSTALL_DEPS: usize = 3;

fn default_ask_for_permissions() -> Vec<String> {
    vec!["global_install".to_string(), "sudo".to_string()]
}

// ── IntegrationMode ──────────────────────────────────────────────────────────

/// How much autonomy the agent has when acting on a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntegrationMode {
    /// Integrate adoptable candidates without asking, within policy bounds.
    #[default]
    Autonomous,
    /// Surface recommendations only; never act.
    Recommend,
    /// Require confirmation before acting on anything.
    Ask,
}

// ── ScoutPolicyConfig ────────────────────────────────────────────────────────

/// Autonomy policy for the scout engine, parsed once per session and treated
/// as read-only thereafter.
///
/// [`ScoutPolicyConfig::parse`] is the only way in from raw data; an invalid
/// document is rejected as a whole, never partially applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutPolicyConfig {
    pub integration_mode: IntegrationMode,
    /// Minimum trigger confidence before candidates are fetched at all.
    pub trigger_threshold: f64,
    /// Upper bound on candidates passed to batch evaluation.
    pub max_repos_to_evaluate: usize,
    /// Proceed autonomously even when the evaluation carries risk warnings.
    pub allow_security_warnings: bool,
    /// Upper bound on dependencies installed without confirmation.
    pub max_auto_install_deps: usize,
    /// Operations that always require explicit confirmation, in every mode.
    pub ask_for_permissions: Vec<String>,
}

impl Default for ScoutPolicyConfig {
    fn default() -> Self {
        Self {
            integration_mode: IntegrationMode::default(),
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            max_repos_to_evaluate: DEFAULT_MAX_REPOS_TO_EVALUATE,
            allow_security_warnings: false,
            max_auto_install_deps: DEFAULT_MAX_AUTO_INSTALL_DEPS,
            ask_for_permissions: default_ask_for_permissions(),
        }
    }
}

/// Look a field up under its snake_case name or its camelCase alias.
/// Explicit nulls count as missing.
fn field<'a>(raw: &'a Value, snake: &'static str, camel: &'static str) -> Option<&'a Value> {
    raw.get(snake)
        .or_else(|| raw.get(camel))
        .filter(|v| !v.is_null())
}

impl ScoutPolicyConfig {
    /// Validate a raw policy document.
    ///
    /// Unknown fields are ignored and missing fields take the documented
    /// defaults. Every violated field is reported in one pass, so a caller
    /// sees the full repair list rather than the first failure.
    pub fn parse(raw: &Value) -> Result<Self, PolicyError> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        if !raw.is_object() {
            return Err(PolicyError::Invalid(vec![PolicyViolation::new(
                "policy",
                "document must be a JSON object or TOML table",
            )]));
        }

        let mut violations = Vec::new();
        let mut config = Self::default();

        if let Some(v) = field(raw, "integration_mode", "integrationMode") {
            match v.as_str() {
                Some(s) => match s.to_lowercase().as_str() {
                    "autonomous" => config.integration_mode = IntegrationMode::Autonomous,
                    "recommend" => config.integration_mode = IntegrationMode::Recommend,
                    "ask" => config.integration_mode = IntegrationMode::Ask,
                    other => violations.push(PolicyViolation::new(
                        "integration_mode",
                        format!("must be one of autonomous, recommend, ask (got \"{other}\")"),
                    )),
                },
                None => {
                    violations.push(PolicyViolation::new("integration_mode", "must be a string"));
                }
            }
        }

        if let Some(v) = field(raw, "trigger_threshold", "triggerThreshold") {
            match v.as_f64() {
                Some(t) if (0.0..=1.0).contains(&t) => config.trigger_threshold = t,
                Some(t) => violations.push(PolicyViolation::new(
                    "trigger_threshold",
                    format!("must be within [0, 1], got {t}"),
                )),
                None => {
                    violations.push(PolicyViolation::new("trigger_threshold", "must be a number"));
                }
            }
        }

        if let Some(v) = field(raw, "max_repos_to_evaluate", "maxReposToEvaluate") {
            match v.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(n) if n > 0 => config.max_repos_to_evaluate = n,
                _ => violations.push(PolicyViolation::new(
                    "max_repos_to_evaluate",
                    "must be a positive integer",
                )),
            }
        }

        if let Some(v) = field(raw, "allow_security_warnings", "allowSecurityWarnings") {
            match v.as_bool() {
                Some(b) => config.allow_security_warnings = b,
                None => violations.push(PolicyViolation::new(
                    "allow_security_warnings",
                    "must be a boolean",
                )),
            }
        }

        if let Some(v) = field(raw, "max_auto_install_deps", "maxAutoInstallDeps") {
            match v.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(n) if n > 0 => config.max_auto_install_deps = n,
                _ => violations.push(PolicyViolation::new(
                    "max_auto_install_deps",
                    "must be a positive integer",
                )),
            }
        }

        if let Some(v) = field(raw, "ask_for_permissions", "askForPermissions") {
            match v.as_array() {
                Some(items) => {
                    let mut operations: Vec<String> = Vec::new();
                    for item in items {
                        match item.as_str() {
                            Some(s) if !s.trim().is_empty() => {
                                let op = s.trim().to_string();
                                if !operations.contains(&op) {
                                    operations.push(op);
                                }
                            }
                            _ => violations.push(PolicyViolation::new(
                                "ask_for_permissions",
                                "entries must be non-empty strings",
                            )),
                        }
                    }
                    config.ask_for_permissions = operations;
                }
                None => violations.push(PolicyViolation::new(
                    "ask_for_permissions",
                    "must be an array of strings",
                )),
            }
        }

        if violations.is_empty() {
            debug!(
                mode = %config.integration_mode,
                threshold = config.trigger_threshold,
                "Scout policy accepted"
            );
            Ok(config)
        } else {
            Err(PolicyError::Invalid(violations))
        }
    }

    /// Parse a JSON policy document.
    pub fn from_json_str(raw: &str) -> Result<Self, PolicyError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::parse(&value)
    }

    /// Parse a TOML policy document. The table is normalized to JSON values
    /// so both formats share one validation path.
    pub fn from_toml_str(raw: &str) -> Result<Self, PolicyError> {
        let table: toml::Value = toml::from_str(raw)?;
        let value = serde_json::to_value(table)?;
        Self::parse(&value)
    }

    /// Load a policy file, dispatching on the extension.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            Some("toml") => Self::from_toml_str(&raw),
            _ => Err(PolicyError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
