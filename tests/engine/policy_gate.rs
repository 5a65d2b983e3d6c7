use std::fs;

use chrono::{Duration, Utc};
use starscout::error::PolicyError;
use starscout::policy::gating::{self, Disposition};
use starscout::{
    EvaluationContext, GithubRepo, IntegrationMode, ScoutPolicyConfig, analyze, evaluate,
};
use tempfile::TempDir;

fn write_policy(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn adoptable_evaluation() -> starscout::StarEvaluation {
    let now = Utc::now();
    let repo = GithubRepo {
        full_name: "acme/oauth-rs".into(),
        description: Some("OAuth client".into()),
        url: "https://github.com/acme/oauth-rs".into(),
        stars: 40_000,
        forks: 3_000,
        language: Some("Rust".into()),
        license: Some("MIT".into()),
        topics: vec!["oauth".into()],
        pushed_at: now - Duration::days(2),
        created_at: now - Duration::days(1_500),
        open_issues_count: 20,
        archived: false,
        homepage: None,
    };
    let context = EvaluationContext::new("Add OAuth authentication")
        .with_keywords(vec!["oauth".into()])
        .with_technology("rust");
    evaluate(&repo, &context)
}

#[test]
fn toml_policy_file_loads_and_validates() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(
        &dir,
        "policy.toml",
        r#"
integration_mode = "recommend"
trigger_threshold = 0.75
max_repos_to_evaluate = 10
allow_security_warnings = true
ask_for_permissions = ["sudo", "global_install", "write_system_path"]
"#,
    );

    let policy = ScoutPolicyConfig::load(&path).unwrap();
    assert_eq!(policy.integration_mode, IntegrationMode::Recommend);
    assert!((policy.trigger_threshold - 0.75).abs() < f64::EPSILON);
    assert_eq!(policy.max_repos_to_evaluate, 10);
    assert!(policy.allow_security_warnings);
    assert_eq!(policy.ask_for_permissions.len(), 3);
}

#[test]
fn json_policy_file_loads_with_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(
        &dir,
        "policy.json",
        r#"{ "integrationMode": "ask", "triggerThreshold": 0.9 }"#,
    );

    let policy = ScoutPolicyConfig::load(&path).unwrap();
    assert_eq!(policy.integration_mode, IntegrationMode::Ask);
    assert!((policy.trigger_threshold - 0.9).abs() < f64::EPSILON);
    // Untouched fields keep their documented defaults.
    assert_eq!(policy.max_repos_to_evaluate, 5);
}

#[test]
fn invalid_policy_file_reports_every_violation_and_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(
        &dir,
        "policy.json",
        r#"{ "integrationMode": "invalid_mode", "triggerThreshold": 2.0 }"#,
    );

    let err = ScoutPolicyConfig::load(&path).unwrap_err();
    match err {
        PolicyError::Invalid(violations) => {
            assert_eq!(violations.len(), 2);
            let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
            assert!(fields.contains(&"integration_mode"));
            assert!(fields.contains(&"trigger_threshold"));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn unsupported_policy_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_policy(&dir, "policy.yaml", "integration_mode: ask");

    let err = ScoutPolicyConfig::load(&path).unwrap_err();
    assert!(matches!(err, PolicyError::UnsupportedFormat(_)));
}

#[test]
fn trigger_gate_combines_classifier_and_policy() {
    let policy = ScoutPolicyConfig::default();

    let strong = analyze("Add OAuth authentication", None);
    assert!(gating::passes_trigger(&policy, &strong));

    let weak = analyze("Fix a typo in the README", None);
    assert!(!gating::passes_trigger(&policy, &weak));

    let strict = ScoutPolicyConfig {
        trigger_threshold: 0.99,
        ..ScoutPolicyConfig::default()
    };
    assert!(!gating::passes_trigger(&strict, &strong));
}

#[test]
fn privileged_install_requires_confirmation_end_to_end() {
    let evaluation = adoptable_evaluation();
    let policy = ScoutPolicyConfig::default();

    let verdict = gating::disposition(
        &policy,
        &evaluation,
        &["global_install".to_string(), "add_dependency".to_string()],
    );
    assert_eq!(
        verdict,
        Disposition::Confirm {
            operations: vec!["global_install".to_string()]
        }
    );

    let unprivileged = gating::disposition(&policy, &evaluation, &["add_dependency".to_string()]);
    assert_eq!(unprivileged, Disposition::Proceed);
}

#[test]
fn recommend_mode_never_acts_on_adoptable_candidates() {
    let evaluation = adoptable_evaluation();
    let policy = ScoutPolicyConfig {
        integration_mode: IntegrationMode::Recommend,
        ..ScoutPolicyConfig::default()
    };

    let verdict = gating::disposition(&policy, &evaluation, &[]);
    assert_eq!(verdict, Disposition::Report);
}
