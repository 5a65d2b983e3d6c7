use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use starscout::evaluate::evaluate_all_at;
use starscout::{
    EvaluationContext, GithubRepo, Recommendation, ScoutPolicyConfig, ScoutReport, analyze,
};

fn now() -> DateTime<Utc> {
    "2026-03-01T00:00:00Z".parse().unwrap()
}

fn candidate(full_name: &str, stars: u64, days_since_push: i64, archived: bool) -> GithubRepo {
    let value = json!({
        "full_name": full_name,
        "description": "OAuth 2.0 client with JWT support",
        "html_url": format!("https://github.com/{full_name}"),
        "stargazers_count": stars,
        "forks_count": stars / 12,
        "language": "Rust",
        "license": { "spdx_id": "Apache-2.0" },
        "topics": ["oauth", "jwt"],
        "pushed_at": (now() - Duration::days(days_since_push)).to_rfc3339(),
        "created_at": (now() - Duration::days(2_000)).to_rfc3339(),
        "open_issues": 30,
        "archived": archived
    });
    serde_json::from_value(value).unwrap()
}

fn context() -> EvaluationContext {
    let task = "Add OAuth authentication with JWT tokens";
    let decision = analyze(task, Some("rust"));
    EvaluationContext::new(task)
        .with_keywords(decision.matched_keywords)
        .with_technology("rust")
}

#[test]
fn batch_ranking_orders_by_total_descending() {
    let repos = vec![
        candidate("acme/small", 50, 5, false),
        candidate("acme/huge", 50_000, 5, false),
        candidate("acme/mid", 5_000, 5, false),
    ];

    let ranked = evaluate_all_at(&repos, &context(), now());

    let names: Vec<&str> = ranked.iter().map(|e| e.repo.full_name.as_str()).collect();
    assert_eq!(names, ["acme/huge", "acme/mid", "acme/small"]);

    for pair in ranked.windows(2) {
        assert!(pair[0].total_score >= pair[1].total_score);
    }
}

#[test]
fn archived_candidates_sink_to_avoid_even_when_popular() {
    let repos = vec![
        candidate("acme/alive", 8_000, 10, false),
        candidate("acme/archived", 60_000, 10, true),
    ];

    let ranked = evaluate_all_at(&repos, &context(), now());

    let archived = ranked
        .iter()
        .find(|e| e.repo.full_name == "acme/archived")
        .unwrap();
    assert_eq!(archived.recommendation, Recommendation::Avoid);
    assert!(archived.risk_score <= 2.0);
}

#[test]
fn stale_candidates_score_low_on_time() {
    let ranked = evaluate_all_at(
        &[
            candidate("acme/fresh", 5_000, 3, false),
            candidate("acme/stale", 5_000, 800, false),
        ],
        &context(),
        now(),
    );

    assert_eq!(ranked[0].repo.full_name, "acme/fresh");
    assert!(ranked[0].time_score >= 9.0);
    let stale = &ranked[1];
    assert!(stale.time_score < 3.0);
}

#[test]
fn ranking_is_deterministic() {
    let repos = vec![
        candidate("acme/a", 2_000, 20, false),
        candidate("acme/b", 2_000, 20, false),
        candidate("acme/c", 9_000, 2, false),
    ];

    let first = evaluate_all_at(&repos, &context(), now());
    let second = evaluate_all_at(&repos, &context(), now());

    let order = |evals: &[starscout::StarEvaluation]| {
        evals
            .iter()
            .map(|e| e.repo.full_name.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&first), order(&second));

    // Stable sort: the tied pair keeps its input order.
    assert_eq!(order(&first), ["acme/c", "acme/a", "acme/b"]);
}

#[test]
fn report_assembles_the_whole_pass() {
    let task = "Add OAuth authentication with JWT tokens";
    let decision = analyze(task, Some("rust"));
    let evaluations = evaluate_all_at(
        &[candidate("acme/oauth-rs", 30_000, 2, false)],
        &context(),
        now(),
    );

    let report = ScoutReport::new(task, decision, evaluations, ScoutPolicyConfig::default());

    let top = report.top().unwrap();
    assert_eq!(top.repo.full_name, "acme/oauth-rs");
    assert_eq!(top.recommendation, Recommendation::Adopt);

    let text = report.render_text();
    assert!(text.contains("acme/oauth-rs"));
    assert!(text.contains("adopt"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["evaluations"][0]["recommendation"], "adopt");
    assert!(json["policy"]["trigger_threshold"].as_f64().unwrap() > 0.0);
}
