use starscout::{TriggerCategory, analyze};

#[test]
fn security_keywords_trigger_a_search_with_queries() {
    let decision = analyze(
        "Implement OAuth authentication with JWT tokens for SSO login",
        Some("rust"),
    );

    assert!(decision.should_search);
    assert!(decision.confidence >= 0.85);
    assert!(decision.confidence <= 1.0);
    assert_eq!(decision.category, TriggerCategory::High);

    for keyword in ["oauth", "jwt", "sso"] {
        assert!(
            decision.matched_keywords.contains(&keyword.to_string()),
            "missing {keyword}"
        );
    }

    assert!(!decision.suggested_queries.is_empty());
    assert!(decision.suggested_queries.len() <= 4);
    assert!(
        decision
            .suggested_queries
            .iter()
            .any(|q| q.contains("rust")),
        "technology hint missing from queries: {:?}",
        decision.suggested_queries
    );
}

#[test]
fn maintenance_chatter_never_triggers_a_search() {
    for task in [
        "Fix a small bug in the component",
        "Correct a typo in the docs",
        "Cleanup after the refactor",
        "Track down the syntax error in main",
    ] {
        let decision = analyze(task, None);
        assert!(!decision.should_search, "{task}");
        assert!(decision.confidence < 0.6, "{task}");
        assert!(decision.suggested_queries.is_empty(), "{task}");
    }
}

#[test]
fn classifier_is_total_over_arbitrary_input() {
    let long = "word ".repeat(10_000);
    for task in [
        "",
        "   \t\n  ",
        "ユニコード入力でも壊れない",
        "a",
        "!!!???///",
        long.as_str(),
    ] {
        let decision = analyze(task, Some(""));
        assert!((0.0..=1.0).contains(&decision.confidence));
        assert_eq!(decision.should_search, decision.confidence >= 0.6);
    }
}

#[test]
fn decision_serializes_with_lowercase_categories() {
    let decision = analyze("Build a CLI dashboard", None);
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["category"], "high");
    assert!(json["should_search"].as_bool().unwrap());
    assert!(json["matched_keywords"].is_array());
}
