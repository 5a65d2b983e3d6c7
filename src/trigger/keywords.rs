//! Keyword tier tables for the trigger classifier.
//!
//! Three tiers, each an explicit `(keyword, base_confidence)` table so the
//! thresholds stay independently testable and tunable:
//! - High: well-solved, library-backed problem domains
//! - Medium: generic implementation/utility language
//! - Negative: small-fix language that argues against a library search

// ── Tier tables ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    High,
    Medium,
    Negative,
}

impl Tier {
    pub(crate) fn is_positive(self) -> bool {
        !matches!(self, Self::Negative)
    }
}

/// Security/auth keywords sit at the top of the range: mature, audited
/// libraries strongly dominate hand-rolled implementations there.
pub(crate) const HIGH_TIER: &[(&str, f64)] = &[
    ("oauth", 0.85),
    ("oauth2", 0.85),
    ("jwt", 0.85),
    ("sso", 0.85),
    ("encryption", 0.83),
    ("authentication", 0.82),
    ("cli", 0.80),
    ("parser", 0.80),
    ("orm", 0.80),
    ("chart", 0.80),
    ("visualization", 0.78),
    ("dashboard", 0.78),
    ("database", 0.78),
    ("websocket", 0.77),
    ("markdown", 0.77),
    ("pdf", 0.77),
    ("csv", 0.76),
];

pub(crate) const MEDIUM_TIER: &[(&str, f64)] = &[
    ("implement", 0.65),
    ("utility", 0.65),
    ("integration", 0.64),
    ("feature", 0.62),
    ("helper", 0.62),
    ("convert", 0.62),
    ("export", 0.60),
];

/// Matching only this tier keeps confidence below 0.5.
pub(crate) const NEGATIVE_TIER: &[(&str, f64)] = &[
    ("fix", 0.30),
    ("bug", 0.30),
    ("small", 0.25),
    ("cleanup", 0.25),
    ("typo", 0.20),
    ("syntax error", 0.20),
];

// ── Scanning ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) struct KeywordHit {
    pub keyword: &'static str,
    pub base: f64,
    pub tier: Tier,
}

/// Scan a task description against all three tiers.
///
/// Hits come back in table order, high tier first, which keeps downstream
/// ordering (matched keywords, suggested queries) deterministic.
pub(crate) fn scan(description: &str) -> Vec<KeywordHit> {
    let haystack = description.to_lowercase();
    let mut hits = Vec::new();

    let mut scan_tier = |table: &[(&'static str, f64)], tier: Tier| {
        for &(keyword, base) in table {
            if contains_word(&haystack, keyword) {
                hits.push(KeywordHit {
                    keyword,
                    base,
                    tier,
                });
            }
        }
    };

    scan_tier(HIGH_TIER, Tier::High);
    scan_tier(MEDIUM_TIER, Tier::Medium);
    scan_tier(NEGATIVE_TIER, Tier::Negative);

    hits
}

/// Word-boundary containment check. Multi-word keywords match as phrases.
pub(crate) fn contains_word(haystack: &str, word: &str) -> bool {
    for (i, _) in haystack.match_indices(word) {
        let before_ok = i == 0 || !haystack.as_bytes()[i - 1].is_ascii_alphanumeric();
        let after = i + word.len();
        let after_ok =
            after >= haystack.len() || !haystack.as_bytes()[after].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
    }
    false
}
