use super::*;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use canonical::PrefixMode;

use crate::metrics::{set_match_metrics, MatchMetrics};
use crate::types::CandidateId;

fn districts() -> Vec<Candidate> {
    vec![Candidate::new(1, "Quận 1"), Candidate::new(2, "Quận 2")]
}

fn cities() -> Vec<Candidate> {
    vec![
        Candidate::new(1, "Hà Nội"),
        Candidate::new(2, "Hồ Chí Minh"),
        Candidate::new(3, "Đà Nẵng"),
    ]
}

#[test]
fn diacritic_free_query_finds_exact_district() {
    let hit = find_best_match(&districts(), "Quan 1").expect("match");
    assert_eq!(hit.candidate.id, CandidateId::Number(1));
    assert_eq!(hit.score, 1.0);
}

#[test]
fn unrelated_candidate_is_rejected() {
    let candidates = vec![Candidate::new(7, "Hoàn Kiếm")];
    assert!(find_best_match(&candidates, "Long Biên").is_none());
}

#[test]
fn prefixed_query_matches_bare_city_name() {
    let hit = find_best_match(&cities(), "tp hà nội").expect("match");
    assert_eq!(hit.candidate.id, CandidateId::Number(1));
    assert!(hit.score >= 0.95, "got {}", hit.score);
}

#[test]
fn ward_inside_longer_fragment() {
    let wards = vec![
        Candidate::new(10, "Bến Thành"),
        Candidate::new(11, "Bến Nghé"),
        Candidate::new(12, "Đa Kao"),
    ];
    let hit = find_best_match(&wards, "Phường Bến Nghé Quận 1").expect("match");
    assert_eq!(hit.candidate.id, CandidateId::Number(11));
}

#[test]
fn empty_inputs_yield_none() {
    assert!(find_best_match(&[], "Hà Nội").is_none());
    assert!(find_best_match(&cities(), "").is_none());
}

#[test]
fn nameless_candidate_never_matches() {
    let candidates = vec![Candidate::new(1, "")];
    assert!(find_best_match(&candidates, "Hà Nội").is_none());
}

#[test]
fn ties_keep_first_candidate() {
    let candidates = vec![
        Candidate::new("first", "Hà Nội"),
        Candidate::new("second", "Hà Nội"),
    ];
    let hit = find_best_match(&candidates, "Ha Noi").expect("match");
    assert_eq!(hit.candidate.id, CandidateId::from("first"));
}

#[test]
fn threshold_is_exclusive() {
    let scorer = Scorer::default();
    let candidates = vec![Candidate::new(1, "TP. Hồ Chí Minh")];
    assert!(find_best_match_with(&scorer, &candidates, "Hồ Chí Minh", 0.95).is_none());

    let hit = find_best_match_with(&scorer, &candidates, "Hồ Chí Minh", 0.94).expect("match");
    assert_eq!(hit.score, 0.95);
}

#[test]
fn legacy_compare_is_stricter_than_best_match() {
    assert!(!compare_address("Hoàn Kiếm", "Kiếm"));
    let candidates = vec![Candidate::new(1, "Hoàn Kiếm")];
    assert!(find_best_match(&candidates, "Kiếm").is_some());

    assert!(compare_address("Quận 1", "quan 1"));
    assert!(!compare_address("", ""));
}

#[test]
fn configured_threshold_applies() -> Result<(), MatchError> {
    let matcher = Matcher::new(
        &CanonicalizeConfig::default(),
        MatchConfig {
            best_match_threshold: 0.99,
            ..MatchConfig::default()
        },
    )?;
    assert!(matcher.best_match(&cities(), "tp hà nội").is_none());
    assert!(matcher.best_match(&cities(), "Ha Noi").is_some());
    Ok(())
}

#[test]
fn word_boundary_matcher_keeps_embedded_prefixes() -> Result<(), MatchError> {
    let matcher = Matcher::new(
        &CanonicalizeConfig {
            prefix_mode: PrefixMode::WordBoundary,
            ..CanonicalizeConfig::default()
        },
        MatchConfig::default(),
    )?;
    let candidates = vec![Candidate::new(1, "G")];
    assert!(find_best_match(&candidates, "Quảng").is_some());
    assert!(matcher.best_match(&candidates, "Quảng").is_none());
    Ok(())
}

#[test]
fn invalid_config_rejected() {
    let err = Matcher::new(
        &CanonicalizeConfig::default(),
        MatchConfig {
            best_match_threshold: -0.1,
            ..MatchConfig::default()
        },
    )
    .expect_err("negative threshold");
    assert!(matches!(err, MatchError::InvalidConfig(_)));

    let err = Matcher::new(
        &CanonicalizeConfig {
            version: 0,
            ..CanonicalizeConfig::default()
        },
        MatchConfig::default(),
    )
    .expect_err("version 0");
    assert!(matches!(err, MatchError::Canonical(_)));
}

#[test]
fn rank_orders_by_score_and_limits() {
    let ranked = rank_candidates(&cities(), "Ha Noi", 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].candidate.id, CandidateId::Number(1));
    assert_eq!(ranked[0].score, 1.0);
    assert!(ranked[0].score >= ranked[1].score);

    assert!(rank_candidates(&cities(), "Ha Noi", 0).is_empty());
    assert_eq!(rank_candidates(&cities(), "Ha Noi", 10).len(), 3);
}

#[test]
fn rank_is_stable_for_equal_scores() {
    let candidates = vec![
        Candidate::new(5, "Hà Nội"),
        Candidate::new(4, "Hà Nội"),
        Candidate::new(3, "Hà Nội"),
    ];
    let ids: Vec<CandidateId> = rank_candidates(&candidates, "Ha Noi", 3)
        .into_iter()
        .map(|hit| hit.candidate.id)
        .collect();
    assert_eq!(ids, vec![5.into(), 4.into(), 3.into()]);
}

struct RecordingMetrics {
    events: Arc<RwLock<Vec<(usize, bool)>>>,
}

impl RecordingMetrics {
    fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn snapshot(&self) -> Vec<(usize, bool)> {
        self.events.read().unwrap().clone()
    }
}

impl MatchMetrics for RecordingMetrics {
    fn record_match(&self, _latency: Duration, candidates: usize, accepted: bool) {
        self.events.write().unwrap().push((candidates, accepted));
    }
}

#[test]
fn metrics_recorder_observes_matches() {
    let metrics = Arc::new(RecordingMetrics::new());
    set_match_metrics(Some(metrics.clone()));

    // Distinctive candidate count so events from parallel tests are ignored.
    let mut candidates = cities();
    candidates.extend((0..14).map(|i| Candidate::new(100 + i, format!("Xã {i}"))));
    let matcher = Matcher::default();
    assert!(matcher.best_match(&candidates, "Ha Noi").is_some());
    assert!(matcher.best_match(&candidates, "Long Biên").is_none());

    let events = metrics.snapshot();
    assert!(events.contains(&(17, true)));
    assert!(events.contains(&(17, false)));

    set_match_metrics(None);
}
