//! # Address Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` scores how similar two free-text place names are and picks the
//! best entry from a candidate list. It sits on top of `canonical`, which
//! produces the two comparison forms (with and without administrative
//! prefixes) for every input.
//!
//! A typical caller holds the city, district or ward list for one tier,
//! extracts a user-supplied name from a conversation, and asks for the best
//! candidate. A `None` result means "leave the field blank".
//!
//! ## Scoring
//!
//! 1. Either input empty: `0.0`.
//! 2. Prefix-preserving forms equal: `1.0`.
//! 3. Prefix-stripped forms equal: `0.95`.
//! 4. Otherwise `0.3 * edit + 0.4 * overlap + 0.3 * containment` over the
//!    prefix-stripped forms. See [`score`] for the components.
//!
//! ## Core Types
//!
//! - [`Candidate`]: `{id, name}` entry; ids may be numbers or strings.
//! - [`BestMatch`]: the accepted candidate and its score.
//! - [`Scorer`]: similarity function bound to one [`canonical::Normalizer`].
//! - [`Matcher`]: scorer plus [`MatchConfig`] thresholds.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{compare_address, find_best_match, Candidate};
//!
//! let cities = vec![
//!     Candidate::new(1, "Hà Nội"),
//!     Candidate::new(2, "Hồ Chí Minh"),
//! ];
//! let hit = find_best_match(&cities, "tp hà nội").expect("match");
//! assert_eq!(hit.candidate.id, 1.into());
//! assert!(hit.score >= 0.95);
//!
//! assert!(!compare_address("Hoàn Kiếm", "Kiếm"));
//! ```
//!
//! ## Observability
//!
//! Every [`Matcher::best_match`] call emits a `tracing` debug event. Install a
//! [`MatchMetrics`] implementation via [`set_match_metrics`] to also record
//! latency and acceptance per search.

pub mod engine;
pub mod levenshtein;
pub mod metrics;
pub mod score;
pub mod types;

pub use crate::engine::{
    compare_address, find_best_match, find_best_match_with, rank_candidates, Matcher,
    BEST_MATCH_THRESHOLD, LEGACY_COMPARE_THRESHOLD,
};
pub use crate::levenshtein::levenshtein_distance;
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::score::{
    containment_score, edit_distance_score, score_breakdown, score_optional, similarity_score,
    word_overlap_score, Scorer, EXACT_MATCH_SCORE, PREFIX_INSENSITIVE_SCORE,
};
pub use crate::types::{
    BestMatch, Candidate, CandidateId, MatchConfig, MatchError, ScoreBreakdown, ScoreKind,
};
