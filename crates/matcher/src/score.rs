//! Similarity scoring between two free-text place names.
//!
//! The score blends three signals computed over the prefix-stripped forms:
//!
//! | Signal | Weight | Captures |
//! |--------|--------|----------|
//! | Edit distance | 0.3 | typos, missing letters |
//! | Word overlap | 0.4 | a ward name inside a longer address fragment |
//! | Containment | 0.3 | one name fully inside the other |
//!
//! Two shortcuts run first: equal prefix-preserving forms score
//! [`EXACT_MATCH_SCORE`], equal prefix-stripped forms score
//! [`PREFIX_INSENSITIVE_SCORE`].

use std::collections::HashSet;

use canonical::{words, Normalizer};
use once_cell::sync::OnceCell;

use crate::levenshtein::levenshtein_distance;
use crate::types::{ScoreBreakdown, ScoreKind};

pub const EXACT_MATCH_SCORE: f64 = 1.0;
pub const PREFIX_INSENSITIVE_SCORE: f64 = 0.95;

pub const EDIT_DISTANCE_WEIGHT: f64 = 0.3;
pub const WORD_OVERLAP_WEIGHT: f64 = 0.4;
pub const CONTAINMENT_WEIGHT: f64 = 0.3;

/// `1 - distance / max_len`, or `0.0` when both strings are empty.
pub fn edit_distance_score(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Shared words divided by the word count of the smaller side.
///
/// Words are compared as sets, so a repeated word counts once on both sides
/// and the result stays within `[0, 1]`. Returns `0.0` if either side has no
/// words.
pub fn word_overlap_score(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = words(a).into_iter().collect();
    let right: HashSet<&str> = words(b).into_iter().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    shared as f64 / left.len().min(right.len()) as f64
}

/// `len(shorter) / len(longer)` if one string contains the other, else `0.0`.
pub fn containment_score(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let longer_len = longer.chars().count();
    if longer_len == 0 || !longer.contains(shorter) {
        return 0.0;
    }
    shorter.chars().count() as f64 / longer_len as f64
}

/// Scores string pairs with a fixed normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorer {
    normalizer: Normalizer,
}

impl Scorer {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Similarity in `[0, 1]`.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.breakdown(a, b).score
    }

    /// Similarity together with the rule and components that produced it.
    pub fn breakdown(&self, a: &str, b: &str) -> ScoreBreakdown {
        if a.is_empty() || b.is_empty() {
            return ScoreBreakdown::shortcut(ScoreKind::Empty, 0.0);
        }

        if self.normalizer.with_prefix(a) == self.normalizer.with_prefix(b) {
            return ScoreBreakdown::shortcut(ScoreKind::Exact, EXACT_MATCH_SCORE);
        }

        let a = self.normalizer.no_prefix(a);
        let b = self.normalizer.no_prefix(b);
        if a == b {
            return ScoreBreakdown::shortcut(ScoreKind::PrefixInsensitive, PREFIX_INSENSITIVE_SCORE);
        }

        let edit_distance = edit_distance_score(&a, &b);
        let word_overlap = word_overlap_score(&a, &b);
        let containment = containment_score(&a, &b);
        let score = EDIT_DISTANCE_WEIGHT * edit_distance
            + WORD_OVERLAP_WEIGHT * word_overlap
            + CONTAINMENT_WEIGHT * containment;

        ScoreBreakdown {
            kind: ScoreKind::Weighted,
            edit_distance,
            word_overlap,
            containment,
            score,
        }
    }
}

pub(crate) fn default_scorer() -> &'static Scorer {
    static SCORER: OnceCell<Scorer> = OnceCell::new();
    SCORER.get_or_init(Scorer::default)
}

/// Similarity between two free-text names using the default normalizer.
///
/// ```
/// use matcher::similarity_score;
///
/// assert_eq!(similarity_score("Ha Noi", "Hà Nội"), 1.0);
/// assert_eq!(similarity_score("TP. Hồ Chí Minh", "Hồ Chí Minh"), 0.95);
/// assert_eq!(similarity_score("", "Hà Nội"), 0.0);
/// ```
pub fn similarity_score(a: &str, b: &str) -> f64 {
    default_scorer().score(a, b)
}

/// [`similarity_score`] for values that may be absent; `None` scores `0.0`.
pub fn score_optional(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => similarity_score(a, b),
        _ => 0.0,
    }
}

/// [`Scorer::breakdown`] with the default normalizer.
pub fn score_breakdown(a: &str, b: &str) -> ScoreBreakdown {
    default_scorer().breakdown(a, b)
}
