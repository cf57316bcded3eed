use std::fmt;

use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{BEST_MATCH_THRESHOLD, LEGACY_COMPARE_THRESHOLD};

/// Identifier of a candidate as delivered by the upstream catalog.
///
/// Location services hand out numeric ids while order-source lists sometimes
/// use strings, so both are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Number(n) => write!(f, "{n}"),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(value: i64) -> Self {
        CandidateId::Number(value)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        CandidateId::Text(value.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        CandidateId::Text(value)
    }
}

/// A selectable location or order-source entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    /// Display name; a missing name on the wire deserializes as empty and
    /// therefore never matches.
    #[serde(default)]
    pub name: String,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The accepted winner of a best-match search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub candidate: Candidate,
    /// Similarity in `[0, 1]`.
    pub score: f64,
}

/// Which rule produced a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// One of the inputs was empty.
    Empty,
    /// Prefix-preserving forms were equal.
    Exact,
    /// Only the prefix-stripped forms were equal.
    PrefixInsensitive,
    /// Weighted blend of the three component scores.
    Weighted,
}

/// Component scores behind a single similarity value.
///
/// Components are only computed for [`ScoreKind::Weighted`]; the shortcut
/// kinds report them as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub kind: ScoreKind,
    pub edit_distance: f64,
    pub word_overlap: f64,
    pub containment: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub(crate) fn shortcut(kind: ScoreKind, score: f64) -> Self {
        Self {
            kind,
            edit_distance: 0.0,
            word_overlap: 0.0,
            containment: 0.0,
            score,
        }
    }
}

/// Acceptance thresholds for a [`Matcher`](crate::Matcher).
///
/// Both are strict: a score equal to the threshold is rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Minimum score (exclusive) for [`Matcher::best_match`](crate::Matcher::best_match).
    #[serde(default = "MatchConfig::default_best_match_threshold")]
    pub best_match_threshold: f64,
    /// Minimum score (exclusive) for [`Matcher::compare`](crate::Matcher::compare).
    #[serde(default = "MatchConfig::default_legacy_compare_threshold")]
    pub legacy_compare_threshold: f64,
}

impl MatchConfig {
    pub(crate) fn default_best_match_threshold() -> f64 {
        BEST_MATCH_THRESHOLD
    }

    pub(crate) fn default_legacy_compare_threshold() -> f64 {
        LEGACY_COMPARE_THRESHOLD
    }

    /// Both thresholds must be finite and lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (name, value) in [
            ("best_match_threshold", self.best_match_threshold),
            ("legacy_compare_threshold", self.legacy_compare_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            best_match_threshold: Self::default_best_match_threshold(),
            legacy_compare_threshold: Self::default_legacy_compare_threshold(),
        }
    }
}

/// Errors produced while building a [`Matcher`](crate::Matcher).
///
/// Scoring and selection themselves never fail.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("canonical error: {0}")]
    Canonical(#[from] CanonicalError),
}
