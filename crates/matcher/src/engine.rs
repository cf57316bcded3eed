use std::time::Instant;

use canonical::{CanonicalizeConfig, Normalizer};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::metrics::metrics_recorder;
use crate::score::Scorer;
use crate::types::{BestMatch, Candidate, MatchConfig, MatchError};

#[cfg(test)]
mod tests;

/// Scores must be strictly above this for [`find_best_match`] to accept.
///
/// A wrong auto-filled address is worse than a blank field the user fills in.
pub const BEST_MATCH_THRESHOLD: f64 = 0.6;

/// Scores must be strictly above this for [`compare_address`] to agree.
pub const LEGACY_COMPARE_THRESHOLD: f64 = 0.7;

/// Best-match selector over `{id, name}` candidates.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    scorer: Scorer,
    config: MatchConfig,
}

impl Matcher {
    /// Build a matcher from explicit normalizer and threshold configs.
    pub fn new(canonical_cfg: &CanonicalizeConfig, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let normalizer = Normalizer::new(canonical_cfg)?;
        Ok(Self {
            scorer: Scorer::new(normalizer),
            config,
        })
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Highest-scoring candidate whose name beats the best-match threshold.
    ///
    /// Returns `None` for an empty query, an empty candidate list, or when no
    /// score is strictly above the threshold. On ties the earliest candidate
    /// wins.
    pub fn best_match(&self, candidates: &[Candidate], query: &str) -> Option<BestMatch> {
        if candidates.is_empty() || query.is_empty() {
            return None;
        }

        let start = Instant::now();
        let best = select_best(&self.scorer, candidates, query);
        let accepted = best
            .as_ref()
            .filter(|(_, score)| *score > self.config.best_match_threshold)
            .map(|(candidate, score)| BestMatch {
                candidate: (*candidate).clone(),
                score: *score,
            });

        match (&accepted, &best) {
            (Some(hit), _) => debug!(
                query,
                candidate_id = %hit.candidate.id,
                candidate_name = %hit.candidate.name,
                score = hit.score,
                "match_accepted"
            ),
            (None, Some((candidate, score))) => debug!(
                query,
                candidate_id = %candidate.id,
                score,
                threshold = self.config.best_match_threshold,
                "match_below_threshold"
            ),
            (None, None) => debug!(query, "match_none"),
        }

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(start.elapsed(), candidates.len(), accepted.is_some());
        }

        accepted
    }

    /// Whether two names are similar enough under the legacy threshold.
    pub fn compare(&self, a: &str, b: &str) -> bool {
        self.scorer.score(a, b) > self.config.legacy_compare_threshold
    }

    /// Every candidate scored against `query`, best first, at most `limit`.
    ///
    /// No threshold is applied. Equal scores keep input order.
    pub fn rank(&self, candidates: &[Candidate], query: &str, limit: usize) -> Vec<BestMatch> {
        let mut ranked: Vec<BestMatch> = candidates
            .iter()
            .map(|candidate| BestMatch {
                score: self.scorer.score(&candidate.name, query),
                candidate: candidate.clone(),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }
}

/// Top-scoring candidate regardless of threshold; first seen wins ties.
fn select_best<'a>(
    scorer: &Scorer,
    candidates: &'a [Candidate],
    query: &str,
) -> Option<(&'a Candidate, f64)> {
    let mut best: Option<(&Candidate, f64)> = None;
    for candidate in candidates {
        let score = scorer.score(&candidate.name, query);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best
}

fn default_matcher() -> &'static Matcher {
    static MATCHER: OnceCell<Matcher> = OnceCell::new();
    MATCHER.get_or_init(Matcher::default)
}

/// Best candidate for `query` with the default normalizer and
/// [`BEST_MATCH_THRESHOLD`].
///
/// ```
/// use matcher::{find_best_match, Candidate};
///
/// let districts = vec![Candidate::new(1, "Quận 1"), Candidate::new(2, "Quận 2")];
/// let hit = find_best_match(&districts, "Quan 1").expect("match");
/// assert_eq!(hit.candidate.id, 1.into());
///
/// assert!(find_best_match(&[], "anything").is_none());
/// ```
pub fn find_best_match(candidates: &[Candidate], query: &str) -> Option<BestMatch> {
    default_matcher().best_match(candidates, query)
}

/// Best candidate for `query` with a caller-supplied scorer and threshold.
pub fn find_best_match_with(
    scorer: &Scorer,
    candidates: &[Candidate],
    query: &str,
    threshold: f64,
) -> Option<BestMatch> {
    if candidates.is_empty() || query.is_empty() {
        return None;
    }
    select_best(scorer, candidates, query)
        .filter(|(_, score)| *score > threshold)
        .map(|(candidate, score)| BestMatch {
            candidate: candidate.clone(),
            score,
        })
}

/// `true` when the two names score strictly above
/// [`LEGACY_COMPARE_THRESHOLD`].
pub fn compare_address(a: &str, b: &str) -> bool {
    default_matcher().compare(a, b)
}

/// [`Matcher::rank`] with the default matcher.
pub fn rank_candidates(candidates: &[Candidate], query: &str, limit: usize) -> Vec<BestMatch> {
    default_matcher().rank(candidates, query, limit)
}
