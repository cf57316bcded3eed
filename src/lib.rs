//! Workspace umbrella crate for Vietnamese address matching.
//!
//! This crate stitches the normalizer (`canonical`), the scorer and
//! best-match selector (`matcher`) and the location cascade (`locations`)
//! together behind one YAML configuration, so callers can go from a
//! conversation extract to catalog ids with a single entry point.

pub mod config;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, Normalizer, PrefixMode, normalize_no_prefix,
    normalize_with_prefix,
};
pub use config::{AddrMatchConfig, ConfigLoadError, LoggingConfig};
pub use locations::{
    AddressResolver, CacheConfig, CachedSource, ConversationExtract, LocationError,
    LocationSource, LocationTier, OrderSourceProvider, ResolvedAddress, StaticCatalog, TtlCache,
    fetch_order_source, resolve_order_source, resolve_order_source_with,
};
pub use matcher::{
    BEST_MATCH_THRESHOLD, BestMatch, Candidate, CandidateId, LEGACY_COMPARE_THRESHOLD,
    MatchConfig, MatchError, Matcher, ScoreBreakdown, ScoreKind, Scorer, compare_address,
    find_best_match, find_best_match_with, rank_candidates, score_breakdown, similarity_score,
};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything resolved from one conversation extract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub address: ResolvedAddress,
    pub order_source: Option<BestMatch>,
}

/// Build a cascade resolver with the configured matcher and a TTL cache in
/// front of `source`.
pub fn cached_resolver<S: LocationSource>(
    config: &AddrMatchConfig,
    source: S,
) -> Result<AddressResolver<CachedSource<S>>, ConfigLoadError> {
    let matcher = config.build_matcher()?;
    let cached = CachedSource::new(source, &config.cache)?;
    Ok(AddressResolver::with_matcher(cached, matcher))
}

/// Resolve the address cascade and the order source for one extract.
///
/// Both use the resolver's matcher, so configured thresholds and prefix
/// mode apply to order sources too.
pub async fn resolve_conversation<S, P>(
    resolver: &AddressResolver<S>,
    order_sources: &P,
    extract: &ConversationExtract,
) -> Result<Resolution, LocationError>
where
    S: LocationSource,
    P: OrderSourceProvider + ?Sized,
{
    let address = resolver.resolve(extract).await?;
    let order_source = fetch_order_source(order_sources, resolver.matcher(), extract).await?;
    info!(
        city = address.city.is_some(),
        district = address.district.is_some(),
        ward = address.ward.is_some(),
        order_source = order_source.is_some(),
        "conversation_resolved"
    );
    Ok(Resolution {
        address,
        order_source,
    })
}
