use matcher::{find_best_match, BestMatch, Candidate, CandidateId, Matcher};
use tracing::{debug, warn};

use crate::error::LocationError;
use crate::source::{LocationSource, OrderSourceProvider};
use crate::types::{ConversationExtract, LocationTier, ResolvedAddress};

/// Runs the city → district → ward cascade against a [`LocationSource`].
#[derive(Debug)]
pub struct AddressResolver<S> {
    source: S,
    matcher: Matcher,
}

impl<S: LocationSource> AddressResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_matcher(source, Matcher::default())
    }

    pub fn with_matcher(source: S, matcher: Matcher) -> Self {
        Self { source, matcher }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Match the extracted province, district and ward in order.
    ///
    /// Each tier is looked up under the id matched one level up. The cascade
    /// stops at the first tier whose name is absent or matches nothing, and
    /// the remaining tiers stay `None`. Only data-source failures are errors.
    pub async fn resolve(
        &self,
        extract: &ConversationExtract,
    ) -> Result<ResolvedAddress, LocationError> {
        let mut resolved = ResolvedAddress::default();

        let Some(city) = self
            .match_tier(LocationTier::City, None, extract.customer_province.as_deref())
            .await?
        else {
            return Ok(resolved);
        };
        let city_id = city.candidate.id.clone();
        resolved.city = Some(city);

        let Some(district) = self
            .match_tier(
                LocationTier::District,
                Some(&city_id),
                extract.customer_district.as_deref(),
            )
            .await?
        else {
            return Ok(resolved);
        };
        let district_id = district.candidate.id.clone();
        resolved.district = Some(district);

        resolved.ward = self
            .match_tier(
                LocationTier::Ward,
                Some(&district_id),
                extract.customer_ward.as_deref(),
            )
            .await?;
        Ok(resolved)
    }

    async fn match_tier(
        &self,
        tier: LocationTier,
        parent_id: Option<&CandidateId>,
        query: Option<&str>,
    ) -> Result<Option<BestMatch>, LocationError> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            debug!(%tier, "tier_query_absent");
            return Ok(None);
        };

        let candidates = self
            .source
            .locations(tier, parent_id)
            .await
            .inspect_err(|err| warn!(%tier, error = %err, "location_source_failed"))?;

        let hit = self.matcher.best_match(&candidates, query);
        if hit.is_none() {
            debug!(%tier, query, candidates = candidates.len(), "tier_unmatched");
        }
        Ok(hit)
    }
}

fn order_source_queries(extract: &ConversationExtract) -> impl Iterator<Item = &str> {
    [extract.source_order.as_deref(), extract.name_page.as_deref()]
        .into_iter()
        .flatten()
}

/// Pick the order source named in a conversation.
///
/// `source_order` is tried first; if it is absent or matches nothing,
/// `name_page` (the page the conversation came through) is tried instead.
pub fn resolve_order_source(
    sources: &[Candidate],
    extract: &ConversationExtract,
) -> Option<BestMatch> {
    order_source_queries(extract).find_map(|query| find_best_match(sources, query))
}

/// [`resolve_order_source`] with a custom matcher.
pub fn resolve_order_source_with(
    matcher: &Matcher,
    sources: &[Candidate],
    extract: &ConversationExtract,
) -> Option<BestMatch> {
    order_source_queries(extract).find_map(|query| matcher.best_match(sources, query))
}

/// Fetch the order sources and resolve against them with `matcher`.
///
/// The provider is not called when the extract names no source at all.
pub async fn fetch_order_source<P>(
    provider: &P,
    matcher: &Matcher,
    extract: &ConversationExtract,
) -> Result<Option<BestMatch>, LocationError>
where
    P: OrderSourceProvider + ?Sized,
{
    if order_source_queries(extract).next().is_none() {
        return Ok(None);
    }
    let sources = provider
        .order_sources()
        .await
        .inspect_err(|err| warn!(error = %err, "order_source_fetch_failed"))?;
    Ok(resolve_order_source_with(matcher, &sources, extract))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::CanonicalizeConfig;
    use matcher::MatchConfig;

    fn extract(source_order: Option<&str>, name_page: Option<&str>) -> ConversationExtract {
        ConversationExtract {
            source_order: source_order.map(str::to_string),
            name_page: name_page.map(str::to_string),
            ..ConversationExtract::default()
        }
    }

    fn sources() -> Vec<Candidate> {
        vec![
            Candidate::new("fb", "Facebook"),
            Candidate::new("zalo", "Zalo"),
            Candidate::new("shop", "Shop Mẹ Bầu"),
        ]
    }

    #[test]
    fn source_order_preferred() {
        let hit = resolve_order_source(&sources(), &extract(Some("zalo"), Some("Facebook")))
            .expect("match");
        assert_eq!(hit.candidate.id, CandidateId::from("zalo"));
    }

    #[test]
    fn configured_matcher_rejects_partial_source_order() {
        let strict = Matcher::new(
            &CanonicalizeConfig::default(),
            MatchConfig {
                best_match_threshold: 0.9,
                ..MatchConfig::default()
            },
        )
        .expect("valid config");
        let conversation = extract(Some("Shop Me"), Some("Facebook"));

        // "shop me" scores about 0.78 against "shop me bau".
        let lenient = resolve_order_source(&sources(), &conversation).expect("match");
        assert_eq!(lenient.candidate.id, CandidateId::from("shop"));

        let hit = resolve_order_source_with(&strict, &sources(), &conversation).expect("match");
        assert_eq!(hit.candidate.id, CandidateId::from("fb"));
        assert_eq!(hit.score, 1.0);

        assert!(resolve_order_source_with(&strict, &sources(), &extract(Some("Shop Me"), None))
            .is_none());
    }

    #[tokio::test]
    async fn fetch_uses_given_matcher() {
        let catalog = crate::StaticCatalog {
            order_sources: sources(),
            ..Default::default()
        };
        let strict = Matcher::new(
            &CanonicalizeConfig::default(),
            MatchConfig {
                best_match_threshold: 0.9,
                ..MatchConfig::default()
            },
        )
        .expect("valid config");
        let conversation = extract(None, Some("Shop Me"));

        let default_hit = fetch_order_source(&catalog, &Matcher::default(), &conversation)
            .await
            .expect("fetch");
        assert!(default_hit.is_some());

        let strict_hit = fetch_order_source(&catalog, &strict, &conversation)
            .await
            .expect("fetch");
        assert!(strict_hit.is_none());
    }

    #[test]
    fn falls_back_to_page_name() {
        let hit = resolve_order_source(&sources(), &extract(Some("tiktok"), Some("shop me bau")))
            .expect("match");
        assert_eq!(hit.candidate.id, CandidateId::from("shop"));

        let hit = resolve_order_source(&sources(), &extract(None, Some("facebook")))
            .expect("match");
        assert_eq!(hit.candidate.id, CandidateId::from("fb"));
    }

    #[test]
    fn nothing_named_resolves_to_none() {
        assert!(resolve_order_source(&sources(), &extract(None, None)).is_none());
        assert!(resolve_order_source(&[], &extract(Some("Zalo"), None)).is_none());
    }
}
