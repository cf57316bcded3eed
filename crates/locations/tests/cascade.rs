use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use locations::{
    fetch_order_source, AddressResolver, CacheConfig, CachedSource, ConversationExtract,
    LocationError, LocationSource, LocationTier, StaticCatalog,
};
use matcher::{Candidate, CandidateId, Matcher};

const CATALOG: &str = r#"{
    "cities": [
        {"id": 1, "name": "Hà Nội"},
        {"id": 79, "name": "TP. Hồ Chí Minh"},
        {"id": 48, "name": "Đà Nẵng"}
    ],
    "districts": {
        "1": [
            {"id": 101, "name": "Quận Hoàn Kiếm"},
            {"id": 102, "name": "Quận Long Biên"}
        ],
        "79": [
            {"id": 760, "name": "Quận 1"},
            {"id": 769, "name": "Quận 2"}
        ]
    },
    "wards": {
        "760": [
            {"id": 26734, "name": "Phường Bến Nghé"},
            {"id": 26737, "name": "Phường Bến Thành"},
            {"id": 26740, "name": "Phường Đa Kao"}
        ]
    },
    "order_sources": [
        {"id": "fb", "name": "Facebook"},
        {"id": "zalo", "name": "Zalo"}
    ]
}"#;

fn catalog() -> StaticCatalog {
    StaticCatalog::from_json(CATALOG).expect("catalog json")
}

fn extract(province: &str, district: &str, ward: &str) -> ConversationExtract {
    let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
    ConversationExtract {
        customer_province: field(province),
        customer_district: field(district),
        customer_ward: field(ward),
        ..ConversationExtract::default()
    }
}

#[tokio::test]
async fn full_cascade_resolves_every_tier() {
    let resolver = AddressResolver::new(catalog());
    let resolved = resolver
        .resolve(&extract("Hồ Chí Minh", "quan 1", "Bến Nghé"))
        .await
        .expect("resolve");

    assert!(resolved.is_complete());
    assert_eq!(resolved.city.unwrap().candidate.id, CandidateId::Number(79));
    assert_eq!(resolved.district.unwrap().candidate.id, CandidateId::Number(760));
    assert_eq!(resolved.ward.unwrap().candidate.id, CandidateId::Number(26734));
}

#[tokio::test]
async fn unmatched_district_stops_cascade() {
    let resolver = AddressResolver::new(catalog());
    let resolved = resolver
        .resolve(&extract("Hà Nội", "Cầu Giấy", "Dịch Vọng"))
        .await
        .expect("resolve");

    assert_eq!(resolved.city.unwrap().candidate.id, CandidateId::Number(1));
    assert!(resolved.district.is_none());
    assert!(resolved.ward.is_none());
}

#[tokio::test]
async fn absent_province_resolves_nothing() {
    let resolver = AddressResolver::new(catalog());
    let resolved = resolver
        .resolve(&extract("", "Quận 1", "Bến Nghé"))
        .await
        .expect("resolve");
    assert_eq!(resolved, Default::default());
}

#[tokio::test]
async fn catalog_gap_surfaces_as_unknown_id() {
    let resolver = AddressResolver::new(catalog());
    let err = resolver
        .resolve(&extract("Đà Nẵng", "Hải Châu", ""))
        .await
        .expect_err("no districts for Da Nang");
    assert!(matches!(
        err,
        LocationError::UnknownId {
            tier: LocationTier::District,
            ..
        }
    ));
}

struct FlakySource {
    calls: AtomicUsize,
}

#[async_trait]
impl LocationSource for FlakySource {
    async fn locations(
        &self,
        tier: LocationTier,
        _parent_id: Option<&CandidateId>,
    ) -> Result<Vec<Candidate>, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match tier {
            LocationTier::City => Ok(vec![Candidate::new(1, "Hà Nội")]),
            _ => Err(LocationError::source_failure("upstream timeout")),
        }
    }
}

#[tokio::test]
async fn source_errors_propagate() {
    let resolver = AddressResolver::new(FlakySource {
        calls: AtomicUsize::new(0),
    });
    let err = resolver
        .resolve(&extract("Hà Nội", "Hoàn Kiếm", ""))
        .await
        .expect_err("district fetch fails");
    assert!(matches!(err, LocationError::Source(msg) if msg == "upstream timeout"));
    assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cached_catalog_serves_repeat_resolutions() {
    let cached = CachedSource::new(catalog(), &CacheConfig::default()).expect("cache");
    let resolver = AddressResolver::new(cached);
    let query = extract("Hồ Chí Minh", "Quận 2", "");

    let first = resolver.resolve(&query).await.expect("resolve");
    let second = resolver.resolve(&query).await.expect("resolve");
    assert_eq!(first, second);
    assert_eq!(first.district.unwrap().candidate.id, CandidateId::Number(769));

    let mut keys = resolver.source().cache().keys();
    keys.sort();
    assert_eq!(keys, vec!["nhanh_cache_CITY:", "nhanh_cache_DISTRICT:79"]);
}

#[tokio::test]
async fn order_source_fetched_from_catalog() {
    let catalog = catalog();
    let matcher = Matcher::default();
    let hit = fetch_order_source(
        &catalog,
        &matcher,
        &ConversationExtract {
            source_order: Some("fb".into()),
            name_page: Some("Zalo".into()),
            ..ConversationExtract::default()
        },
    )
    .await
    .expect("fetch")
    .expect("match");
    assert_eq!(hit.candidate.id, CandidateId::from("zalo"));

    let none = fetch_order_source(&catalog, &matcher, &ConversationExtract::default())
        .await
        .expect("fetch");
    assert!(none.is_none());
}
