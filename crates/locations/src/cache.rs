//! Time-to-live cache for location and order-source lists.
//!
//! Lists change rarely, so a fetched list is kept for a fixed TTL (one day
//! by default) under a namespaced key. An entry is stale once strictly more
//! than the TTL has elapsed since it was stored; stale entries are evicted
//! when read.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use matcher::{Candidate, CandidateId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LocationError;
use crate::source::{LocationSource, OrderSourceProvider};
use crate::types::LocationTier;

pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_KEY_PREFIX: &str = "nhanh_cache_";

const ORDER_SOURCES_KEY: &str = "order_sources";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "CacheConfig::default_key_prefix")]
    pub key_prefix: String,
}

impl CacheConfig {
    fn default_ttl_secs() -> u64 {
        DEFAULT_TTL_SECS
    }

    fn default_key_prefix() -> String {
        DEFAULT_KEY_PREFIX.to_string()
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), LocationError> {
        if self.key_prefix.trim().is_empty() {
            return Err(LocationError::InvalidConfig(
                "key_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: Self::default_ttl_secs(),
            key_prefix: Self::default_key_prefix(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Concurrent key/value store whose entries expire after a fixed TTL.
///
/// Every key is stored with the configured prefix, so [`TtlCache::clear`]
/// only ever touches this cache's namespace.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
    prefix: String,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(config: &CacheConfig) -> Result<Self, LocationError> {
        config.validate()?;
        Ok(Self {
            entries: DashMap::new(),
            ttl: config.ttl(),
            prefix: config.key_prefix.clone(),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Full storage key for `name`.
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub fn get(&self, name: &str) -> Option<V> {
        self.get_at(name, Instant::now())
    }

    /// Lookup as of `now`; a stale entry is removed and reported as a miss.
    pub fn get_at(&self, name: &str, now: Instant) -> Option<V> {
        let key = self.key(name);
        {
            // The read guard must be released before removing the key.
            let entry = self.entries.get(&key)?;
            if !self.is_expired(&entry, now) {
                return Some(entry.value.clone());
            }
        }
        self.evict_expired(&key, now);
        None
    }

    pub fn insert(&self, name: &str, value: V) {
        self.insert_at(name, value, Instant::now());
    }

    /// Store `value` as of `now`, sweeping entries already stale at `now`.
    pub fn insert_at(&self, name: &str, value: V, now: Instant) {
        self.purge_expired_at(now);
        self.entries.insert(
            self.key(name),
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Drop every entry stale at `now`; returns how many were dropped.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "cache_expired_purged");
        }
        purged
    }

    fn is_expired(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) > self.ttl
    }

    /// Remove `key` only if the entry stored under it is stale at `now`.
    ///
    /// The staleness check runs under the shard write lock, so an entry
    /// replaced since the caller's read survives.
    fn evict_expired(&self, key: &str, now: Instant) -> bool {
        let evicted = self
            .entries
            .remove_if(key, |_, entry| self.is_expired(entry, now))
            .is_some();
        if evicted {
            debug!(key, "cache_entry_expired");
        }
        evicted
    }

    pub fn remove(&self, name: &str) -> Option<V> {
        self.entries
            .remove(&self.key(name))
            .map(|(_, entry)| entry.value)
    }

    /// Drop every entry in this cache's namespace.
    pub fn clear(&self) {
        self.entries.retain(|key, _| !key.starts_with(&self.prefix));
    }

    /// Stored keys, prefix included.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`LocationSource`] or [`OrderSourceProvider`] with a TTL cache in front.
///
/// Lists are cached under `"<tier>:<parent>"` (or `"order_sources"`).
/// Failed fetches are not cached.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    cache: TtlCache<Vec<Candidate>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Result<Self, LocationError> {
        Ok(Self {
            inner,
            cache: TtlCache::new(config)?,
        })
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &TtlCache<Vec<Candidate>> {
        &self.cache
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

fn location_key(tier: LocationTier, parent_id: Option<&CandidateId>) -> String {
    // Cities are one list whatever parent the caller passed.
    match parent_id.filter(|_| tier.requires_parent()) {
        Some(parent) => format!("{tier}:{parent}"),
        None => format!("{tier}:"),
    }
}

#[async_trait]
impl<S: LocationSource> LocationSource for CachedSource<S> {
    async fn locations(
        &self,
        tier: LocationTier,
        parent_id: Option<&CandidateId>,
    ) -> Result<Vec<Candidate>, LocationError> {
        let name = location_key(tier, parent_id);
        if let Some(hit) = self.cache.get(&name) {
            return Ok(hit);
        }
        let fetched = self.inner.locations(tier, parent_id).await?;
        info!(key = %self.cache.key(&name), count = fetched.len(), "cache_refill");
        self.cache.insert(&name, fetched.clone());
        Ok(fetched)
    }
}

#[async_trait]
impl<S: OrderSourceProvider> OrderSourceProvider for CachedSource<S> {
    async fn order_sources(&self) -> Result<Vec<Candidate>, LocationError> {
        if let Some(hit) = self.cache.get(ORDER_SOURCES_KEY) {
            return Ok(hit);
        }
        let fetched = self.inner.order_sources().await?;
        info!(key = %self.cache.key(ORDER_SOURCES_KEY), count = fetched.len(), "cache_refill");
        self.cache.insert(ORDER_SOURCES_KEY, fetched.clone());
        Ok(fetched)
    }
}
