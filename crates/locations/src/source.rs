use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use matcher::{Candidate, CandidateId};
use serde::{Deserialize, Serialize};

use crate::error::LocationError;
use crate::types::LocationTier;

/// Provider of city, district and ward lists.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// List the locations of `tier`.
    ///
    /// Cities ignore `parent_id`. Districts need a city id and wards need a
    /// district id; without one the call fails with
    /// [`LocationError::MissingParent`].
    async fn locations(
        &self,
        tier: LocationTier,
        parent_id: Option<&CandidateId>,
    ) -> Result<Vec<Candidate>, LocationError>;
}

/// Provider of the channels an order can come from.
#[async_trait]
pub trait OrderSourceProvider: Send + Sync {
    async fn order_sources(&self) -> Result<Vec<Candidate>, LocationError>;
}

/// In-memory catalog, usually loaded from a JSON export.
///
/// ```json
/// {
///   "cities": [{"id": 1, "name": "Hà Nội"}],
///   "districts": {"1": [{"id": 11, "name": "Hoàn Kiếm"}]},
///   "wards": {"11": [{"id": 111, "name": "Hàng Bạc"}]},
///   "order_sources": [{"id": "fb", "name": "Facebook"}]
/// }
/// ```
///
/// `districts` is keyed by city id and `wards` by district id, both in their
/// string form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCatalog {
    pub cities: Vec<Candidate>,
    pub districts: HashMap<String, Vec<Candidate>>,
    pub wards: HashMap<String, Vec<Candidate>>,
    pub order_sources: Vec<Candidate>,
}

impl StaticCatalog {
    pub fn from_json(json: &str) -> Result<Self, LocationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LocationError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LocationError::source_failure(format!(
                "failed to read catalog {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json(&raw)
    }

    fn children(&self, tier: LocationTier) -> &HashMap<String, Vec<Candidate>> {
        match tier {
            LocationTier::Ward => &self.wards,
            _ => &self.districts,
        }
    }
}

#[async_trait]
impl LocationSource for StaticCatalog {
    async fn locations(
        &self,
        tier: LocationTier,
        parent_id: Option<&CandidateId>,
    ) -> Result<Vec<Candidate>, LocationError> {
        if !tier.requires_parent() {
            return Ok(self.cities.clone());
        }
        let parent = parent_id.ok_or(LocationError::MissingParent { tier })?;
        let key = parent.to_string();
        self.children(tier)
            .get(&key)
            .cloned()
            .ok_or(LocationError::UnknownId { tier, id: key })
    }
}

#[async_trait]
impl OrderSourceProvider for StaticCatalog {
    async fn order_sources(&self) -> Result<Vec<Candidate>, LocationError> {
        Ok(self.order_sources.clone())
    }
}
