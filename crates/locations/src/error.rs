use thiserror::Error;

use crate::types::LocationTier;

/// Errors surfaced by location sources and the cascade resolver.
///
/// A name that matches nothing is not an error; it resolves to `None`.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Districts and wards are only listed under a parent id.
    #[error("{tier} lookup requires a parent id")]
    MissingParent { tier: LocationTier },
    /// The parent id has no entry in the catalog.
    #[error("unknown {tier} parent id: {id}")]
    UnknownId { tier: LocationTier, id: String },
    /// The upstream data source failed.
    #[error("location source failure: {0}")]
    Source(String),
    #[error("invalid cache config: {0}")]
    InvalidConfig(String),
    #[error("catalog decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LocationError {
    pub fn source_failure(msg: impl Into<String>) -> Self {
        LocationError::Source(msg.into())
    }
}
