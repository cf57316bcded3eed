use std::fmt;

use matcher::BestMatch;
use serde::{Deserialize, Serialize};

/// Administrative level of a location list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationTier {
    City,
    District,
    Ward,
}

impl LocationTier {
    /// Wire name used by the location service.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationTier::City => "CITY",
            LocationTier::District => "DISTRICT",
            LocationTier::Ward => "WARD",
        }
    }

    pub fn requires_parent(self) -> bool {
        !matches!(self, LocationTier::City)
    }
}

impl fmt::Display for LocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields pulled out of a customer conversation upstream.
///
/// Any of them may be missing; the values are free text as the customer
/// typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationExtract {
    pub customer_province: Option<String>,
    pub customer_district: Option<String>,
    pub customer_ward: Option<String>,
    pub source_order: Option<String>,
    pub name_page: Option<String>,
}

/// Outcome of the city → district → ward cascade.
///
/// A tier is only filled when every tier above it matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub city: Option<BestMatch>,
    pub district: Option<BestMatch>,
    pub ward: Option<BestMatch>,
}

impl ResolvedAddress {
    pub fn is_complete(&self) -> bool {
        self.city.is_some() && self.district.is_some() && self.ward.is_some()
    }
}
