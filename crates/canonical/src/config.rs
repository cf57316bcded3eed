//! Configuration types for the address normalizer.
//!
//! [`CanonicalizeConfig`] decides how administrative-unit markers are removed
//! when building the prefix-stripped comparison form. Diacritic folding,
//! lowercasing and whitespace collapsing are not configurable: every
//! comparison in the matcher depends on them being identical on both sides.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{CanonicalizeConfig, PrefixMode};
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.prefix_mode, PrefixMode::Substring);
//! assert!(config.extra_prefixes.is_empty());
//! ```
//!
//! ## Opting into word-boundary stripping
//!
//! ```rust
//! use canonical::{CanonicalizeConfig, PrefixMode};
//!
//! let config = CanonicalizeConfig {
//!     prefix_mode: PrefixMode::WordBoundary,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// How administrative-unit markers are located inside a normalized string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMode {
    /// Remove every occurrence of a marker, even inside a longer word.
    ///
    /// `"quang ninh"` loses its leading `"quan"` and becomes `"g ninh"`.
    /// Existing call sites were tuned against this behavior.
    #[default]
    Substring,
    /// Remove a marker only when it stands alone as a word. Dotted
    /// abbreviations (`"q."`, `"tp."`) may still be glued to the following
    /// word, so `"q.1"` still loses its marker.
    WordBoundary,
}

/// Configuration for [`Normalizer`](crate::Normalizer).
///
/// The struct is cheap to clone and serde-friendly so it can be embedded in
/// the YAML configuration of the umbrella crate.
///
/// ```json
/// {
///   "version": 1,
///   "prefix_mode": "substring",
///   "extra_prefixes": ["khu pho"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Behavior version. Bump when the normalized output changes.
    ///
    /// Version 0 is reserved and rejected.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Marker removal strategy for the prefix-stripped form.
    #[serde(default)]
    pub prefix_mode: PrefixMode,

    /// Additional markers removed alongside the built-in list.
    ///
    /// Entries are folded the same way as input text, so `"Khu Phố"` and
    /// `"khu pho"` are equivalent. Blank entries are rejected.
    #[serde(default)]
    pub extra_prefixes: Vec<String>,
}

impl CanonicalizeConfig {
    /// Check the configuration before building a normalizer.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if let Some(pos) = self
            .extra_prefixes
            .iter()
            .position(|p| p.trim().is_empty())
        {
            return Err(CanonicalError::InvalidConfig(format!(
                "extra_prefixes[{pos}] must not be blank"
            )));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            prefix_mode: PrefixMode::Substring,
            extra_prefixes: Vec::new(),
        }
    }
}
