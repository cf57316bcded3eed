use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::{CanonicalizeConfig, PrefixMode};
use crate::error::CanonicalError;
use crate::prefix::{strip_markers, ADMIN_PREFIXES};
use crate::whitespace::collapse_whitespace;

/// Folds text into the prefix-preserving comparison form.
///
/// Lowercases, decomposes (NFD) and drops combining marks, maps `đ` to `d`,
/// then collapses whitespace. Total over any input; `""` maps to `""`.
///
/// ```rust
/// use canonical::normalize_with_prefix;
///
/// assert_eq!(normalize_with_prefix("  Hà   Nội "), "ha noi");
/// assert_eq!(normalize_with_prefix("Quận Đống Đa"), "quan dong da");
/// ```
pub fn normalize_with_prefix(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect();
    collapse_whitespace(&folded)
}

/// Folds text and removes administrative-unit markers.
///
/// Uses the built-in marker list with substring removal; see
/// [`Normalizer`] for the configurable variant.
///
/// ```rust
/// use canonical::normalize_no_prefix;
///
/// assert_eq!(normalize_no_prefix("TP. Hồ Chí Minh"), "ho chi minh");
/// assert_eq!(normalize_no_prefix("Phường Bến Nghé"), "ben nghe");
/// ```
pub fn normalize_no_prefix(text: &str) -> String {
    strip_markers(
        &normalize_with_prefix(text),
        ADMIN_PREFIXES,
        PrefixMode::Substring,
    )
}

/// Configured normalizer.
///
/// Holds the merged marker list so repeated calls do not re-fold the
/// configured extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    mode: PrefixMode,
    markers: Vec<String>,
}

impl Normalizer {
    /// Build a normalizer from a validated configuration.
    pub fn new(cfg: &CanonicalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;

        let mut markers: Vec<String> = ADMIN_PREFIXES.iter().map(|p| p.to_string()).collect();
        for extra in &cfg.extra_prefixes {
            let folded = normalize_with_prefix(extra);
            if folded.is_empty() {
                return Err(CanonicalError::InvalidConfig(format!(
                    "extra prefix {extra:?} is empty after folding"
                )));
            }
            if !markers.contains(&folded) {
                markers.push(folded);
            }
        }
        // Stable: built-in order survives among equal lengths.
        markers.sort_by_key(|m| std::cmp::Reverse(m.chars().count()));

        Ok(Self {
            mode: cfg.prefix_mode,
            markers,
        })
    }

    pub fn mode(&self) -> PrefixMode {
        self.mode
    }

    /// Markers in the order they are tried.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// Same as [`normalize_with_prefix`]; provided for symmetry.
    pub fn with_prefix(&self, text: &str) -> String {
        normalize_with_prefix(text)
    }

    /// Prefix-stripped form under this normalizer's mode and markers.
    pub fn no_prefix(&self, text: &str) -> String {
        strip_markers(&normalize_with_prefix(text), &self.markers, self.mode)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            mode: PrefixMode::Substring,
            markers: ADMIN_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}
