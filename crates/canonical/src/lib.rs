//! Address text normalization.
//!
//! Folds free-text Vietnamese place names into a deterministic comparison
//! form. The matcher compares two such forms per input pair.
//!
//! ## What we do
//!
//! - Lowercasing, NFD decomposition and removal of combining marks
//! - `đ` → `d` (the one Vietnamese letter NFD does not decompose)
//! - Whitespace collapsing and trimming
//! - Optional removal of administrative-unit markers (`quận`, `phường`,
//!   `tp.`, ...) for the prefix-stripped form
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Inputs are never mutated;
//! every call returns a fresh `String`.
//!
//! ## Known imprecision
//!
//! The default [`PrefixMode::Substring`] removes markers wherever they
//! appear, including inside proper nouns (`"quảng ninh"` → `"g ninh"`).
//! [`PrefixMode::WordBoundary`] is the stricter opt-in.

mod config;
mod error;
mod normalize;
mod prefix;
mod token;
mod whitespace;

pub use crate::config::{CanonicalizeConfig, PrefixMode};
pub use crate::error::CanonicalError;
pub use crate::normalize::{normalize_no_prefix, normalize_with_prefix, Normalizer};
pub use crate::prefix::ADMIN_PREFIXES;
pub use crate::token::words;
pub use crate::whitespace::collapse_whitespace;
