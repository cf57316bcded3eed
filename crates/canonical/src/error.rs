use thiserror::Error;

/// Errors raised while building a [`Normalizer`](crate::Normalizer).
///
/// Normalizing text never fails; only configuration can be invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
