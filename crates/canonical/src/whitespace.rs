//! Whitespace normalization utilities.
//!
//! Uses Unicode's definition of whitespace, so tabs, newlines and
//! non-breaking spaces all collapse the same way.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  ha   noi  "), "ha noi");
//! ```

/// Collapses runs of whitespace into a single ASCII space and trims both ends.
///
/// Returns an empty string for empty or whitespace-only input.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("quan\t\t1"), "quan 1");
/// assert_eq!(collapse_whitespace("phuong\r\nben nghe"), "phuong ben nghe");
/// assert_eq!(collapse_whitespace("ha\u{00A0}noi"), "ha noi");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims() {
        assert_eq!(collapse_whitespace("  tp   ho chi minh "), "tp ho chi minh");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(collapse_whitespace("ha noi"), "ha noi");
        assert_eq!(collapse_whitespace(""), "");
    }
}
