/// Splits normalized text into words.
///
/// The input is expected to be the output of one of the normalizers, which
/// already collapsed whitespace; any Unicode whitespace still acts as a
/// separator so raw text is handled too.
///
/// ```rust
/// use canonical::words;
///
/// assert_eq!(words("ben nghe 1"), vec!["ben", "nghe", "1"]);
/// assert!(words("").is_empty());
/// ```
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
