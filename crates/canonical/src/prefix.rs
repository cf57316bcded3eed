//! Vietnamese administrative-unit markers and their removal.

use crate::config::PrefixMode;
use crate::whitespace::collapse_whitespace;

/// Built-in administrative-unit markers, in folded form.
///
/// Ordered longest first: at any position the first marker that matches wins,
/// so `"thi xa"` must be tried before `"thi"` and `"tp."` before `"tp"`.
///
/// | Unit | Markers |
/// |------|---------|
/// | City / province | `thanh pho`, `tp.`, `tp` |
/// | Town | `thi xa`, `thi`, `t.` |
/// | Ward | `phuong`, `p.` |
/// | Rural district | `huyen`, `h.` |
/// | District | `quan`, `q.` |
/// | Commune | `xa` |
pub const ADMIN_PREFIXES: &[&str] = &[
    "thanh pho",
    "thi xa",
    "phuong",
    "huyen",
    "quan",
    "thi",
    "tp.",
    "tp",
    "q.",
    "p.",
    "h.",
    "t.",
    "xa",
];

/// Removes every accepted marker occurrence from already-folded text, then
/// collapses the whitespace left behind.
///
/// Scans left to right; after a removal the scan resumes right after the
/// removed marker, so removals never create new matches out of the joined
/// remainder.
pub(crate) fn strip_markers<M: AsRef<str>>(text: &str, markers: &[M], mode: PrefixMode) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut prev: Option<char> = None;

    'scan: while !rest.is_empty() {
        for marker in markers {
            let marker = marker.as_ref();
            if marker.is_empty() || !rest.starts_with(marker) {
                continue;
            }
            let tail = &rest[marker.len()..];
            if accepts(mode, prev, marker, tail) {
                prev = marker.chars().last();
                rest = tail;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        let Some(ch) = chars.next() else {
            break;
        };
        out.push(ch);
        prev = Some(ch);
        rest = chars.as_str();
    }

    collapse_whitespace(&out)
}

fn accepts(mode: PrefixMode, prev: Option<char>, marker: &str, tail: &str) -> bool {
    match mode {
        PrefixMode::Substring => true,
        PrefixMode::WordBoundary => {
            let left_ok = prev.is_none_or(|c| !c.is_alphanumeric());
            // "q." already ends on punctuation, so "q.1" is a valid hit.
            let right_ok = marker.ends_with('.')
                || tail.chars().next().is_none_or(|c| !c.is_alphanumeric());
            left_ok && right_ok
        }
    }
}
