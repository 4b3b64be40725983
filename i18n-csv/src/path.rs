//! Dot-notation key paths.
//!
//! A path such as `auth.login.title` addresses one translatable unit. Every
//! segment starts with an ASCII letter followed by ASCII letters or digits.
//! Validation is purely syntactic: nothing is trimmed or case-folded.

use lazy_static::lazy_static;
use regex::Regex;

/// Separator between path segments.
pub const DELIMITER: char = '.';

/// Maximum number of nested levels the builder and flattener accept.
pub const MAX_DEPTH: usize = 128;

/// Human-readable description of the accepted format, used in diagnostics.
pub const PATH_FORMAT_HINT: &str = "Use dot notation (e.g., section.subsection.key)";

lazy_static! {
    static ref SEGMENT_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").unwrap();
}

/// Splits a path into its segments, in order.
///
/// No validation is performed; `"a..b"` yields an empty middle segment.
pub fn split(path: &str) -> Vec<&str> {
    path.split(DELIMITER).collect()
}

/// Joins segments back into a path.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

/// Returns `true` if a single segment matches `[A-Za-z][A-Za-z0-9]*`.
pub fn is_valid_segment(segment: &str) -> bool {
    SEGMENT_REGEX.is_match(segment)
}

/// Returns `true` if `path` is non-empty and every segment is valid.
///
/// Leading, trailing or doubled delimiters produce empty segments and are
/// therefore rejected.
pub fn validate(path: &str) -> bool {
    !path.is_empty() && split(path).into_iter().all(is_valid_segment)
}

/// Number of nesting levels a path addresses.
pub fn depth(path: &str) -> usize {
    path.split(DELIMITER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_dot_notation() {
        assert!(validate("a.b.c"));
        assert!(validate("a1.b2"));
        assert!(validate("common"));
        assert!(validate("members.addMember"));
    }

    #[test]
    fn test_validate_rejects_malformed_paths() {
        for path in ["", "a b", "a.b-c", "a_b", ".a", "a.", "a..b", "1a", "a.0", " a"] {
            assert!(!validate(path), "path {:?} should be invalid", path);
        }
    }

    #[test]
    fn test_validate_rejects_non_ascii_letters() {
        assert!(!validate("café"));
        assert!(!validate("ключ"));
    }

    #[test]
    fn test_split_and_join() {
        let segments = split("items.0.name");
        assert_eq!(segments, vec!["items", "0", "name"]);
        assert_eq!(join(&segments), "items.0.name");
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth("a"), 1);
        assert_eq!(depth("a.b.c"), 3);
    }
}
