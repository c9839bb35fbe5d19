//! Flag search over candidate texts.
//!
//! Matching is case-insensitive but every match is returned exactly as
//! it appears in the text. Results are deduplicated.

mod patterns;

pub use patterns::{FlagPattern, PatternError, BUILTIN_PATTERNS};

use std::collections::BTreeSet;

/// Distinct flags found in one candidate text.
pub type MatchSet = BTreeSet<String>;

/// Returns every distinct, non-overlapping match of `pattern` in `text`.
pub fn find_flags(text: &str, pattern: &FlagPattern) -> MatchSet {
    pattern
        .regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

impl FlagPattern {
    /// Convenience wrapper around [`find_flags`].
    pub fn find_in(&self, text: &str) -> MatchSet {
        find_flags(text, self)
    }
}
