// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Wildcard matching for string selectors.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Encountered when a wildcard pattern cannot be compiled.
#[derive(Error, Debug)]
#[error("malformed pattern {pattern:?} ({source})")]
pub struct PatternError {
    /// The offending pattern.
    pattern: String,
    /// The underlying regex compilation error.
    source: regex::Error,
}

/// A compiled `*`-wildcard pattern.
///
/// `*` matches any run of characters and comparisons are case-insensitive. A pattern without
/// wildcards must match the candidate exactly; a pattern flanked by `*` on both sides therefore
/// degenerates to a substring match.
#[derive(Debug, Clone)]
pub struct GlobPattern(Regex);

impl GlobPattern {
    /// Compile a wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the translated pattern exceeds the regex engine's
    /// compilation limits.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let translated = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<String>>()
            .join(".*");
        RegexBuilder::new(&format!("^{translated}$"))
            .case_insensitive(true)
            .build()
            .map(Self)
            .map_err(|source| PatternError {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns `true` if the candidate matches the pattern.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let pattern = GlobPattern::new("Eprom").unwrap();
        assert!(pattern.matches("eprom"));
        assert!(pattern.matches("EPROM"));
        assert!(!pattern.matches("Eprom & Friends"));
    }

    #[test]
    fn test_flanking_wildcards_match_substring() {
        let pattern = GlobPattern::new("*Eprom*").unwrap();
        assert!(pattern.matches("Eprom"));
        assert!(pattern.matches("Alix Perez & EPROM"));
        assert!(!pattern.matches("eprm"));
    }

    #[test]
    fn test_inner_wildcard() {
        let pattern = GlobPattern::new("Deep*House").unwrap();
        assert!(pattern.matches("Deep House"));
        assert!(pattern.matches("DeepHouse"));
        assert!(!pattern.matches("House Deep"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = GlobPattern::new("R&B (Mix)").unwrap();
        assert!(pattern.matches("r&b (mix)"));
        assert!(!pattern.matches("RxB (Mix)"));
    }

    #[test]
    fn test_prefix_wildcard() {
        let pattern = GlobPattern::new("*Recordings").unwrap();
        assert!(pattern.matches("Critical Recordings"));
        assert!(!pattern.matches("Recordings Critical"));
    }
}
