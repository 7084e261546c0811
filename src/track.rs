// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Track model.

use crate::util::parse_year_from_str;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a track within a collection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single track of a collection.
///
/// The `genre` field holds the raw delimiter-separated genre string and `comment` the full
/// free-text comment including the "other tag" annotation. Splitting these into tag sets is the
/// caller's job because the delimiter and the annotation markers are configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier.
    pub id: TrackId,
    /// Track title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Credited artists, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artists: Vec<String>,
    /// Raw genre field (multiple genres are delimiter-separated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Free-text comment, including the tag annotation if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    /// Rating in `0..=5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Release date as written in the collection (free-form, the year is extracted from it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Date the track was added to the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,
    /// Record label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Musical key (Camelot or standard notation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Path of the underlying audio file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Track {
    /// Split the genre field on the given delimiter.
    ///
    /// Tags are trimmed and empty fragments are dropped. Matching is case-sensitive downstream,
    /// so no case folding happens here.
    pub fn genre_tags<'a>(&'a self, delimiter: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.genre
            .as_deref()
            .into_iter()
            .flat_map(move |genre| genre.split(delimiter))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Extract the "other tags" encoded in the comment between the given marker pair.
    ///
    /// The substring between the first opening marker and the next closing marker is split on
    /// `/`, trimmed, and empty fragments are dropped. Text outside the markers is left alone.
    #[must_use]
    pub fn other_tags(&self, open: &str, close: &str) -> Vec<&str> {
        let Some(comment) = self.comment.as_deref() else {
            return Vec::new();
        };
        let Some(start) = comment.find(open) else {
            return Vec::new();
        };
        let rest = &comment[start + open.len()..];
        let Some(end) = rest.find(close) else {
            return Vec::new();
        };
        rest[..end]
            .split('/')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// The BPM rounded to the nearest integer, as used by numeric selectors.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_bpm(&self) -> Option<i64> {
        self.bpm.map(|bpm| bpm.round() as i64)
    }

    /// The release year, extracted from the release date field.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(parse_year_from_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_comment(comment: &str) -> Track {
        Track {
            id: TrackId(1),
            comment: Some(comment.to_string()),
            ..Track::default()
        }
    }

    #[test]
    fn test_genre_tags_split() {
        let track = Track {
            id: TrackId(1),
            genre: Some("House / Techno /Acid ".to_string()),
            ..Track::default()
        };
        let tags: Vec<&str> = track.genre_tags("/").collect();
        assert_eq!(tags, vec!["House", "Techno", "Acid"]);
    }

    #[test]
    fn test_genre_tags_empty_field() {
        let track = Track::default();
        assert_eq!(track.genre_tags("/").count(), 0);
    }

    #[test]
    fn test_other_tags_between_markers() {
        let track = track_with_comment("/* Dark / Heavy */ absolute banger");
        assert_eq!(track.other_tags("/*", "*/"), vec!["Dark", "Heavy"]);
    }

    #[test]
    fn test_other_tags_empty_annotation() {
        let track = track_with_comment("before /*  */ after");
        assert!(track.other_tags("/*", "*/").is_empty());
    }

    #[test]
    fn test_other_tags_unterminated_annotation() {
        let track = track_with_comment("/* Dark / Heavy");
        assert!(track.other_tags("/*", "*/").is_empty());
    }

    #[test]
    fn test_other_tags_without_annotation() {
        let track = track_with_comment("no tags here");
        assert!(track.other_tags("/*", "*/").is_empty());
    }

    #[test]
    fn test_rounded_bpm() {
        let track = Track {
            id: TrackId(1),
            bpm: Some(140.3),
            ..Track::default()
        };
        assert_eq!(track.rounded_bpm(), Some(140));
    }

    #[test]
    fn test_rounded_bpm_rounds_up() {
        let track = Track {
            id: TrackId(1),
            bpm: Some(127.5),
            ..Track::default()
        };
        assert_eq!(track.rounded_bpm(), Some(128));
    }

    #[test]
    fn test_year_from_release_date() {
        let track = Track {
            id: TrackId(1),
            release_date: Some("2022-06-17".to_string()),
            ..Track::default()
        };
        assert_eq!(track.year(), Some(2022));
    }
}
