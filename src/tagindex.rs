// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Reverse index from tags, playlist names and attribute predicates to track identifier sets.

use crate::config::Config;
use crate::expression::DateSelector;
use crate::track::{Track, TrackId};
use crate::util::{GlobPattern, PatternError};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// In-memory index over a collection's tracks.
///
/// Genre tags and "other" tags (extracted from the comment annotation) share a single lookup
/// namespace; a name used by both maps to the union of the two track sets. The playlist-name
/// relation starts out empty and is populated while the tag-playlist tree is built, so
/// `{playlist:…}` selectors see exactly the tracks of the most recently materialized playlist
/// with that name.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    /// Track data keyed by identifier.
    tracks: BTreeMap<TrackId, Track>,
    /// Forward map from tag name to track set (sorted for deterministic remainder output).
    tags: BTreeMap<String, BTreeSet<TrackId>>,
    /// Playlist-name relation, write-once-per-name during the tag-playlist stage.
    playlists: HashMap<String, BTreeSet<TrackId>>,
}

impl TagIndex {
    /// Build the index from a track iterator.
    ///
    /// The genre delimiter and the comment annotation markers are taken from the configuration.
    #[expect(unused_results)]
    pub fn new<'a>(tracks: impl Iterator<Item = &'a Track> + 'a, config: &Config) -> Self {
        let mut index = Self::default();
        let delimiter = config.collection.genre_delimiter();
        let open = config.collection.other_tag_open();
        let close = config.collection.other_tag_close();
        for track in tracks {
            for tag in track.genre_tags(delimiter) {
                index.tags.entry(tag.to_string()).or_default().insert(track.id);
            }
            for tag in track.other_tags(open, close) {
                index.tags.entry(tag.to_string()).or_default().insert(track.id);
            }
            index.tracks.insert(track.id, track.clone());
        }
        index
    }

    /// All tag names present in the collection, in ascending order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// The track data for the given identifier.
    #[must_use]
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// The tracks carrying the given tag (exact, case-sensitive match).
    ///
    /// Unknown tags yield the empty set so that specs can be shared across collections that do
    /// not use every tag.
    #[must_use]
    pub fn tracks_with_tag(&self, name: &str) -> BTreeSet<TrackId> {
        self.tags.get(name).cloned().unwrap_or_default()
    }

    /// The union of all tags whose lowercased name contains the given pattern.
    ///
    /// The pattern is lowercased and stripped of `*` wildcards before matching. This implements
    /// wildcard tag literals such as `*House*`.
    #[must_use]
    pub fn tracks_with_tag_matching(&self, pattern: &str) -> BTreeSet<TrackId> {
        let needle = pattern.replace('*', "").to_lowercase();
        self.tags
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .flat_map(|(_, tracks)| tracks.iter().copied())
            .collect()
    }

    /// Record the track set of a materialized playlist.
    ///
    /// A name registered twice keeps the most recent set.
    #[expect(unused_results)]
    pub fn register_playlist(&mut self, name: &str, tracks: &BTreeSet<TrackId>) {
        self.playlists.insert(name.to_string(), tracks.clone());
    }

    /// The track set of a previously materialized playlist.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorType::UnknownPlaylist`](crate::ErrorType::UnknownPlaylist) if no playlist
    /// with that name has been built.
    pub fn playlist(&self, name: &str) -> crate::Result<BTreeSet<TrackId>> {
        self.playlists
            .get(name)
            .cloned()
            .ok_or_else(|| crate::ErrorType::UnknownPlaylist(name.to_string()))
    }

    /// The tracks whose rounded BPM lies in `lo..=hi`.
    #[must_use]
    pub fn bpm_in(&self, lo: i64, hi: i64) -> BTreeSet<TrackId> {
        self.filter_tracks(|track| {
            track
                .rounded_bpm()
                .is_some_and(|bpm| (lo..=hi).contains(&bpm))
        })
    }

    /// The tracks whose rating lies in `lo..=hi`.
    #[must_use]
    pub fn rating_in(&self, lo: i64, hi: i64) -> BTreeSet<TrackId> {
        self.filter_tracks(|track| {
            track
                .rating
                .is_some_and(|rating| (lo..=hi).contains(&i64::from(rating)))
        })
    }

    /// The tracks whose release year lies in `lo..=hi`.
    #[must_use]
    pub fn year_in(&self, lo: i64, hi: i64) -> BTreeSet<TrackId> {
        self.filter_tracks(|track| {
            track
                .year()
                .is_some_and(|year| (lo..=hi).contains(&i64::from(year)))
        })
    }

    /// The tracks whose added date satisfies the given date selector.
    #[must_use]
    pub fn date_matches(&self, selector: &DateSelector, as_of: NaiveDate) -> BTreeSet<TrackId> {
        self.filter_tracks(|track| {
            track
                .date_added
                .is_some_and(|date| selector.matches(date, as_of))
        })
    }

    /// The tracks with at least one artist matching the wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern cannot be compiled.
    pub fn artist_glob(&self, pattern: &str) -> Result<BTreeSet<TrackId>, PatternError> {
        let glob = GlobPattern::new(pattern)?;
        Ok(self.filter_tracks(|track| track.artists.iter().any(|artist| glob.matches(artist))))
    }

    /// The tracks whose label matches the wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern cannot be compiled.
    pub fn label_glob(&self, pattern: &str) -> Result<BTreeSet<TrackId>, PatternError> {
        let glob = GlobPattern::new(pattern)?;
        Ok(self.filter_tracks(|track| {
            track.label.as_deref().is_some_and(|label| glob.matches(label))
        }))
    }

    /// The tracks whose comment matches the wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern cannot be compiled.
    pub fn comment_glob(&self, pattern: &str) -> Result<BTreeSet<TrackId>, PatternError> {
        let glob = GlobPattern::new(pattern)?;
        Ok(self.filter_tracks(|track| {
            track
                .comment
                .as_deref()
                .is_some_and(|comment| glob.matches(comment))
        }))
    }

    /// The tracks whose key matches the wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern cannot be compiled.
    pub fn key_glob(&self, pattern: &str) -> Result<BTreeSet<TrackId>, PatternError> {
        let glob = GlobPattern::new(pattern)?;
        Ok(self.filter_tracks(|track| track.key.as_deref().is_some_and(|key| glob.matches(key))))
    }

    /// The identifiers of all tracks satisfying the predicate.
    fn filter_tracks(&self, predicate: impl Fn(&Track) -> bool) -> BTreeSet<TrackId> {
        self.tracks
            .values()
            .filter(|track| predicate(track))
            .map(|track| track.id)
            .collect()
    }
}
