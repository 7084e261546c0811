// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Disambiguation filter for `Hip Hop` playlists.

use super::PlaylistFilter;
use crate::config::Config;
use crate::track::Track;

/// Splits homonymous `Hip Hop` playlists by their parent folder.
///
/// Below a `Bass` folder the leaf keeps only crossover tracks (tracks with at least one genre
/// besides `Hip Hop` and `R&B`); everywhere else it keeps only pure tracks (genres a subset of
/// `Hip Hop` and `R&B`).
#[derive(Debug, Clone)]
pub struct HipHopFilter {
    /// Delimiter inside the genre field.
    delimiter: String,
}

/// Genres that count as "pure" hip hop.
const PURE_GENRES: [&str; 2] = ["Hip Hop", "R&B"];

impl HipHopFilter {
    /// Create the filter from the configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.collection.genre_delimiter().to_string(),
        }
    }
}

impl PlaylistFilter for HipHopFilter {
    fn matches_playlist(&self, _path: &[&str], name: &str) -> bool {
        name == "Hip Hop"
    }

    fn keep_track(&self, track: &Track, path: &[&str], _name: &str) -> bool {
        let under_bass = path.iter().any(|ancestor| *ancestor == "Bass");
        if under_bass {
            track
                .genre_tags(&self.delimiter)
                .any(|tag| !PURE_GENRES.contains(&tag))
        } else {
            track
                .genre_tags(&self.delimiter)
                .all(|tag| PURE_GENRES.contains(&tag))
        }
    }
}
