// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Disambiguation filter for `Minimal Deep Tech` playlists.

use super::PlaylistFilter;
use crate::config::Config;
use crate::track::Track;

/// The tag this filter disambiguates.
const TAG_NAME: &str = "Minimal Deep Tech";

/// Splits homonymous `Minimal Deep Tech` playlists by their parent folder.
///
/// Below a `Techno` folder the leaf keeps only tracks with some other genre containing
/// `techno`; below a `House` folder, analogously for `house`. Anywhere else the leaf is left
/// alone.
#[derive(Debug, Clone)]
pub struct MinimalDeepTechFilter {
    /// Delimiter inside the genre field.
    delimiter: String,
}

impl MinimalDeepTechFilter {
    /// Create the filter from the configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.collection.genre_delimiter().to_string(),
        }
    }
}

impl PlaylistFilter for MinimalDeepTechFilter {
    fn matches_playlist(&self, _path: &[&str], name: &str) -> bool {
        name == TAG_NAME
    }

    fn keep_track(&self, track: &Track, path: &[&str], _name: &str) -> bool {
        let anchor = if path.iter().any(|ancestor| *ancestor == "Techno") {
            "techno"
        } else if path.iter().any(|ancestor| *ancestor == "House") {
            "house"
        } else {
            return true;
        };
        track
            .genre_tags(&self.delimiter)
            .any(|tag| tag != TAG_NAME && tag.to_lowercase().contains(anchor))
    }
}
