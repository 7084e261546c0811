// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filter that restricts `complex` playlists to heavily tagged tracks.

use super::PlaylistFilter;
use crate::config::Config;
use crate::track::Track;
use std::collections::BTreeSet;

/// Keeps only tracks carrying enough "other" tags.
///
/// Applies to every leaf whose own name or whose ancestor chain contains `complex`
/// (case-insensitive). Tags listed in the exclusion set do not count towards the minimum.
#[derive(Debug, Clone)]
pub struct ComplexTrackFilter {
    /// Minimum number of counted tags.
    min_tags: usize,
    /// Tags that do not count.
    exclude: BTreeSet<String>,
    /// Opening sentinel of the comment annotation.
    open: String,
    /// Closing sentinel of the comment annotation.
    close: String,
}

impl ComplexTrackFilter {
    /// Create the filter from the configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            min_tags: config.filters.complex_min_tags(),
            exclude: config
                .filters
                .complex_exclude_tags()
                .iter()
                .cloned()
                .collect(),
            open: config.collection.other_tag_open().to_string(),
            close: config.collection.other_tag_close().to_string(),
        }
    }
}

impl PlaylistFilter for ComplexTrackFilter {
    fn matches_playlist(&self, path: &[&str], name: &str) -> bool {
        path.iter()
            .chain(std::iter::once(&name))
            .any(|part| part.to_lowercase().contains("complex"))
    }

    fn keep_track(&self, track: &Track, _path: &[&str], _name: &str) -> bool {
        track
            .other_tags(&self.open, &self.close)
            .iter()
            .filter(|tag| !self.exclude.contains(**tag))
            .count()
            >= self.min_tags
    }
}
