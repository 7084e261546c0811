// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

#![cfg(test)]
//! Testing utils.

use crate::track::{Track, TrackId};
use chrono::NaiveDate;

/// Builder for fake tracks used in unit tests.
#[derive(Debug, Clone)]
pub struct TrackBuilder(Track);

impl TrackBuilder {
    /// Create a builder for a track with the given identifier.
    pub fn new(id: u64) -> Self {
        Self(Track {
            id: TrackId(id),
            ..Track::default()
        })
    }

    /// Set the title.
    #[allow(dead_code)]
    pub fn title(mut self, title: &str) -> Self {
        self.0.title = Some(title.to_string());
        self
    }

    /// Set the credited artists.
    pub fn artists(mut self, artists: &[&str]) -> Self {
        self.0.artists = artists.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the raw genre field.
    pub fn genre(mut self, genre: &str) -> Self {
        self.0.genre = Some(genre.to_string());
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: &str) -> Self {
        self.0.comment = Some(comment.to_string());
        self
    }

    /// Set the BPM.
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.0.bpm = Some(bpm);
        self
    }

    /// Set the rating.
    pub fn rating(mut self, rating: u8) -> Self {
        self.0.rating = Some(rating);
        self
    }

    /// Set the release date string.
    pub fn release_date(mut self, release_date: &str) -> Self {
        self.0.release_date = Some(release_date.to_string());
        self
    }

    /// Set the date the track was added (`YYYY-MM-DD`).
    ///
    /// # Panics
    ///
    /// Panics if the date is not a valid ISO date.
    #[allow(dead_code)]
    pub fn date_added(mut self, date: &str) -> Self {
        self.0.date_added = Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap());
        self
    }

    /// Set the record label.
    pub fn label(mut self, label: &str) -> Self {
        self.0.label = Some(label.to_string());
        self
    }

    /// Set the musical key.
    #[allow(dead_code)]
    pub fn key(mut self, key: &str) -> Self {
        self.0.key = Some(key.to_string());
        self
    }

    /// Finish building the track.
    pub fn build(self) -> Track {
        self.0
    }
}
