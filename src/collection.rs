// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Collection abstraction.

use crate::playlist::Playlist;
use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Represents a track collection, independent of the underlying storage format.
///
/// The playlist builder only ever iterates the tracks and appends a playlist tree; reading and
/// writing the concrete on-disk format is the implementor's job.
pub trait CollectionLike {
    /// Yields the tracks contained in the collection.
    fn tracks(&self) -> impl Iterator<Item = &Track>;

    /// Append a playlist tree to the collection's root.
    fn append_playlist(&mut self, playlist: Playlist);

    /// Write the collection to the given path in the implementation's format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the collection cannot be encoded.
    fn serialize(&self, path: &Path) -> crate::Result<()>;
}

/// A collection stored as a single JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonCollection {
    /// All tracks of the collection.
    #[serde(default)]
    tracks: Vec<Track>,
    /// Playlist trees, in order.
    #[serde(default)]
    playlists: Vec<Playlist>,
}

impl JsonCollection {
    /// Create a collection from a list of tracks, without any playlists.
    #[must_use]
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            playlists: Vec::new(),
        }
    }

    /// Read a collection from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not contain a valid collection
    /// document.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let collection = serde_json::from_reader(reader)?;
        Ok(collection)
    }

    /// The playlist trees currently attached to the collection.
    #[must_use]
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }
}

impl CollectionLike for JsonCollection {
    fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    fn append_playlist(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    fn serialize(&self, path: &Path) -> crate::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
