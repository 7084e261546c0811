// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Encountered when the configuration cannot be loaded or is inconsistent.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration markup is malformed.
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
    /// An entry of `[filters] enabled` does not name a registered filter.
    #[error("unknown filter identifier {0:?}")]
    UnknownFilter(String),
}

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Represents a piece of configuration that can be merged with another one.
trait MergeableConfig {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self;
}

/// Policy for tags present in the collection but not referenced by the spec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// Emit an `Unused Tags` folder with one leaf per unused tag.
    #[default]
    Folder,
    /// Emit a single `Unused Tags` leaf holding the union of all unused tags.
    Playlist,
    /// Do not emit unused tags at all.
    None,
}

/// Configuration for the shape of the built playlist trees.
#[expect(missing_copy_implementations)]
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PlaylistsConfig {
    /// What to do with tags the spec does not reference.
    pub remainder: Option<RemainderPolicy>,
    /// Drop tag-tree leaves with fewer tracks than this.
    pub min_tag_playlist_tracks: Option<usize>,
    /// Drop combiner-tree leaves with fewer tracks than this.
    pub min_combiner_playlist_tracks: Option<usize>,
}

impl PlaylistsConfig {
    /// The configured remainder policy.
    #[must_use]
    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder.unwrap_or_default()
    }

    /// The minimum track count for tag-tree leaves.
    #[must_use]
    pub fn min_tag_playlist_tracks(&self) -> usize {
        self.min_tag_playlist_tracks.unwrap_or(0)
    }

    /// The minimum track count for combiner-tree leaves.
    #[must_use]
    pub fn min_combiner_playlist_tracks(&self) -> usize {
        self.min_combiner_playlist_tracks.unwrap_or(0)
    }
}

impl MergeableConfig for PlaylistsConfig {
    fn merge(&self, other: &Self) -> Self {
        PlaylistsConfig {
            remainder: self.remainder.or(other.remainder),
            min_tag_playlist_tracks: self
                .min_tag_playlist_tracks
                .or(other.min_tag_playlist_tracks),
            min_combiner_playlist_tracks: self
                .min_combiner_playlist_tracks
                .or(other.min_combiner_playlist_tracks),
        }
    }
}

/// Configuration for how track fields are split into tags.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct CollectionConfig {
    /// Delimiter between multiple genres inside the genre field.
    pub genre_delimiter: Option<String>,
    /// Opening sentinel of the "other tag" annotation inside comments.
    pub other_tag_open: Option<String>,
    /// Closing sentinel of the "other tag" annotation inside comments.
    pub other_tag_close: Option<String>,
}

impl CollectionConfig {
    /// The configured genre delimiter.
    #[must_use]
    pub fn genre_delimiter(&self) -> &str {
        self.genre_delimiter.as_deref().unwrap_or("/")
    }

    /// The configured opening sentinel for comment tags.
    #[must_use]
    pub fn other_tag_open(&self) -> &str {
        self.other_tag_open.as_deref().unwrap_or("/*")
    }

    /// The configured closing sentinel for comment tags.
    #[must_use]
    pub fn other_tag_close(&self) -> &str {
        self.other_tag_close.as_deref().unwrap_or("*/")
    }
}

impl MergeableConfig for CollectionConfig {
    fn merge(&self, other: &Self) -> Self {
        CollectionConfig {
            genre_delimiter: self
                .genre_delimiter
                .clone()
                .or_else(|| other.genre_delimiter.clone()),
            other_tag_open: self
                .other_tag_open
                .clone()
                .or_else(|| other.other_tag_open.clone()),
            other_tag_close: self
                .other_tag_close
                .clone()
                .or_else(|| other.other_tag_close.clone()),
        }
    }
}

/// Configuration for the playlist filter registry.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FiltersConfig {
    /// Ordered identifiers of the filters to apply.
    pub enabled: Option<Vec<String>>,
    /// Minimum number of "other" tags for the complex-track filter.
    pub complex_min_tags: Option<usize>,
    /// Tags the complex-track filter does not count.
    pub complex_exclude_tags: Option<Vec<String>>,
}

impl FiltersConfig {
    /// The ordered list of enabled filter identifiers.
    #[must_use]
    pub fn enabled(&self) -> &[String] {
        self.enabled.as_deref().unwrap_or(&[])
    }

    /// The minimum "other" tag count for the complex-track filter.
    #[must_use]
    pub fn complex_min_tags(&self) -> usize {
        self.complex_min_tags.unwrap_or(3)
    }

    /// The tags the complex-track filter ignores.
    #[must_use]
    pub fn complex_exclude_tags(&self) -> &[String] {
        self.complex_exclude_tags.as_deref().unwrap_or(&[])
    }
}

impl MergeableConfig for FiltersConfig {
    fn merge(&self, other: &Self) -> Self {
        FiltersConfig {
            enabled: self.enabled.clone().or_else(|| other.enabled.clone()),
            complex_min_tags: self.complex_min_tags.or(other.complex_min_tags),
            complex_exclude_tags: self
                .complex_exclude_tags
                .clone()
                .or_else(|| other.complex_exclude_tags.clone()),
        }
    }
}

/// Configuration for spec document loading.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SpecConfig {
    /// Values handed to the spec template renderer.
    pub values: Option<toml::Table>,
}

impl MergeableConfig for SpecConfig {
    fn merge(&self, other: &Self) -> Self {
        SpecConfig {
            values: self.values.clone().or_else(|| other.values.clone()),
        }
    }
}

/// The main configuration struct.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for the built playlist trees.
    #[serde(default)]
    pub playlists: PlaylistsConfig,
    /// Configuration for tag extraction from track fields.
    #[serde(default)]
    pub collection: CollectionConfig,
    /// Configuration for the playlist filter registry.
    #[serde(default)]
    pub filters: FiltersConfig,
    /// Configuration for spec document loading.
    #[serde(default)]
    pub spec: SpecConfig,
}

impl MergeableConfig for Config {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self {
        Config {
            playlists: self.playlists.merge(&other.playlists),
            collection: self.collection.merge(&other.collection),
            filters: self.filters.merge(&other.filters),
            spec: self.spec.merge(&other.spec),
        }
    }
}

impl Config {
    /// Load the configuration from a string slice.
    fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Load the default configuration.
    ///
    /// # Errors
    ///
    /// This method can fail if the embedded default configuration is malformed.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_str(DEFAULT_CONFIG)
    }

    /// Load the configuration from a file located at the given path.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&text)?;
        Ok(config)
    }

    /// Merge this configuration struct with the default values.
    ///
    /// # Panics
    ///
    /// Panics if the embedded default configuration is malformed.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let default = Self::load_default().expect("Failed to load default config");
        self.merge(&default)
    }

    /// Load the configuration by merging the given files over the defaults.
    ///
    /// Later files take precedence over earlier ones; values no file sets fall back to the
    /// embedded defaults.
    ///
    /// # Errors
    ///
    /// This method can fail if a file cannot be accessed or contains malformed configuration
    /// markup.
    pub fn load_from_paths<I, P>(paths: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut config = Config::default();
        for path in paths {
            log::debug!("Loading configuration from {}", path.as_ref().display());
            config = Self::load_from_path(path)?.merge(&config);
        }
        Ok(config.with_defaults())
    }
}
