// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configurable post-build playlist filters.
//!
//! A filter is a pair of predicates: one deciding whether the filter applies to a given leaf
//! (based on the leaf's name and its ancestor chain) and one deciding, per track, whether the
//! track stays in a matching leaf. Filters are enabled by identifier in the configuration and
//! applied in order; a track survives only if every matching filter keeps it.

mod complex;
mod hip_hop;
mod minimal_deep_tech;
mod transition;

pub use complex::ComplexTrackFilter;
pub use hip_hop::HipHopFilter;
pub use minimal_deep_tech::MinimalDeepTechFilter;
pub use transition::TransitionTrackFilter;

use crate::config::{Config, ConfigError};
use crate::playlist::Playlist;
use crate::tagindex::TagIndex;
use crate::track::Track;
use itertools::Itertools;
use std::fmt;

/// A post-build filter applied to matching leaves.
pub trait PlaylistFilter: fmt::Debug {
    /// Returns `true` when the filter applies to the leaf with the given ancestor name chain.
    fn matches_playlist(&self, path: &[&str], name: &str) -> bool;

    /// Returns `true` to retain the track.
    ///
    /// Only called for leaves where [`matches_playlist`](PlaylistFilter::matches_playlist)
    /// returned `true`; `path` and `name` identify that leaf.
    fn keep_track(&self, track: &Track, path: &[&str], name: &str) -> bool;
}

/// The ordered set of enabled filters.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    /// Enabled filters, in configuration order.
    filters: Vec<Box<dyn PlaylistFilter>>,
}

impl FilterRegistry {
    /// Assemble the registry from the `[filters] enabled` configuration list.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an identifier does not name a registered filter.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut filters: Vec<Box<dyn PlaylistFilter>> = Vec::new();
        for id in config.filters.enabled() {
            filters.push(match id.as_str() {
                "hip-hop" => Box::new(HipHopFilter::new(config)),
                "minimal-deep-tech" => Box::new(MinimalDeepTechFilter::new(config)),
                "complex" => Box::new(ComplexTrackFilter::new(config)),
                "transition" => Box::new(TransitionTrackFilter::new()),
                _ => return Err(ConfigError::UnknownFilter(id.clone())),
            });
        }
        Ok(Self { filters })
    }

    /// Apply the enabled filters to every leaf of the tree.
    ///
    /// A track that cannot be resolved in the index is excluded with a diagnostic instead of
    /// failing the whole leaf.
    pub fn apply(&self, tree: &mut Playlist, index: &TagIndex) {
        if self.filters.is_empty() {
            return;
        }
        tree.for_each_leaf_mut(&mut |path, name, tracks| {
            let applicable: Vec<&dyn PlaylistFilter> = self
                .filters
                .iter()
                .map(|filter| &**filter)
                .filter(|filter| filter.matches_playlist(path, name))
                .collect();
            if applicable.is_empty() {
                return;
            }
            let before = tracks.len();
            tracks.retain(|id| match index.track(*id) {
                Some(track) => applicable
                    .iter()
                    .all(|filter| filter.keep_track(track, path, name)),
                None => {
                    log::warn!("Excluding unresolvable track {id} from {name:?}");
                    false
                }
            });
            log::debug!(
                "Filtered {}/{name:?}: kept {} of {before} tracks",
                path.iter().join("/"),
                tracks.len()
            );
        });
    }
}
