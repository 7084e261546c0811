// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Orchestration of the end-to-end playlist build.

mod combiner;
mod tags;

pub use combiner::CombinerTree;
pub use tags::build_tag_tree;

use crate::collection::CollectionLike;
use crate::config::Config;
use crate::filter::FilterRegistry;
use crate::playlist::Playlist;
use crate::spec::PlaylistSpec;
use crate::tagindex::TagIndex;
use chrono::NaiveDate;

/// Run the end-to-end playlist build and attach the result to the collection.
///
/// The stages run in a fixed order: assemble the filter registry (so configuration faults
/// surface before any work is done), build the tag index, materialize the tag-playlist tree
/// (registering every leaf in the index's playlist-name relation), parse all combiner
/// expressions, materialize the combiner tree, apply the enabled filters to both trees, prune
/// leaves below the configured track minimums, and attach both trees under a
/// [`PLAYLIST_BUILDER`](crate::ROOT_FOLDER_NAME) root folder.
///
/// For a given collection, spec and configuration the appended tree is identical across runs,
/// including per-leaf track order (ascending by track identifier).
///
/// # Errors
///
/// Returns an error if the configuration enables an unknown filter, an expression fails to
/// parse, a `{playlist:…}` selector references a playlist the tag stage did not produce, or a
/// wildcard pattern cannot be compiled.
pub fn build<C: CollectionLike>(
    collection: &mut C,
    spec: &PlaylistSpec,
    config: &Config,
    as_of: NaiveDate,
) -> crate::Result<()> {
    let registry = FilterRegistry::from_config(config)?;
    let mut index = TagIndex::new(collection.tracks(), config);
    log::info!("Indexed {} tags", index.tag_names().count());

    let tag_tree = spec
        .tags
        .as_ref()
        .map(|folder| build_tag_tree(folder, &mut index, config.playlists.remainder()));

    let combiner_tree = spec
        .combiner
        .as_ref()
        .map(CombinerTree::parse)
        .transpose()?
        .map(|tree| tree.evaluate(&index, as_of))
        .transpose()?;

    let mut children = Vec::new();
    if let Some(mut tree) = tag_tree {
        registry.apply(&mut tree, &index);
        tree.prune_sparse_leaves(config.playlists.min_tag_playlist_tracks());
        children.push(tree);
    }
    if let Some(mut tree) = combiner_tree {
        registry.apply(&mut tree, &index);
        tree.prune_sparse_leaves(config.playlists.min_combiner_playlist_tracks());
        children.push(tree);
    }

    collection.append_playlist(Playlist::folder(crate::ROOT_FOLDER_NAME, children));
    Ok(())
}
