// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tag-playlist tree construction.

use crate::config::RemainderPolicy;
use crate::playlist::Playlist;
use crate::spec::{SpecFolder, SpecNode};
use crate::tagindex::TagIndex;
use crate::track::TrackId;
use std::collections::BTreeSet;

/// Name of the reserved folder whose tags are excluded from the remainder computation.
const IGNORE_FOLDER_NAME: &str = "_ignore";

/// Name of the synthesized remainder folder or playlist.
const UNUSED_TAGS_NAME: &str = "Unused Tags";

/// Build the tag-playlist tree for a spec.
///
/// Every materialized leaf (including the synthesized `All <folder>` and remainder leaves) is
/// registered in the index's playlist-name relation so that combiner `{playlist:…}` selectors
/// can reference it. The function is a pure function of its inputs: rebuilding with the same
/// spec and index yields an identical tree.
pub fn build_tag_tree(
    spec: &SpecFolder,
    index: &mut TagIndex,
    remainder: RemainderPolicy,
) -> Playlist {
    let mut used = BTreeSet::new();
    let mut ignored = BTreeSet::new();
    let (mut root, _) = build_folder(spec, true, index, &mut used, &mut ignored);

    let remainder_tags: BTreeSet<String> = index
        .tag_names()
        .filter(|name| !used.contains(*name) && !ignored.contains(*name))
        .map(ToString::to_string)
        .collect();
    if !remainder_tags.is_empty() {
        if let Some(unused) = build_remainder(&remainder_tags, index, remainder) {
            if let Playlist::Folder { children, .. } = &mut root {
                children.push(unused);
            }
        }
    }
    root
}

/// Recursively materialize a spec folder.
///
/// Returns the playlist node together with the union of all descendant leaf tracks, which the
/// caller folds into its own aggregation.
fn build_folder(
    folder: &SpecFolder,
    is_root: bool,
    index: &mut TagIndex,
    used: &mut BTreeSet<String>,
    ignored: &mut BTreeSet<String>,
) -> (Playlist, BTreeSet<TrackId>) {
    let mut children = Vec::new();
    let mut aggregate = BTreeSet::new();
    for node in &folder.playlists {
        match node {
            SpecNode::Folder(sub) if sub.name == IGNORE_FOLDER_NAME => {
                collect_ignored(sub, ignored);
            }
            SpecNode::Folder(sub) => {
                let (child, tracks) = build_folder(sub, false, index, used, ignored);
                aggregate.extend(tracks);
                children.push(child);
            }
            _ => {
                if let Some(leaf) = node.tag_leaf() {
                    let tracks = index.tracks_with_tag(leaf.tag);
                    let _ = used.insert(leaf.tag.to_string());
                    index.register_playlist(leaf.name, &tracks);
                    log::debug!("Materialized {:?} with {} tracks", leaf.name, tracks.len());
                    aggregate.extend(tracks.iter().copied());
                    children.push(Playlist::leaf(leaf.name, tracks));
                }
            }
        }
    }
    if !is_root {
        let all_name = format!("All {}", folder.name);
        index.register_playlist(&all_name, &aggregate);
        children.push(Playlist::leaf(all_name, aggregate.iter().copied()));
    }
    (Playlist::folder(folder.name.clone(), children), aggregate)
}

/// Record every tag below an `_ignore` folder; nothing is emitted for its contents.
fn collect_ignored(folder: &SpecFolder, ignored: &mut BTreeSet<String>) {
    for node in &folder.playlists {
        match node {
            SpecNode::Folder(sub) => collect_ignored(sub, ignored),
            _ => {
                if let Some(leaf) = node.tag_leaf() {
                    let _ = ignored.insert(leaf.tag.to_string());
                }
            }
        }
    }
}

/// Materialize the remainder according to the configured policy.
fn build_remainder(
    remainder_tags: &BTreeSet<String>,
    index: &mut TagIndex,
    policy: RemainderPolicy,
) -> Option<Playlist> {
    match policy {
        RemainderPolicy::None => None,
        RemainderPolicy::Playlist => {
            let tracks: BTreeSet<TrackId> = remainder_tags
                .iter()
                .flat_map(|tag| index.tracks_with_tag(tag))
                .collect();
            index.register_playlist(UNUSED_TAGS_NAME, &tracks);
            Some(Playlist::leaf(UNUSED_TAGS_NAME, tracks))
        }
        RemainderPolicy::Folder => {
            let mut children = Vec::new();
            let mut aggregate = BTreeSet::new();
            for tag in remainder_tags {
                let tracks = index.tracks_with_tag(tag);
                index.register_playlist(tag, &tracks);
                aggregate.extend(tracks.iter().copied());
                children.push(Playlist::leaf(tag.clone(), tracks));
            }
            let all_name = format!("All {UNUSED_TAGS_NAME}");
            index.register_playlist(&all_name, &aggregate);
            children.push(Playlist::leaf(all_name, aggregate));
            Some(Playlist::folder(UNUSED_TAGS_NAME, children))
        }
    }
}
