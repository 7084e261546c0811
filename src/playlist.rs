// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Playlist tree model.

use crate::track::TrackId;
use serde::{Deserialize, Serialize};

/// A node of a playlist tree.
///
/// Folders carry ordered children, leaves carry ordered tracks. Sibling names are not required
/// to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Playlist {
    /// An inner node holding other playlists.
    Folder {
        /// Display name of the folder.
        name: String,
        /// Child playlists, in order.
        children: Vec<Playlist>,
    },
    /// A leaf node holding tracks.
    Leaf {
        /// Display name of the playlist.
        name: String,
        /// Tracks, in order.
        tracks: Vec<TrackId>,
    },
}

impl Playlist {
    /// Create a folder node.
    #[must_use]
    pub fn folder(name: impl Into<String>, children: Vec<Playlist>) -> Self {
        Playlist::Folder {
            name: name.into(),
            children,
        }
    }

    /// Create a leaf node from an ordered iterator of tracks.
    #[must_use]
    pub fn leaf(name: impl Into<String>, tracks: impl IntoIterator<Item = TrackId>) -> Self {
        Playlist::Leaf {
            name: name.into(),
            tracks: tracks.into_iter().collect(),
        }
    }

    /// The node's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Playlist::Folder { name, .. } | Playlist::Leaf { name, .. } => name,
        }
    }

    /// Returns `true` for a folder without children.
    #[must_use]
    pub fn is_empty_folder(&self) -> bool {
        matches!(self, Playlist::Folder { children, .. } if children.is_empty())
    }

    /// Drop leaves holding fewer than `min_tracks` tracks, then drop folders left empty.
    ///
    /// The node itself is not removed, only descendants; with `min_tracks == 0` this is a no-op.
    pub fn prune_sparse_leaves(&mut self, min_tracks: usize) {
        if min_tracks == 0 {
            return;
        }
        if let Playlist::Folder { children, .. } = self {
            children.retain_mut(|child| match child {
                Playlist::Leaf { tracks, .. } => tracks.len() >= min_tracks,
                Playlist::Folder { .. } => {
                    child.prune_sparse_leaves(min_tracks);
                    !child.is_empty_folder()
                }
            });
        }
    }

    /// Visit every leaf together with its ancestor name chain (excluding the leaf itself).
    pub fn for_each_leaf_mut(&mut self, visit: &mut impl FnMut(&[&str], &mut String, &mut Vec<TrackId>)) {
        /// Recursive helper carrying the ancestor path.
        #[expect(unused_results)]
        fn walk(
            node: &mut Playlist,
            path: &mut Vec<String>,
            visit: &mut impl FnMut(&[&str], &mut String, &mut Vec<TrackId>),
        ) {
            match node {
                Playlist::Folder { name, children } => {
                    path.push(name.clone());
                    for child in children {
                        walk(child, path, visit);
                    }
                    path.pop();
                }
                Playlist::Leaf { name, tracks } => {
                    let ancestors: Vec<&str> = path.iter().map(String::as_str).collect();
                    visit(&ancestors, name, tracks);
                }
            }
        }
        walk(self, &mut Vec::new(), visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Playlist {
        Playlist::folder(
            "Root",
            vec![
                Playlist::leaf("Big", [TrackId(1), TrackId(2), TrackId(3)]),
                Playlist::folder("Inner", vec![Playlist::leaf("Small", [TrackId(4)])]),
            ],
        )
    }

    #[test]
    fn test_prune_removes_sparse_leaves_and_empty_folders() {
        let mut tree = sample_tree();
        tree.prune_sparse_leaves(2);
        let Playlist::Folder { children, .. } = &tree else {
            panic!("expected folder");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), "Big");
    }

    #[test]
    fn test_prune_zero_is_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();
        tree.prune_sparse_leaves(0);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_for_each_leaf_mut_reports_ancestors() {
        let mut tree = sample_tree();
        let mut seen = Vec::new();
        tree.for_each_leaf_mut(&mut |path, name, _tracks| {
            seen.push((path.join("/"), name.clone()));
        });
        assert_eq!(
            seen,
            vec![
                ("Root".to_string(), "Big".to_string()),
                ("Root/Inner".to_string(), "Small".to_string())
            ]
        );
    }

    #[test]
    fn test_serde_shape() {
        let tree = Playlist::leaf("House", [TrackId(7)]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"kind":"leaf","name":"House","tracks":[7]}"#);
    }
}
