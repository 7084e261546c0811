// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Combiner-playlist tree construction.
//!
//! The combiner stage is split into two passes: all expressions are parsed up front so that a
//! build aborts on the first malformed expression before any evaluation happens, then the parsed
//! tree is evaluated against the tag index. Unlike the tag stage there is no `All <folder>`
//! aggregation and no remainder; the combiner tree is purely compositional.

use crate::expression::{Expression, ExpressionError};
use crate::playlist::Playlist;
use crate::spec::{SpecFolder, SpecNode};
use crate::tagindex::TagIndex;
use chrono::NaiveDate;

/// A node of the parsed combiner tree.
#[derive(Debug, Clone)]
enum ParsedNode {
    /// A folder with parsed children.
    Folder {
        /// Display name of the folder.
        name: String,
        /// Parsed child nodes, in order.
        children: Vec<ParsedNode>,
    },
    /// A leaf whose expression has been parsed.
    Leaf {
        /// Display name of the resulting playlist.
        name: String,
        /// The parsed expression.
        expression: Expression,
    },
}

/// A combiner spec whose expressions have all been parsed.
#[derive(Debug, Clone)]
pub struct CombinerTree {
    /// The parsed root folder.
    root: ParsedNode,
}

impl CombinerTree {
    /// Parse every expression of the combiner spec.
    ///
    /// All leaves are parsed even after a failure so that every malformed expression is logged
    /// with its source position; the first error is returned afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExpressionError`] encountered.
    pub fn parse(spec: &SpecFolder) -> Result<Self, ExpressionError> {
        let mut first_error = None;
        let root = parse_folder(spec, &mut first_error);
        match first_error {
            Some(error) => Err(error),
            None => Ok(Self { root }),
        }
    }

    /// Evaluate every expression and materialize the combiner playlist tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression references an unknown playlist or carries a wildcard
    /// pattern that cannot be compiled.
    pub fn evaluate(&self, index: &TagIndex, as_of: NaiveDate) -> crate::Result<Playlist> {
        evaluate_node(&self.root, index, as_of)
    }
}

/// Parse a spec folder, pushing the first error into `first_error`.
///
/// Leaves that fail to parse are dropped from the returned node; the caller turns the recorded
/// error into an overall failure, so the partial tree is never evaluated.
fn parse_folder(folder: &SpecFolder, first_error: &mut Option<ExpressionError>) -> ParsedNode {
    let mut children = Vec::new();
    for node in &folder.playlists {
        match node {
            SpecNode::Folder(sub) => children.push(parse_folder(sub, first_error)),
            _ => {
                if let Some(leaf) = node.expression_leaf() {
                    match Expression::parse(leaf.expression) {
                        Ok(expression) => children.push(ParsedNode::Leaf {
                            name: leaf.name.to_string(),
                            expression,
                        }),
                        Err(error) => {
                            log::error!(
                                "Failed to parse expression {:?}: {error}",
                                leaf.expression
                            );
                            if first_error.is_none() {
                                *first_error = Some(error);
                            }
                        }
                    }
                }
            }
        }
    }
    ParsedNode::Folder {
        name: folder.name.clone(),
        children,
    }
}

/// Evaluate a parsed node to a playlist node.
fn evaluate_node(
    node: &ParsedNode,
    index: &TagIndex,
    as_of: NaiveDate,
) -> crate::Result<Playlist> {
    match node {
        ParsedNode::Folder { name, children } => {
            let children = children
                .iter()
                .map(|child| evaluate_node(child, index, as_of))
                .collect::<crate::Result<Vec<Playlist>>>()?;
            Ok(Playlist::folder(name.clone(), children))
        }
        ParsedNode::Leaf { name, expression } => {
            let tracks = expression.evaluate(index, as_of)?;
            log::debug!("Evaluated {name:?} to {} tracks", tracks.len());
            Ok(Playlist::leaf(name.clone(), tracks))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::spec::PlaylistSpec;
    use crate::track::TrackId;
    use crate::util::TrackBuilder;

    fn sample_index() -> TagIndex {
        let tracks = vec![
            TrackBuilder::new(1).genre("House").build(),
            TrackBuilder::new(2).genre("Techno").build(),
            TrackBuilder::new(3).genre("House / Techno").build(),
        ];
        let config = Config::load_default().unwrap();
        TagIndex::new(tracks.iter(), &config)
    }

    fn combiner_spec(yaml: &str) -> SpecFolder {
        PlaylistSpec::load_from_str(yaml).unwrap().combiner.unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_intersection_and_difference_leaves() {
        let spec = combiner_spec(
            r"
            combiner:
              name: Combos
              playlists:
                - House & Techno
                - {expression: House ~ Techno, name: Pure House}
            ",
        );
        let index = sample_index();
        let tree = CombinerTree::parse(&spec).unwrap();
        let playlist = tree.evaluate(&index, as_of()).unwrap();
        let Playlist::Folder { name, children } = &playlist else {
            panic!("expected folder");
        };
        assert_eq!(name, "Combos");
        assert_eq!(
            children[0],
            Playlist::leaf("House & Techno", [TrackId(3)])
        );
        assert_eq!(children[1], Playlist::leaf("Pure House", [TrackId(1)]));
    }

    #[test]
    fn test_parse_error_aborts_with_position() {
        let spec = combiner_spec(
            r"
            combiner:
              name: Combos
              playlists:
                - House & Techno
                - House &
            ",
        );
        let error = CombinerTree::parse(&spec).unwrap_err();
        assert_eq!(error.offset, 7);
        assert!(error.message.contains("expected operand"));
    }

    #[test]
    fn test_playlist_reference_resolves_against_tag_stage() {
        let spec = combiner_spec(
            r"
            combiner:
              name: Combos
              playlists:
                - '{playlist:Favorites} & Techno'
            ",
        );
        let mut index = sample_index();
        let tree = CombinerTree::parse(&spec).unwrap();
        assert!(matches!(
            tree.evaluate(&index, as_of()),
            Err(crate::ErrorType::UnknownPlaylist(ref name)) if name == "Favorites"
        ));

        index.register_playlist(
            "Favorites",
            &[TrackId(2), TrackId(3)].into_iter().collect(),
        );
        let playlist = tree.evaluate(&index, as_of()).unwrap();
        let Playlist::Folder { children, .. } = &playlist else {
            panic!("expected folder");
        };
        assert_eq!(
            children[0],
            Playlist::leaf("{playlist:Favorites} & Techno", [TrackId(2), TrackId(3)])
        );
    }
}
