// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Playlist spec document model.
//!
//! A spec is a YAML document with two optional top-level keys, `tags` and `combiner`, each a
//! recursive folder tree. Folder nodes are mappings with `name` and `playlists` keys; leaves are
//! either bare strings or mappings carrying `tag_content` (in `tags`) or `expression` (in
//! `combiner`) plus an optional `name` override.

use serde::Deserialize;
use thiserror::Error;

/// Encountered when the spec document cannot be loaded.
#[derive(Error, Debug)]
pub enum SpecError {
    /// The document is not well-formed YAML or does not fit the schema.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A leaf in the `tags` section uses `expression`.
    #[error("leaf in the `tags` section must use `tag_content`, not `expression` ({0:?})")]
    ExpressionInTags(String),
    /// A leaf in the `combiner` section uses `tag_content`.
    #[error("leaf in the `combiner` section must use `expression`, not `tag_content` ({0:?})")]
    TagContentInCombiner(String),
    /// A leaf record carries both or neither of `tag_content` and `expression`.
    #[error("leaf must carry exactly one of `tag_content` or `expression`")]
    AmbiguousLeaf,
}

/// Which leaf record key a spec section requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    /// The `tags` section (leaves carry `tag_content`).
    Tags,
    /// The `combiner` section (leaves carry `expression`).
    Combiner,
}

/// A playlist spec document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistSpec {
    /// The tag-playlist tree, if any.
    pub tags: Option<SpecFolder>,
    /// The combiner-playlist tree, if any.
    pub combiner: Option<SpecFolder>,
}

/// A folder node of the spec.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecFolder {
    /// Display name of the folder.
    pub name: String,
    /// Child nodes, in order.
    pub playlists: Vec<SpecNode>,
}

/// A node of the spec: either a folder or a leaf.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SpecNode {
    /// A nested folder.
    Folder(SpecFolder),
    /// A leaf with explicit content and an optional display name.
    Record(SpecLeafRecord),
    /// A bare leaf: the string is both the content and the display name.
    Name(String),
}

/// A leaf given as a record.
///
/// Exactly one of `tag_content` and `expression` must be set, depending on the section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecLeafRecord {
    /// The tag this leaf collects (only in the `tags` section).
    pub tag_content: Option<String>,
    /// The combiner expression this leaf evaluates (only in the `combiner` section).
    pub expression: Option<String>,
    /// Display name override.
    pub name: Option<String>,
}

/// A resolved view of a leaf in the `tags` section.
#[derive(Debug, Clone, Copy)]
pub struct TagLeaf<'a> {
    /// The tag to collect.
    pub tag: &'a str,
    /// The display name of the resulting playlist.
    pub name: &'a str,
}

/// A resolved view of a leaf in the `combiner` section.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionLeaf<'a> {
    /// The expression source text.
    pub expression: &'a str,
    /// The display name of the resulting playlist.
    pub name: &'a str,
}

impl SpecNode {
    /// View this node as a `tags`-section leaf, if it is one.
    #[must_use]
    pub fn tag_leaf(&self) -> Option<TagLeaf<'_>> {
        match self {
            SpecNode::Folder(_) => None,
            SpecNode::Record(record) => {
                let tag = record.tag_content.as_deref()?;
                Some(TagLeaf {
                    tag,
                    name: record.name.as_deref().unwrap_or(tag),
                })
            }
            SpecNode::Name(name) => Some(TagLeaf { tag: name, name }),
        }
    }

    /// View this node as a `combiner`-section leaf, if it is one.
    #[must_use]
    pub fn expression_leaf(&self) -> Option<ExpressionLeaf<'_>> {
        match self {
            SpecNode::Folder(_) => None,
            SpecNode::Record(record) => {
                let expression = record.expression.as_deref()?;
                Some(ExpressionLeaf {
                    expression,
                    name: record.name.as_deref().unwrap_or(expression),
                })
            }
            SpecNode::Name(name) => Some(ExpressionLeaf {
                expression: name,
                name,
            }),
        }
    }
}

impl PlaylistSpec {
    /// Parse a spec from YAML text and validate its structure.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if the document is not well-formed or a leaf does not fit its
    /// section.
    pub fn load_from_str(text: &str) -> Result<Self, SpecError> {
        let spec: PlaylistSpec = serde_yaml::from_str(text)?;
        if let Some(tags) = &spec.tags {
            validate_folder(tags, SectionKind::Tags)?;
        }
        if let Some(combiner) = &spec.combiner {
            validate_folder(combiner, SectionKind::Combiner)?;
        }
        Ok(spec)
    }
}

/// Check that every leaf record below the folder fits the section.
fn validate_folder(folder: &SpecFolder, section: SectionKind) -> Result<(), SpecError> {
    for node in &folder.playlists {
        match node {
            SpecNode::Folder(sub) => validate_folder(sub, section)?,
            SpecNode::Record(record) => validate_record(record, section)?,
            SpecNode::Name(_) => {}
        }
    }
    Ok(())
}

/// Check that a leaf record carries exactly the key its section requires.
fn validate_record(record: &SpecLeafRecord, section: SectionKind) -> Result<(), SpecError> {
    match (section, &record.tag_content, &record.expression) {
        (_, Some(_), Some(_)) | (_, None, None) => Err(SpecError::AmbiguousLeaf),
        (SectionKind::Tags, None, Some(expression)) => {
            Err(SpecError::ExpressionInTags(expression.clone()))
        }
        (SectionKind::Combiner, Some(tag), None) => {
            Err(SpecError::TagContentInCombiner(tag.clone()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_spec() {
        let spec = PlaylistSpec::load_from_str(
            r"
            tags:
              name: Root
              playlists:
                - name: Styles
                  playlists:
                    - House
                    - {tag_content: Hip Hop, name: Rap}
            combiner:
              name: Combos
              playlists:
                - House & Techno
                - {expression: House ~ Techno, name: Pure House}
            ",
        )
        .unwrap();

        let tags = spec.tags.unwrap();
        assert_eq!(tags.name, "Root");
        let SpecNode::Folder(styles) = &tags.playlists[0] else {
            panic!("expected folder");
        };
        assert_eq!(styles.name, "Styles");
        let leaf = styles.playlists[1].tag_leaf().unwrap();
        assert_eq!(leaf.tag, "Hip Hop");
        assert_eq!(leaf.name, "Rap");

        let combiner = spec.combiner.unwrap();
        let leaf = combiner.playlists[1].expression_leaf().unwrap();
        assert_eq!(leaf.expression, "House ~ Techno");
        assert_eq!(leaf.name, "Pure House");
    }

    #[test]
    fn test_bare_leaf_names_itself() {
        let spec = PlaylistSpec::load_from_str(
            r"
            tags:
              name: Root
              playlists: [House]
            ",
        )
        .unwrap();
        let leaf_node = &spec.tags.unwrap().playlists[0];
        let leaf = leaf_node.tag_leaf().unwrap();
        assert_eq!(leaf.tag, "House");
        assert_eq!(leaf.name, "House");
    }

    #[test]
    fn test_expression_in_tags_section_is_rejected() {
        let result = PlaylistSpec::load_from_str(
            r"
            tags:
              name: Root
              playlists:
                - {expression: House & Techno}
            ",
        );
        assert!(matches!(result, Err(SpecError::ExpressionInTags(_))));
    }

    #[test]
    fn test_tag_content_in_combiner_section_is_rejected() {
        let result = PlaylistSpec::load_from_str(
            r"
            combiner:
              name: Root
              playlists:
                - {tag_content: House}
            ",
        );
        assert!(matches!(result, Err(SpecError::TagContentInCombiner(_))));
    }

    #[test]
    fn test_leaf_with_both_keys_is_rejected() {
        let result = PlaylistSpec::load_from_str(
            r"
            tags:
              name: Root
              playlists:
                - {tag_content: House, expression: House & Techno}
            ",
        );
        assert!(matches!(result, Err(SpecError::AmbiguousLeaf)));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert!(PlaylistSpec::load_from_str("unknown: {}").is_err());
    }

    #[test]
    fn test_missing_sections_are_allowed() {
        let spec = PlaylistSpec::load_from_str("tags:\n  name: Root\n  playlists: []").unwrap();
        assert!(spec.tags.is_some());
        assert!(spec.combiner.is_none());
    }
}
