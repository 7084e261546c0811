// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Set-valued evaluation of combiner expressions.

use super::selector::NumericKind;
use super::{Expression, Selector};
use crate::tagindex::TagIndex;
use crate::track::TrackId;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Evaluate an expression to the set of matching track identifiers.
///
/// The walk is post-order; every node evaluates to a sorted set, so the per-leaf ordering of the
/// final playlist is deterministic.
pub(super) fn evaluate(
    expression: &Expression,
    index: &TagIndex,
    as_of: NaiveDate,
) -> crate::Result<BTreeSet<TrackId>> {
    match expression {
        Expression::Tag { name, wildcard } => Ok(if *wildcard {
            index.tracks_with_tag_matching(name)
        } else {
            index.tracks_with_tag(name)
        }),
        Expression::Selector(selector) => match selector {
            Selector::Artist(pattern) => Ok(index.artist_glob(pattern)?),
            Selector::Comment(pattern) => Ok(index.comment_glob(pattern)?),
            Selector::Key(pattern) => Ok(index.key_glob(pattern)?),
            Selector::Label(pattern) => Ok(index.label_glob(pattern)?),
            Selector::Playlist(name) => index.playlist(name),
            Selector::Date(selector) => Ok(index.date_matches(selector, as_of)),
        },
        Expression::Numeric(numeric) => Ok(numeric
            .ranges()
            .iter()
            .map(|range| match range.kind() {
                NumericKind::Rating => index.rating_in(range.lo, range.hi),
                NumericKind::Year => index.year_in(range.lo, range.hi),
                NumericKind::Bpm => index.bpm_in(range.lo, range.hi),
            })
            .fold(BTreeSet::new(), |acc, tracks| &acc | &tracks)),
        Expression::And(lhs, rhs) => {
            Ok(&evaluate(lhs, index, as_of)? & &evaluate(rhs, index, as_of)?)
        }
        Expression::Or(lhs, rhs) => {
            Ok(&evaluate(lhs, index, as_of)? | &evaluate(rhs, index, as_of)?)
        }
        Expression::Diff(lhs, rhs) => {
            Ok(&evaluate(lhs, index, as_of)? - &evaluate(rhs, index, as_of)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::util::TrackBuilder;

    fn sample_index() -> TagIndex {
        let tracks = vec![
            TrackBuilder::new(1).genre("House").build(),
            TrackBuilder::new(2).genre("Techno").build(),
            TrackBuilder::new(3).genre("House / Techno").build(),
            TrackBuilder::new(4)
                .genre("Dubstep")
                .bpm(140.3)
                .rating(5)
                .release_date("2022-03-04")
                .build(),
            TrackBuilder::new(5)
                .artists(&["Eprom"])
                .comment("/* Dark */ absolute banger")
                .build(),
            TrackBuilder::new(6)
                .artists(&["Other"])
                .comment("/* Dark */")
                .build(),
        ];
        let config = Config::load_default().unwrap();
        TagIndex::new(tracks.iter(), &config)
    }

    fn eval(source: &str, index: &TagIndex) -> BTreeSet<TrackId> {
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Expression::parse(source)
            .unwrap()
            .evaluate(index, as_of)
            .unwrap()
    }

    fn ids(raw: &[u64]) -> BTreeSet<TrackId> {
        raw.iter().copied().map(TrackId).collect()
    }

    #[test]
    fn test_intersection() {
        let index = sample_index();
        assert_eq!(eval("House & Techno", &index), ids(&[3]));
    }

    #[test]
    fn test_difference() {
        let index = sample_index();
        assert_eq!(eval("House ~ Techno", &index), ids(&[1]));
    }

    #[test]
    fn test_union() {
        let index = sample_index();
        assert_eq!(eval("House | Techno", &index), ids(&[1, 2, 3]));
    }

    #[test]
    fn test_unknown_tag_evaluates_to_empty_set() {
        let index = sample_index();
        assert_eq!(eval("House & Ghost", &index), ids(&[]));
    }

    #[test]
    fn test_numeric_selector_combines_bpm_and_rating() {
        let index = sample_index();
        assert_eq!(eval("[138-142] & [5]", &index), ids(&[4]));
    }

    #[test]
    fn test_numeric_selector_year_range() {
        let index = sample_index();
        assert_eq!(eval("[2020-2023] & Dubstep", &index), ids(&[4]));
    }

    #[test]
    fn test_string_selectors() {
        let index = sample_index();
        assert_eq!(
            eval("{artist:*Eprom*} & {comment:*banger*}", &index),
            ids(&[5])
        );
    }

    #[test]
    fn test_other_tag_and_wildcard_literal() {
        let index = sample_index();
        assert_eq!(eval("Dark & {artist:*Eprom*}", &index), ids(&[5]));
        assert_eq!(eval("*tech* ~ House", &index), ids(&[2]));
    }

    #[test]
    fn test_playlist_selector_requires_materialized_playlist() {
        let mut index = sample_index();
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expression = Expression::parse("{playlist:Bangers} & House").unwrap();
        assert!(matches!(
            expression.evaluate(&index, as_of),
            Err(crate::ErrorType::UnknownPlaylist(ref name)) if name == "Bangers"
        ));
        index.register_playlist("Bangers", &ids(&[1, 4]));
        assert_eq!(expression.evaluate(&index, as_of).unwrap(), ids(&[1]));
    }

    #[test]
    fn test_boolean_laws() {
        let index = sample_index();
        assert_eq!(
            eval("House & Techno", &index),
            eval("Techno & House", &index)
        );
        assert_eq!(
            eval("House | Techno", &index),
            eval("Techno | House", &index)
        );
        assert_eq!(
            eval("(House & Techno) & Dark", &index),
            eval("House & (Techno & Dark)", &index)
        );
        assert_eq!(eval("House ~ House", &index), ids(&[]));
        assert_eq!(
            eval("House & (Techno | Dark)", &index),
            eval("(House & Techno) | (House & Dark)", &index)
        );
    }
}
