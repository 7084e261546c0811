// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filter for transition-track playlists.

use super::PlaylistFilter;
use crate::track::Track;
use regex::Regex;

/// Keeps only tracks whose comment carries a transition annotation of the right kind.
///
/// Transition tracks are annotated in the comment with `[ a / b ]`. A `tempo` playlist keeps
/// tracks whose annotation tokens are all integers (BPM pairs); a `genre` playlist keeps tracks
/// with at least one non-integer token. The filter applies to leaves below a `transition`
/// folder (or whose own name contains `transition`) whose name contains exactly one of `genre`
/// or `tempo`.
#[derive(Debug, Clone)]
pub struct TransitionTrackFilter {
    /// Matches the `[ a / b ]` annotation inside a comment.
    annotation: Regex,
}

impl TransitionTrackFilter {
    /// Create the filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            annotation: Regex::new(r"\[([^\[\]]+)\]").expect("annotation regex is valid"),
        }
    }
}

impl Default for TransitionTrackFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistFilter for TransitionTrackFilter {
    fn matches_playlist(&self, path: &[&str], name: &str) -> bool {
        let in_transition_tree = path
            .iter()
            .chain(std::iter::once(&name))
            .any(|part| part.to_lowercase().contains("transition"));
        let name = name.to_lowercase();
        in_transition_tree && (name.contains("genre") != name.contains("tempo"))
    }

    fn keep_track(&self, track: &Track, _path: &[&str], name: &str) -> bool {
        let Some(comment) = track.comment.as_deref() else {
            return false;
        };
        let Some(captures) = self.annotation.captures(comment) else {
            log::debug!("Track {} has no transition annotation", track.id);
            return false;
        };
        let tokens: Vec<&str> = captures[1].split('/').map(str::trim).collect();
        if tokens.len() < 2 || tokens.iter().any(|token| token.is_empty()) {
            log::warn!(
                "Excluding track {}: malformed transition annotation {:?}",
                track.id,
                &captures[0]
            );
            return false;
        }
        let all_numeric = tokens.iter().all(|token| token.parse::<i64>().is_ok());
        if name.to_lowercase().contains("tempo") {
            all_numeric
        } else {
            !all_numeric
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::TrackBuilder;

    #[test]
    fn test_matches_requires_transition_ancestry_and_exactly_one_kind() {
        let filter = TransitionTrackFilter::new();
        assert!(filter.matches_playlist(&["Root", "Transitions"], "Tempo Changes"));
        assert!(filter.matches_playlist(&["Root"], "Genre Transitions"));
        assert!(!filter.matches_playlist(&["Root", "Transitions"], "Genre & Tempo"));
        assert!(!filter.matches_playlist(&["Root", "Transitions"], "Misc"));
        assert!(!filter.matches_playlist(&["Root"], "Tempo Changes"));
    }

    #[test]
    fn test_tempo_playlist_keeps_numeric_annotations() {
        let filter = TransitionTrackFilter::new();
        let tempo = TrackBuilder::new(1).comment("[ 128 / 140 ]").build();
        let genre = TrackBuilder::new(2).comment("[ House / Dubstep ]").build();
        let path = ["Root", "Transitions"];
        assert!(filter.keep_track(&tempo, &path, "Tempo Changes"));
        assert!(!filter.keep_track(&genre, &path, "Tempo Changes"));
    }

    #[test]
    fn test_genre_playlist_keeps_textual_annotations() {
        let filter = TransitionTrackFilter::new();
        let tempo = TrackBuilder::new(1).comment("[ 128 / 140 ]").build();
        let genre = TrackBuilder::new(2).comment("[ House / Dubstep ]").build();
        let path = ["Root", "Transitions"];
        assert!(!filter.keep_track(&tempo, &path, "Genre Changes"));
        assert!(filter.keep_track(&genre, &path, "Genre Changes"));
    }

    #[test]
    fn test_three_token_annotation() {
        let filter = TransitionTrackFilter::new();
        let track = TrackBuilder::new(1).comment("[ 126 / 133 / 140 ]").build();
        assert!(filter.keep_track(&track, &["Transitions"], "Tempo Changes"));
    }

    #[test]
    fn test_missing_or_malformed_annotation_is_excluded() {
        let filter = TransitionTrackFilter::new();
        let missing = TrackBuilder::new(1).comment("just a banger").build();
        let single = TrackBuilder::new(2).comment("[ 128 ]").build();
        let empty_token = TrackBuilder::new(3).comment("[ 128 / ]").build();
        let path = ["Transitions"];
        assert!(!filter.keep_track(&missing, &path, "Tempo Changes"));
        assert!(!filter.keep_track(&single, &path, "Tempo Changes"));
        assert!(!filter.keep_track(&empty_token, &path, "Tempo Changes"));
    }
}
