//! Songs from a local library, picked by spoken name.
//!
//! The library maps a song name to a link: a URL for streaming services or
//! a path to a local file. Spoken names rarely match exactly, so lookup is
//! by normalized Levenshtein similarity with a floor of [`MATCH_CUTOFF`].

use serde::Deserialize;
use std::collections::BTreeMap;

/// Minimum similarity, in `0.0..=1.0`, for a name to count as a match.
pub const MATCH_CUTOFF: f64 = 0.5;

/// A library entry chosen for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track<'a> {
    pub name: &'a str,
    pub link: &'a str,
}

/// Song name to URL or file path, as written in the `[skills.music]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MusicLibrary {
    tracks: BTreeMap<String, String>,
}

impl MusicLibrary {
    pub fn new<N, L>(tracks: impl IntoIterator<Item = (N, L)>) -> Self
    where
        N: Into<String>,
        L: Into<String>,
    {
        Self {
            tracks: tracks
                .into_iter()
                .map(|(name, link)| (name.into(), link.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The closest-named track, if any clears [`MATCH_CUTOFF`]. Ties go to
    /// the name that sorts first.
    pub fn find(&self, query: &str) -> Option<Track<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.tracks
            .iter()
            .map(|(name, link)| {
                let score = strsim::normalized_levenshtein(&query, &name.to_lowercase());
                (score, name, link)
            })
            .filter(|(score, _, _)| *score >= MATCH_CUTOFF)
            .max_by(|a, b| a.0.total_cmp(&b.0).then_with(|| b.1.cmp(a.1)))
            .map(|(_, name, link)| Track {
                name: name.as_str(),
                link: link.as_str(),
            })
    }
}
