use std::collections::HashSet;
use std::fmt;

use crate::library::{KNOWN_GENRES, Track, TrackId, UNKNOWN_GENRE};

use super::state::PlaylistState;

/// Genre selection applied to the playlist view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    /// Case-insensitive comparison against the track genre.
    pub fn matches(&self, track: &Track) -> bool {
        match self {
            Self::All => true,
            Self::Genre(g) => track.genre.eq_ignore_ascii_case(g),
        }
    }

    /// The next filter in `all -> known genres -> unknown -> all` order.
    pub fn next(&self) -> Self {
        let cycle: Vec<&str> = KNOWN_GENRES
            .iter()
            .copied()
            .chain(std::iter::once(UNKNOWN_GENRE))
            .collect();

        match self {
            Self::All => Self::Genre(cycle[0].to_string()),
            Self::Genre(g) => match cycle.iter().position(|c| c.eq_ignore_ascii_case(g)) {
                Some(i) if i + 1 < cycle.len() => Self::Genre(cycle[i + 1].to_string()),
                _ => Self::All,
            },
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Genre(g) => f.write_str(g),
        }
    }
}

impl PlaylistState {
    /// Tracks whose genre passes `genre`, in playlist order.
    pub fn filter(&self, genre: &GenreFilter) -> Vec<&Track> {
        self.tracks().iter().filter(|t| genre.matches(t)).collect()
    }

    /// Tracks whose title or artist contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Track> {
        self.tracks()
            .iter()
            .filter(|t| t.matches_query(query))
            .collect()
    }

    /// Positions of the tracks passing both the genre filter and the query.
    pub fn visible_indices(&self, genre: &GenreFilter, query: &str) -> Vec<usize> {
        let by_genre: HashSet<TrackId> = self.filter(genre).iter().map(|t| t.id).collect();
        let by_query: HashSet<TrackId> = self.search(query).iter().map(|t| t.id).collect();
        self.tracks()
            .iter()
            .enumerate()
            .filter(|(_, t)| by_genre.contains(&t.id) && by_query.contains(&t.id))
            .map(|(i, _)| i)
            .collect()
    }
}
