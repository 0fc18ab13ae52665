use log::debug;
use rand::Rng;

use crate::errors::PlaylistError;
use crate::library::{Track, TrackId};

/// What the player should do after the current track finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackEnd {
    /// Repeat is on: restart the current track from the beginning.
    Replay,
    /// The current index moved on (sequentially or at random).
    Advanced,
}

/// Ordered tracks with a current index and the shuffle/repeat flags.
///
/// `current` is `Some` exactly when the list is non-empty and always
/// points at an existing track.
#[derive(Debug, Clone, Default)]
pub struct PlaylistState {
    tracks: Vec<Track>,
    current: Option<usize>,
    shuffling: bool,
    repeating: bool,
}

impl PlaylistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modes(shuffling: bool, repeating: bool) -> Self {
        Self {
            shuffling,
            repeating,
            ..Self::default()
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn is_shuffling(&self) -> bool {
        self.shuffling
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Record a duration learned after the track was added.
    pub fn set_duration(&mut self, id: TrackId, secs: f64) {
        if let Some(t) = self.tracks.iter_mut().find(|t| t.id == id) {
            t.duration_secs = secs;
        }
    }

    /// Append a track. Returns `false` (and leaves the list alone) when a
    /// track with the same id is already present.
    pub fn push(&mut self, track: Track) -> bool {
        if self.position(track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        if self.current.is_none() {
            self.current = Some(0);
        }
        true
    }

    /// Make the track with `id` current.
    pub fn select(&mut self, id: TrackId) -> Result<usize, PlaylistError> {
        let index = self.position(id).ok_or(PlaylistError::NotFound(id))?;
        self.current = Some(index);
        Ok(index)
    }

    /// Move to the next track using the thread-local random source.
    pub fn advance(&mut self) -> Option<usize> {
        self.advance_with(&mut rand::rng())
    }

    /// Move to the next track: a uniformly random one (possibly the same)
    /// when shuffling, otherwise the following one, wrapping to the start.
    pub fn advance_with<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        let next = if self.shuffling {
            rng.random_range(0..len)
        } else {
            self.current.map_or(0, |i| (i + 1) % len)
        };
        debug!("advance: {:?} -> {next}", self.current);
        self.current = Some(next);
        Some(next)
    }

    /// Move to the previous track, wrapping to the end. Ignores shuffle.
    pub fn retreat(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        let prev = match self.current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        Some(prev)
    }

    /// Decide what happens when the current track finished playing.
    /// `None` on an empty playlist.
    pub fn on_track_end(&mut self) -> Option<TrackEnd> {
        self.on_track_end_with(&mut rand::rng())
    }

    pub fn on_track_end_with<R: Rng>(&mut self, rng: &mut R) -> Option<TrackEnd> {
        if self.tracks.is_empty() {
            return None;
        }
        if self.repeating {
            return Some(TrackEnd::Replay);
        }
        self.advance_with(rng);
        Some(TrackEnd::Advanced)
    }

    /// Remove the track with `id`.
    ///
    /// When the removed position is at or before the current index and the
    /// current index is above zero, the index steps back by one. At index
    /// zero it stays put, so it then refers to the track that followed the
    /// removed one.
    pub fn remove(&mut self, id: TrackId) -> Result<Track, PlaylistError> {
        let index = self.position(id).ok_or(PlaylistError::NotFound(id))?;
        let removed = self.tracks.remove(index);

        if self.tracks.is_empty() {
            self.current = None;
        } else if let Some(cur) = self.current {
            if index <= cur && cur > 0 {
                self.current = Some(cur - 1);
            }
        }
        Ok(removed)
    }

    /// Flip shuffle mode, returning the new value.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffling = !self.shuffling;
        self.shuffling
    }

    /// Flip repeat mode, returning the new value.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeating = !self.repeating;
        self.repeating
    }
}

impl FromIterator<Track> for PlaylistState {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut state = Self::new();
        for track in iter {
            state.push(track);
        }
        state
    }
}
