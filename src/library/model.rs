use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, unique identifier of a track in a playlist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to the raw audio bytes of a track.
///
/// Only valid for the current session; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(PathBuf);

impl MediaHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Zero until the file metadata has been read.
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(skip)]
    pub media: Option<MediaHandle>,
}

impl Track {
    /// Create a track without media or duration.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            duration_secs: 0.0,
            media: None,
        }
    }

    /// Case-insensitive substring match on title or artist. An empty query
    /// matches every track.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.artist.to_lowercase().contains(&query)
    }
}
