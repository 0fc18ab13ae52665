use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::library::Track;

pub const SCHEMA_VERSION: u32 = 1;

pub const THEME_KEY: &str = "theme";
pub const CURRENT_PLAYLIST_KEY: &str = "current_playlist";
pub const SAVED_PLAYLISTS_KEY: &str = "saved_playlists";

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// A named snapshot of a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
    pub created: DateTime<Utc>,
}

/// Serialize `data` inside a current-version envelope.
pub fn encode<T: Serialize>(data: &T) -> Result<String, StorageError> {
    serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        data,
    })
    .map_err(|source| StorageError::Encode { source })
}

/// Parse an envelope; `None` for malformed JSON or another schema version.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let envelope: Envelope<T> = serde_json::from_str(raw).ok()?;
    (envelope.version == SCHEMA_VERSION).then_some(envelope.data)
}
