//! Best-effort persistence of the theme, the current playlist and named
//! playlists on top of a string key-value store.
//!
//! Values are JSON wrapped in a versioned envelope. Anything that fails to
//! parse, or carries another version, reads back as absent.

mod kv;
mod schema;

pub use kv::*;
pub use schema::*;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::Theme;
use crate::errors::StorageError;
use crate::library::Track;

/// Typed access to the persisted player data.
pub struct Storage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        let value = decode(&raw);
        if value.is_none() {
            debug!("ignoring unreadable stored value for {key:?}");
        }
        value
    }

    fn write<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = encode(value)?;
        self.store.set(key, &raw)
    }

    pub fn load_theme(&self) -> Option<Theme> {
        self.read(THEME_KEY)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.write(THEME_KEY, &theme)
    }

    /// The playlist of the previous session, without media handles.
    pub fn load_current_playlist(&self) -> Option<Vec<Track>> {
        self.read(CURRENT_PLAYLIST_KEY)
    }

    pub fn save_current_playlist(&mut self, tracks: &[Track]) -> Result<(), StorageError> {
        self.write(CURRENT_PLAYLIST_KEY, &tracks)
    }

    /// All named playlists, oldest first.
    pub fn saved_playlists(&self) -> Vec<SavedPlaylist> {
        self.read(SAVED_PLAYLISTS_KEY).unwrap_or_default()
    }

    /// Append a named snapshot of `tracks` to the saved playlists.
    pub fn save_named_playlist(
        &mut self,
        name: &str,
        tracks: &[Track],
        created: DateTime<Utc>,
    ) -> Result<SavedPlaylist, StorageError> {
        if tracks.is_empty() {
            return Err(StorageError::NothingToSave);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::MissingName);
        }

        let playlist = SavedPlaylist {
            name: name.to_string(),
            tracks: tracks.to_vec(),
            created,
        };

        let mut all = self.saved_playlists();
        all.push(playlist.clone());
        self.write(SAVED_PLAYLISTS_KEY, &all)?;
        info!("saved playlist {:?} with {} tracks", playlist.name, playlist.tracks.len());
        Ok(playlist)
    }
}
