//! Application model: `App` and `InputMode`.
//!
//! The `App` owns the `Player` (and through it the playlist), the storage
//! handle and the view state the UI renders: cursor, search query, genre
//! filter, theme and the last status message.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::audio::{Playback, Player};
use crate::config::Theme;
use crate::errors::StorageError;
use crate::library::{Track, TrackId};
use crate::playlist::GenreFilter;
use crate::storage::{KeyValueStore, SavedPlaylist, Storage};

/// What key presses are currently typed into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search query.
    Search,
    /// Typing the name of a playlist to save.
    PlaylistName,
}

/// The main application model.
pub struct App<P: Playback, S: KeyValueStore> {
    pub player: Player<P>,
    storage: Storage<S>,

    /// Cursor, as a position in the playlist (not in the filtered view).
    pub selected: usize,
    pub mode: InputMode,
    pub search_query: String,
    pub genre: GenreFilter,
    pub name_input: String,
    pub theme: Theme,
    pub status: Option<String>,
    /// Snapshot shown by the saved playlists popup, when open.
    pub saved_window: Option<Vec<SavedPlaylist>>,
}

impl<P: Playback, S: KeyValueStore> App<P, S> {
    pub fn new(player: Player<P>, storage: Storage<S>, theme: Theme) -> Self {
        Self {
            player,
            storage,
            selected: 0,
            mode: InputMode::Normal,
            search_query: String::new(),
            genre: GenreFilter::All,
            name_input: String::new(),
            theme,
            status: None,
            saved_window: None,
        }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Surface a failed operation in the status line and the log.
    fn report<E: Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            warn!("{e}");
            self.set_status(e.to_string());
        }
    }

    /// Playlist positions passing the genre filter and the search query.
    pub fn display_indices(&self) -> Vec<usize> {
        self.player
            .playlist()
            .visible_indices(&self.genre, self.search_query.trim())
    }

    pub fn selected_id(&self) -> Option<TrackId> {
        self.player.playlist().tracks().get(self.selected).map(|t| t.id)
    }

    /// Return the next visible index after `current`, wrapping to the first.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        match display.iter().position(|&i| i == current) {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`, wrapping to the last.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        match display.iter().position(|&i| i == current) {
            Some(0) | None => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
        }
    }

    /// Move the cursor to the next visible track.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move the cursor to the previous visible track.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }

    /// Keep the cursor on a visible track, falling back to the first one.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
        } else if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    fn persist_playlist(&mut self) {
        if let Err(e) = self
            .storage
            .save_current_playlist(self.player.playlist().tracks())
        {
            warn!("failed to save the current playlist: {e}");
        }
    }

    /// Append imported tracks and remember the playlist.
    pub fn import(&mut self, tracks: Vec<Track>) -> usize {
        let added = self.player.add_tracks(tracks);
        if added > 0 {
            self.persist_playlist();
            self.ensure_selected_visible();
        }
        info!("added {added} tracks to the playlist");
        self.set_status(format!("Added {added} tracks"));
        added
    }

    /// Play the track under the cursor.
    pub fn play_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let result = self.player.play_track(id);
        self.report(result);
    }

    pub fn toggle_play_pause(&mut self) {
        let result = self.player.toggle_play_pause();
        self.report(result);
    }

    pub fn next_track(&mut self) {
        let result = self.player.next();
        self.report(result);
    }

    pub fn previous_track(&mut self) {
        let result = self.player.previous();
        self.report(result);
    }

    /// Called when the playback collaborator ran out of audio.
    pub fn on_track_end(&mut self) {
        debug!("track ended");
        let result = self.player.handle_track_end();
        self.report(result);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        let result = self.player.seek_by(delta_secs);
        self.report(result);
    }

    /// Jump to `fraction` of the loaded track.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let result = self.player.seek_fraction(fraction);
        self.report(result);
    }

    pub fn toggle_shuffle(&mut self) {
        let on = self.player.toggle_shuffle();
        self.set_status(format!("Shuffle {}", if on { "on" } else { "off" }));
    }

    pub fn toggle_repeat(&mut self) {
        let on = self.player.toggle_repeat();
        self.set_status(format!("Repeat {}", if on { "on" } else { "off" }));
    }

    pub fn volume_up(&mut self, step: u8) {
        let volume = self.player.volume().raised(step);
        self.player.set_volume(volume.percent());
    }

    pub fn volume_down(&mut self, step: u8) {
        let volume = self.player.volume().lowered(step);
        self.player.set_volume(volume.percent());
    }

    /// Remove the track under the cursor and remember the shorter playlist.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.player.remove(id) {
            Ok(track) => {
                self.persist_playlist();
                let len = self.player.playlist().len();
                if self.selected >= len {
                    self.selected = len.saturating_sub(1);
                }
                self.ensure_selected_visible();
                self.set_status(format!("Removed \"{}\"", track.title));
            }
            Err(e) => self.report(Err(e)),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.storage.save_theme(self.theme) {
            warn!("failed to save the theme: {e}");
        }
    }

    /// Step the genre filter through `all`, each known genre and `unknown`.
    pub fn cycle_genre(&mut self) {
        self.genre = self.genre.next();
        self.ensure_selected_visible();
    }

    pub fn enter_search_mode(&mut self) {
        self.mode = InputMode::Search;
    }

    /// Leave search mode, keeping the query applied.
    pub fn exit_search_mode(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.mode = InputMode::Normal;
        self.ensure_selected_visible();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.ensure_selected_visible();
    }

    pub fn begin_save(&mut self) {
        self.name_input.clear();
        self.mode = InputMode::PlaylistName;
    }

    pub fn cancel_save(&mut self) {
        self.name_input.clear();
        self.mode = InputMode::Normal;
    }

    pub fn push_name_char(&mut self, c: char) {
        self.name_input.push(c);
    }

    pub fn pop_name_char(&mut self) {
        self.name_input.pop();
    }

    /// Save the current playlist under the typed name.
    ///
    /// On a blank name the prompt stays open so the user can retry.
    pub fn confirm_save(&mut self, created: DateTime<Utc>) {
        let saved = self.storage.save_named_playlist(
            &self.name_input,
            self.player.playlist().tracks(),
            created,
        );
        match saved {
            Ok(playlist) => {
                self.set_status(format!("Playlist \"{}\" saved!", playlist.name));
                self.cancel_save();
            }
            Err(e @ StorageError::MissingName) => {
                self.set_status(e.to_string());
            }
            Err(e) => {
                self.cancel_save();
                self.report(Err(e));
            }
        }
    }

    /// Open or close the list of saved playlists.
    pub fn toggle_saved_window(&mut self) {
        if self.saved_window.take().is_none() {
            self.saved_window = Some(self.storage.saved_playlists());
        }
    }
}
