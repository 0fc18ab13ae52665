//! The `Player` ties a `PlaylistState` to a `Playback` collaborator.
//!
//! Navigation follows the playlist rules; the player decides when the
//! collaborator has to load, play, pause or rewind.

use log::debug;

use crate::errors::{AudioError, PlayerError, PlaylistError};
use crate::library::{Track, TrackId};
use crate::playlist::{PlaylistState, TrackEnd};

use super::types::{Playback, Volume};

/// Elapsed and total time of the loaded track, in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Progress {
    pub elapsed: f64,
    pub total: f64,
}

impl Progress {
    /// Played share in percent, `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        if self.total > 0.0 {
            (self.elapsed / self.total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Format seconds as `m:ss`; non-finite input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let secs = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub struct Player<P: Playback> {
    playlist: PlaylistState,
    playback: P,
    playing: bool,
    volume: Volume,
    loaded: Option<TrackId>,
}

impl<P: Playback> Player<P> {
    pub fn new(mut playback: P, playlist: PlaylistState, volume: Volume) -> Self {
        playback.set_volume(volume.fraction());
        Self {
            playlist,
            playback,
            playing: false,
            volume,
            loaded: None,
        }
    }

    pub fn playlist(&self) -> &PlaylistState {
        &self.playlist
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Id of the track currently loaded into the playback collaborator.
    pub fn loaded(&self) -> Option<TrackId> {
        self.loaded
    }

    /// Append tracks, returning how many were added.
    pub fn add_tracks(&mut self, tracks: Vec<Track>) -> usize {
        let mut added = 0;
        for track in tracks {
            if self.playlist.push(track) {
                added += 1;
            }
        }
        added
    }

    /// Load the current track into the playback collaborator.
    pub fn load_current(&mut self) -> Result<(), AudioError> {
        let Some(track) = self.playlist.current_track() else {
            return Ok(());
        };
        let id = track.id;
        let media = track
            .media
            .clone()
            .ok_or_else(|| AudioError::NoMedia(track.title.clone()))?;

        self.playback.load(&media)?;
        self.loaded = Some(id);
        if let Some(secs) = self.playback.duration() {
            self.playlist.set_duration(id, secs);
        }
        debug!("loaded track {id}");
        Ok(())
    }

    fn current_is_loaded(&self) -> bool {
        self.loaded.is_some() && self.loaded == self.playlist.current_track().map(|t| t.id)
    }

    /// Reload after the current index moved, resuming only if we were playing.
    fn after_move(&mut self) -> Result<(), AudioError> {
        match self.load_current() {
            Ok(()) => {
                if self.playing {
                    self.playback.play();
                }
                Ok(())
            }
            Err(e) => {
                self.playing = false;
                self.loaded = None;
                self.playback.stop();
                Err(e)
            }
        }
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), AudioError> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        if self.playing {
            self.playback.pause();
            self.playing = false;
        } else {
            if !self.current_is_loaded() {
                self.load_current()?;
            }
            self.playback.play();
            self.playing = true;
        }
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), AudioError> {
        if self.playlist.advance().is_none() {
            return Ok(());
        }
        self.after_move()
    }

    pub fn previous(&mut self) -> Result<(), AudioError> {
        if self.playlist.retreat().is_none() {
            return Ok(());
        }
        self.after_move()
    }

    /// Make `id` current and load it, keeping the play/pause state.
    pub fn select(&mut self, id: TrackId) -> Result<(), PlayerError> {
        self.playlist.select(id)?;
        self.after_move()?;
        Ok(())
    }

    /// Make `id` current and start playing it.
    pub fn play_track(&mut self, id: TrackId) -> Result<(), PlayerError> {
        self.playlist.select(id)?;
        self.playing = true;
        self.after_move()?;
        Ok(())
    }

    /// Remove `id`; playback stops when it was the loaded track.
    pub fn remove(&mut self, id: TrackId) -> Result<Track, PlaylistError> {
        let removed = self.playlist.remove(id)?;
        if self.loaded == Some(id) {
            self.playback.stop();
            self.loaded = None;
            self.playing = false;
        }
        Ok(removed)
    }

    /// React to the collaborator reporting the end of the track.
    pub fn handle_track_end(&mut self) -> Result<(), AudioError> {
        match self.playlist.on_track_end() {
            None => Ok(()),
            Some(TrackEnd::Replay) => {
                self.playback.seek(0.0)?;
                self.playback.play();
                self.playing = true;
                Ok(())
            }
            Some(TrackEnd::Advanced) => self.after_move(),
        }
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.playlist.toggle_shuffle()
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.playlist.toggle_repeat()
    }

    pub fn set_volume(&mut self, percent: u8) {
        self.volume = Volume::from_percent(percent);
        self.playback.set_volume(self.volume.fraction());
    }

    /// Duration of the loaded track: the decoder's, else the one read from
    /// the file tags.
    fn total(&self) -> Option<f64> {
        self.playback
            .duration()
            .or_else(|| {
                let id = self.loaded?;
                self.playlist.get(id).map(|t| t.duration_secs)
            })
            .filter(|d| *d > 0.0)
    }

    pub fn progress(&self) -> Option<Progress> {
        let total = self.total()?;
        Some(Progress {
            elapsed: self.playback.position().min(total),
            total,
        })
    }

    /// Jump to `fraction` of the loaded track (a click on the progress bar).
    pub fn seek_fraction(&mut self, fraction: f64) -> Result<(), AudioError> {
        let Some(total) = self.total() else {
            return Ok(());
        };
        self.playback.seek(fraction.clamp(0.0, 1.0) * total)
    }

    /// Move the position by `delta_secs`, staying inside the track.
    pub fn seek_by(&mut self, delta_secs: f64) -> Result<(), AudioError> {
        let Some(total) = self.total() else {
            return Ok(());
        };
        let target = (self.playback.position() + delta_secs).clamp(0.0, total);
        self.playback.seek(target)
    }
}
