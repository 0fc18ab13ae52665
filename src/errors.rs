//! Error types shared across the age calculator, the playlist and its
//! collaborators (playback, storage).
//!
//! Every error here is recoverable: the shells print or display the
//! `Display` text and carry on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::TrackId;

/// Errors returned while parsing and validating a birth date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    /// The (normalized) date lies after today.
    #[error("Birth date cannot be in the future.")]
    FutureDate,

    /// The date lies further back than the configured maximum age.
    #[error("Please enter a valid birth date.")]
    TooOld,

    /// The day/month combination does not exist (e.g. February 30).
    #[error("Please enter a valid date.")]
    InvalidCalendarDate,

    /// A form field was left empty.
    #[error("Please fill in all fields.")]
    MissingField { field: &'static str },

    /// A form field did not contain an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors returned by playlist lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    /// No track with the given id is in the playlist.
    #[error("track {0} is not in the playlist")]
    NotFound(TrackId),
}

/// Errors returned by the key-value storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {path:?}")]
    Io { path: PathBuf, source: io::Error },

    /// A value could not be serialized.
    #[error("could not encode stored value")]
    Encode { source: serde_json::Error },

    /// Saving a named playlist while the current one is empty.
    #[error("No tracks in playlist to save!")]
    NothingToSave,

    /// Saving a named playlist with a blank name.
    #[error("Playlist name cannot be empty.")]
    MissingName,
}

/// Errors returned by the playback collaborator.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio output device could be opened.
    #[error("audio output unavailable: {0}")]
    Output(String),

    /// The track was restored from storage and has no media attached.
    #[error("\"{0}\" has no audio attached; import the file again to play it")]
    NoMedia(String),

    /// The media file could not be opened.
    #[error("failed to open {path:?}")]
    Open { path: PathBuf, source: io::Error },

    /// The media file could not be decoded.
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Errors returned by player operations that both look up a track and
/// touch the playback collaborator.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}
