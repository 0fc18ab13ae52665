//! Audio-related small types: the playback collaborator and volume.

use crate::errors::AudioError;
use crate::library::MediaHandle;

/// A media player able to play one source at a time.
///
/// Positions and durations are in seconds.
pub trait Playback {
    /// Replace the current source with `media`, paused at position zero.
    fn load(&mut self, media: &MediaHandle) -> Result<(), AudioError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the current source.
    fn stop(&mut self);
    fn position(&self) -> f64;
    fn seek(&mut self, secs: f64) -> Result<(), AudioError>;
    /// Length of the current source, when the decoder knows it.
    fn duration(&self) -> Option<f64>;
    /// `fraction` is in `0.0..=1.0`.
    fn set_volume(&mut self, fraction: f32);
    /// True once a playing source has run out.
    fn has_ended(&self) -> bool;
}

/// Volume in whole percent, `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Volume(u8);

impl Volume {
    /// Values above 100 are clamped.
    pub fn from_percent(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn raised(self, step: u8) -> Self {
        Self::from_percent(self.0.saturating_add(step))
    }

    pub fn lowered(self, step: u8) -> Self {
        Self(self.0.saturating_sub(step))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(50)
    }
}
