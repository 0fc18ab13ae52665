//! A `Playback` that records calls instead of making noise.

use crate::errors::AudioError;
use crate::library::MediaHandle;

use super::types::Playback;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(MediaHandle),
    Play,
    Pause,
    Stop,
    Seek(f64),
    Volume(f32),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingPlayback {
    pub calls: Vec<Call>,
    pub media: Option<MediaHandle>,
    pub playing: bool,
    pub position: f64,
    /// Reported for every loaded source.
    pub source_duration: Option<f64>,
    pub ended: bool,
}

impl RecordingPlayback {
    pub fn with_duration(secs: f64) -> Self {
        Self {
            source_duration: Some(secs),
            ..Self::default()
        }
    }
}

impl Playback for RecordingPlayback {
    fn load(&mut self, media: &MediaHandle) -> Result<(), AudioError> {
        self.calls.push(Call::Load(media.clone()));
        self.media = Some(media.clone());
        self.playing = false;
        self.position = 0.0;
        self.ended = false;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        self.playing = true;
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.playing = false;
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.media = None;
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, secs: f64) -> Result<(), AudioError> {
        self.calls.push(Call::Seek(secs));
        self.position = secs;
        self.ended = false;
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.media.as_ref().and(self.source_duration)
    }

    fn set_volume(&mut self, fraction: f32) {
        self.calls.push(Call::Volume(fraction));
    }

    fn has_ended(&self) -> bool {
        self.ended
    }
}
