//! `Playback` backed by a `rodio` output stream.
//!
//! Each load or seek builds a fresh `Sink` from the file, skipping to the
//! requested start position.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::errors::AudioError;
use crate::library::MediaHandle;

use super::types::Playback;

pub struct RodioPlayback {
    stream: OutputStream,
    sink: Option<Sink>,
    media: Option<MediaHandle>,
    duration: Option<Duration>,
    // Position the current sink started from.
    offset: Duration,
    volume: f32,
    paused: bool,
}

impl RodioPlayback {
    /// Open the default output device.
    pub fn open() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            media: None,
            duration: None,
            offset: Duration::ZERO,
            volume: 1.0,
            paused: true,
        })
    }

    fn start_at(&mut self, start_at: Duration) -> Result<(), AudioError> {
        let Some(media) = self.media.as_ref() else {
            return Ok(());
        };

        let (sink, total) = create_sink_at(&self.stream, media, start_at)?;
        sink.set_volume(self.volume);
        if !self.paused {
            sink.play();
        }
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.offset = start_at;
        if total.is_some() {
            self.duration = total;
        }
        Ok(())
    }
}

/// Create a paused `Sink` for `media` that starts playback at `start_at`,
/// along with the total duration reported by the decoder.
fn create_sink_at(
    stream: &OutputStream,
    media: &MediaHandle,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let path = media.path();
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let total = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}

impl Playback for RodioPlayback {
    fn load(&mut self, media: &MediaHandle) -> Result<(), AudioError> {
        self.media = Some(media.clone());
        self.duration = None;
        self.paused = true;
        self.start_at(Duration::ZERO)
    }

    fn play(&mut self) {
        self.paused = false;
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        self.paused = true;
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        self.paused = true;
        self.media = None;
        self.duration = None;
        self.offset = Duration::ZERO;
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn position(&self) -> f64 {
        let played = self.sink.as_ref().map(Sink::get_pos).unwrap_or_default();
        (self.offset + played).as_secs_f64()
    }

    fn seek(&mut self, secs: f64) -> Result<(), AudioError> {
        self.start_at(Duration::from_secs_f64(secs.max(0.0)))
    }

    fn duration(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    fn set_volume(&mut self, fraction: f32) {
        self.volume = fraction.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn has_ended(&self) -> bool {
        !self.paused && self.sink.as_ref().is_some_and(Sink::empty)
    }
}
