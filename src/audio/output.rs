//! `rodio`-backed audio engine.
//!
//! Each opened file gets its own paused `Sink` on the shared default output
//! stream. Seeking uses `Sink::try_seek`; formats that cannot seek report an
//! error instead of silently restarting.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::engine::{AudioEngine, AudioHandle, EngineError, SystemEvent};

pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    /// Open the default output device. Stream failures reported by the
    /// backend afterwards (device unplugged, backend errors) are passed to
    /// `on_event`, which runs on the audio backend's thread.
    pub fn open_default<F>(mut on_event: F) -> Result<Self, EngineError>
    where
        F: FnMut(SystemEvent) + Send + 'static,
    {
        let mut stream = OutputStreamBuilder::from_default_device()
            .map_err(|e| EngineError::Output(e.to_string()))?
            .with_error_callback(move |err| {
                log::warn!("audio output error: {err}");
                let event = match err {
                    rodio::cpal::StreamError::DeviceNotAvailable => SystemEvent::OutputRemoved,
                    _ => SystemEvent::Interrupted,
                };
                on_event(event);
            })
            .open_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioEngine for RodioEngine {
    fn open(&mut self, location: &Path) -> Result<Box<dyn AudioHandle>, EngineError> {
        let file = File::open(location)?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode(e.to_string()))?;

        let duration = tagged_duration(location)
            .or_else(|| source.total_duration())
            .unwrap_or(Duration::ZERO);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);
        log::debug!("opened {} ({:?})", location.display(), duration);

        Ok(Box::new(RodioHandle { sink, duration }))
    }
}

/// Container-level duration via lofty; decoders often cannot tell for VBR mp3.
fn tagged_duration(location: &Path) -> Option<Duration> {
    lofty::read_from_path(location)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

struct RodioHandle {
    sink: Sink,
    duration: Duration,
}

impl AudioHandle for RodioHandle {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, to: Duration) -> Result<(), EngineError> {
        self.sink
            .try_seek(to)
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}
