use std::path::Path;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output: {0}")]
    Output(String),

    #[error("cannot open file: {0}")]
    Open(#[from] std::io::Error),

    #[error("cannot decode: {0}")]
    Decode(String),

    #[error("seek failed: {0}")]
    Seek(String),
}

/// Something outside the player took the audio away from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    /// Playback was interrupted by the system or the audio backend.
    Interrupted,
    /// The output device went away (e.g. headphones unplugged).
    OutputRemoved,
}

/// Opens files for playback.
pub trait AudioEngine {
    /// Decode `location` and return a paused handle positioned at zero.
    fn open(&mut self, location: &Path) -> Result<Box<dyn AudioHandle>, EngineError>;
}

/// One opened, decodable file.
pub trait AudioHandle {
    /// Total length. `Duration::ZERO` when the length cannot be determined.
    fn duration(&self) -> Duration;
    /// Current playhead.
    fn position(&self) -> Duration;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, to: Duration) -> Result<(), EngineError>;
    /// Silence the handle for good. Also done on drop.
    fn stop(&mut self);
    /// Whether the decoder has run out of samples.
    fn finished(&self) -> bool;
}
