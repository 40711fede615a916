use std::time::Duration;

use uuid::Uuid;

/// What the OS "now playing" surface is told about the current track.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub elapsed: Duration,
    pub duration: Duration,
    /// 1.0 while playing, 0.0 while paused.
    pub playback_rate: f64,
}

/// Receiver of now-playing updates (MPRIS on Linux).
pub trait NowPlayingSink {
    /// `None` means nothing is loaded.
    fn publish(&self, info: Option<&NowPlaying>);
}

/// Change notifications for observers of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Tracks were added, removed, reordered or renamed.
    PlaylistChanged,
    /// A different track (or none) is now loaded.
    TrackChanged(Option<Uuid>),
    PlaybackChanged { playing: bool },
    Progress(Duration),
    Error(String),
}
