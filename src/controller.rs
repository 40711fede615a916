//! The playback controller: playlist ownership, transport state, sequencing
//! and progress polling.
//!
//! `PlaybackController` is the single owner of playback state. Everything
//! else (UI, MPRIS, the audio backend) asks it to do things through its
//! methods on the thread that owns it.

mod events;
mod model;
mod poll;
mod reorder;
mod sequencing;

pub use events::{ControllerEvent, NowPlaying, NowPlayingSink};
pub use model::{ControllerOptions, PlaybackController};
pub use sequencing::PlayMode;
