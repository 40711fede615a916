//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the cursor, the input
//! prompt and key-prefix state. Playlist and playback live in the controller.

mod model;

pub use model::*;
