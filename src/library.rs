//! Playlist entries and the managed music directory.
//!
//! `Track` is the playlist entity; `import` copies external files into the
//! directory the application owns, and `scan` expands directory arguments
//! into the audio files they contain.

mod import;
mod model;
mod scan;

pub use import::copy_into;
pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
