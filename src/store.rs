//! Durable playlist storage.
//!
//! `KvStore` is the key-value slot the playlist is written to; `JsonFileStore`
//! is the on-disk implementation. `PlaylistStore` is the only thing that
//! knows the playlist's key and record layout.

mod kv;
mod playlist;

#[cfg(test)]
pub use kv::MemoryStore;
pub use kv::{JsonFileStore, KvStore, StoreError};
pub use playlist::{PLAYLIST_KEY, PlaylistStore};
