use crate::library::Track;

use super::kv::{KvStore, StoreError};

/// Key the playlist lives under.
pub const PLAYLIST_KEY: &str = "encore.playlist";

/// Reads and writes the ordered playlist through a `KvStore`.
pub struct PlaylistStore {
    kv: Box<dyn KvStore>,
}

impl PlaylistStore {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Persist `tracks` in order. Best effort: failures are logged and
    /// swallowed, since the playlist can be rebuilt from the music directory.
    pub fn save(&mut self, tracks: &[Track]) {
        if let Err(e) = self.try_save(tracks) {
            log::warn!("{}", crate::error::PlayerError::PersistenceFailure(e));
        }
    }

    fn try_save(&mut self, tracks: &[Track]) -> Result<(), StoreError> {
        let value = serde_json::to_value(tracks)?;
        self.kv.set(PLAYLIST_KEY, value)?;
        log::debug!("saved playlist ({} tracks)", tracks.len());
        Ok(())
    }

    /// Restore the playlist. A missing or undecodable value yields an empty
    /// playlist; entries whose file has disappeared are dropped silently.
    pub fn load(&self) -> Vec<Track> {
        let Some(value) = self.kv.get(PLAYLIST_KEY) else {
            return Vec::new();
        };

        let tracks: Vec<Track> = match serde_json::from_value(value) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("discarding unreadable playlist: {e}");
                return Vec::new();
            }
        };

        let total = tracks.len();
        let kept: Vec<Track> = tracks.into_iter().filter(Track::exists).collect();
        if kept.len() != total {
            log::info!("pruned {} playlist entries with missing files", total - kept.len());
        }
        kept
    }
}
