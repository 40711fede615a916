//! Error types surfaced by the playback controller.
//!
//! Lower layers (`audio`, `store`) carry their own error enums; they are
//! folded into `PlayerError` at the controller boundary, where every failure
//! ends up in the controller's "last error" slot instead of unwinding.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::EngineError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The track's backing file is gone.
    #[error("file not found: {title}")]
    FileMissing { title: String, path: PathBuf },

    /// The engine could not open or decode the file.
    #[error("cannot play {title}: {source}")]
    DecodeFailure {
        title: String,
        #[source]
        source: EngineError,
    },

    /// Copying a file into the managed music directory failed.
    #[error("import failed for {}: {reason}", path.display())]
    ImportFailure { path: PathBuf, reason: String },

    /// Removing a track's file failed. The playlist entry is still removed.
    #[error("could not delete {}: {source}", path.display())]
    DeleteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the playlist failed. Only ever logged.
    #[error("could not save playlist: {0}")]
    PersistenceFailure(#[from] StoreError),

    #[error("no track loaded")]
    NoTrackLoaded,
}

impl PlayerError {
    pub(crate) fn import(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ImportFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
