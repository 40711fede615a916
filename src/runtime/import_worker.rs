//! Background copying for imports started from the TUI, so a large file or
//! a slow disk never stalls the event loop. Results are handed back to the
//! loop, which passes them to `PlaybackController::accept_import`.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryIter};
use std::thread;

use crate::config::LibrarySettings;
use crate::error::PlayerError;
use crate::library::{self, Track};

pub struct ImportWorker {
    jobs: Sender<PathBuf>,
    results: Receiver<Result<Track, PlayerError>>,
}

impl ImportWorker {
    pub fn spawn(music_dir: PathBuf, settings: LibrarySettings) -> Self {
        let (jobs, job_rx) = mpsc::channel::<PathBuf>();
        let (result_tx, results) = mpsc::channel();

        thread::spawn(move || {
            for target in job_rx {
                let found = library::scan(&target, &settings);
                if found.is_empty() {
                    let err = PlayerError::import(&target, "no audio files found");
                    if result_tx.send(Err(err)).is_err() {
                        return;
                    }
                    continue;
                }
                for path in found {
                    let result = library::copy_into(&music_dir, &path, &settings.extensions);
                    if result_tx.send(result).is_err() {
                        return;
                    }
                }
            }
        });

        Self { jobs, results }
    }

    /// Queue a file or directory for import.
    pub fn submit(&self, target: PathBuf) {
        if self.jobs.send(target).is_err() {
            log::warn!("import worker is gone");
        }
    }

    pub fn finished(&self) -> TryIter<'_, Result<Track, PlayerError>> {
        self.results.try_iter()
    }
}

/// Expand a leading `~` so pasted shell paths work.
pub fn expand_home(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}
