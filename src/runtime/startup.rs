use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::{self, LibrarySettings};
use crate::controller::{ControllerOptions, PlaybackController};
use crate::library;

/// Send `log` output to the configured file. The terminal belongs to the TUI,
/// so nothing is written to stderr once it is up. `RUST_LOG` wins over
/// `log.level`.
pub fn init_logging(settings: &config::Settings) {
    let path = settings.log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("encore: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let result = env_logger::Builder::new()
        .parse_filters(&settings.log.level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    if let Err(e) = result {
        eprintln!("encore: logger already initialised: {e}");
    }
}

pub fn controller_options(settings: &config::Settings) -> ControllerOptions {
    ControllerOptions {
        music_dir: settings.music_dir(),
        extensions: settings.library.extensions.clone(),
        poll_interval: settings.poll_interval(),
        play_mode: settings.playback.play_mode.into(),
    }
}

/// Import every file named on the command line, walking directories.
///
/// Every launch copies its arguments again; only repeats within one command
/// line are skipped.
pub fn import_args<I>(controller: &mut PlaybackController, settings: &config::Settings, args: I)
where
    I: IntoIterator<Item = String>,
{
    for path in import_targets(args, &settings.library) {
        controller.import_track(&path);
    }
}

/// Expand arguments into the files to import, in order, each source once.
fn import_targets<I>(args: I, settings: &LibrarySettings) -> Vec<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for arg in args {
        let found = library::scan(Path::new(&arg), settings);
        if found.is_empty() {
            log::info!("no audio files under {arg}");
        }
        for path in found {
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                targets.push(path);
            } else {
                log::debug!("skipping repeated {}", path.display());
            }
        }
    }
    targets
}
