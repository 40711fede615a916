use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::import::is_audio_file;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand an import argument into the audio files it names.
///
/// A file is returned as-is (so a non-audio file still reaches the importer
/// and gets reported); a directory is walked for audio files, sorted by path
/// so an import keeps a predictable order.
pub fn scan(target: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    if !target.is_dir() {
        return vec![target.to_path_buf()];
    }

    let mut walker = WalkDir::new(target).follow_links(settings.follow_links);
    // Non-recursive = only the root directory.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, &settings.extensions))
        .collect();

    files.sort();
    files
}
