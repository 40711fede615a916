use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::PlayerError;

use super::model::Track;

/// Whether `path` carries one of the configured audio `extensions`
/// (case-insensitive, leading dots ignored).
pub fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

/// Title shown for a freshly imported file: its name without the extension.
pub fn default_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Copy `source` into `music_dir` under a fresh unique name and build the
/// playlist entry for the copy.
///
/// The copy keeps the original extension so the decoder can still sniff the
/// format from it. Nothing is left behind in `music_dir` on failure.
pub fn copy_into(music_dir: &Path, source: &Path, extensions: &[String]) -> Result<Track, PlayerError> {
    if !source.is_file() {
        return Err(PlayerError::import(source, "not a readable file"));
    }
    if !is_audio_file(source, extensions) {
        return Err(PlayerError::import(source, "not an audio file"));
    }

    fs::create_dir_all(music_dir).map_err(|e| PlayerError::import(source, e))?;

    let mut file_name = Uuid::new_v4().to_string();
    if let Some(ext) = source.extension().and_then(|s| s.to_str()) {
        file_name.push('.');
        file_name.push_str(ext);
    }
    let destination = music_dir.join(file_name);

    if let Err(e) = fs::copy(source, &destination) {
        let _ = fs::remove_file(&destination);
        return Err(PlayerError::import(source, e));
    }

    log::info!("imported {} as {}", source.display(), destination.display());
    Ok(Track::new(destination, default_title(source)))
}
