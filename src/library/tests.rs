use super::import::{default_title, is_audio_file};
use super::*;
use crate::config::LibrarySettings;
use crate::error::PlayerError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn exts() -> Vec<String> {
    LibrarySettings::default().extensions
}

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let e = exts();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.flac"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.m4a"), &e));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &e));
    assert!(!is_audio_file(Path::new("/tmp/a"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.ogg"), &[".OGG".to_string()]));
}

#[test]
fn default_title_strips_extension_only() {
    assert_eq!(default_title(Path::new("/music/My Song.mp3")), "My Song");
    assert_eq!(default_title(Path::new("/music/live.at.wembley.flac")), "live.at.wembley");
    assert_eq!(default_title(Path::new("/music/noext")), "noext");
}

#[test]
fn tracks_compare_by_id_not_content() {
    let a = Track::new("/music/a.mp3", "Same");
    let b = Track::new("/music/a.mp3", "Same");
    assert_ne!(a, b);

    let mut renamed = a.clone();
    renamed.title = "Other".into();
    assert_eq!(a, renamed);
}

#[test]
fn copy_into_uses_unique_name_and_keeps_extension() {
    let src_dir = tempdir().unwrap();
    let music = tempdir().unwrap();
    let src = src_dir.path().join("Blue in Green.flac");
    fs::write(&src, b"flac bytes").unwrap();

    let first = copy_into(music.path(), &src, &exts()).unwrap();
    let second = copy_into(music.path(), &src, &exts()).unwrap();

    assert_eq!(first.title, "Blue in Green");
    assert_ne!(first.id(), second.id());
    assert_ne!(first.location(), second.location());
    assert_eq!(first.location().parent(), Some(music.path()));
    assert_eq!(first.location().extension().unwrap(), "flac");
    assert_eq!(fs::read(first.location()).unwrap(), b"flac bytes");
    // the original stays where it was
    assert!(src.is_file());
}

#[test]
fn copy_into_creates_missing_music_dir() {
    let src_dir = tempdir().unwrap();
    let root = tempdir().unwrap();
    let music = root.path().join("nested").join("music");
    let src = src_dir.path().join("a.mp3");
    fs::write(&src, b"x").unwrap();

    let track = copy_into(&music, &src, &exts()).unwrap();
    assert!(track.exists());
}

#[test]
fn copy_into_rejects_missing_and_non_audio_files() {
    let src_dir = tempdir().unwrap();
    let music = tempdir().unwrap();

    let missing = src_dir.path().join("gone.mp3");
    assert!(matches!(
        copy_into(music.path(), &missing, &exts()),
        Err(PlayerError::ImportFailure { .. })
    ));

    let text = src_dir.path().join("notes.txt");
    fs::write(&text, b"hello").unwrap();
    assert!(matches!(
        copy_into(music.path(), &text, &exts()),
        Err(PlayerError::ImportFailure { .. })
    ));

    assert_eq!(fs::read_dir(music.path()).unwrap().count(), 0);
}

#[test]
fn scan_returns_plain_files_untouched() {
    let p = Path::new("/definitely/not/here.txt");
    assert_eq!(scan(p, &LibrarySettings::default()), vec![p.to_path_buf()]);
}

#[test]
fn scan_walks_directories_for_audio_sorted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"x").unwrap();
    fs::write(dir.path().join("a.ogg"), b"x").unwrap();
    fs::write(dir.path().join("c.txt"), b"x").unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("d.wav"), b"x").unwrap();

    let files = scan(dir.path(), &LibrarySettings::default());
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.ogg", "b.MP3", "d.wav"]);

    let flat = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    assert_eq!(scan(dir.path(), &flat).len(), 2);
}

#[test]
fn track_location_accepts_file_uris() {
    let json = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","location":"file:///music/My%20Song.mp3","title":"My Song"}"#;
    let t: Track = serde_json::from_str(json).unwrap();
    assert_eq!(t.location(), Path::new("/music/My Song.mp3"));

    let plain = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","location":"/music/100%.mp3","title":"x"}"#;
    let t: Track = serde_json::from_str(plain).unwrap();
    assert_eq!(t.location(), Path::new("/music/100%.mp3"));
}

fn track_at(location: &str) -> Result<Track, serde_json::Error> {
    serde_json::from_value(serde_json::json!({
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "location": location,
        "title": "x",
    }))
}

#[test]
fn track_location_accepts_localhost_file_uris() {
    let t = track_at("file://localhost/tmp/a%20b.mp3").unwrap();
    assert_eq!(t.location(), Path::new("/tmp/a b.mp3"));
}

#[test]
fn track_location_rejects_remote_hosts_and_escaped_slashes() {
    assert!(track_at("file://example.com/tmp/a.mp3").is_err());
    assert!(track_at("file:///tmp/a%2Fb.mp3").is_err());
    assert!(track_at("file:///tmp/a%2fb.mp3").is_err());
    assert!(track_at("").is_err());
}
