use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One playlist entry.
///
/// Identity is the `id`: two tracks pointing at the same file with the same
/// title are still different entries if their ids differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    id: Uuid,
    #[serde(with = "location")]
    location: PathBuf,
    pub title: String,
}

impl Track {
    /// Create a track with a freshly generated id.
    pub fn new(location: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), location, title)
    }

    /// Rebuild a track whose id is already known (e.g. restored from disk).
    pub fn with_id(id: Uuid, location: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            id,
            location: location.into(),
            title: title.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Whether the backing file is still on disk.
    pub fn exists(&self) -> bool {
        self.location.is_file()
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Locations are stored as plain absolute paths. Older state files may hold
/// `file://` URIs, which are accepted on read.
mod location {
    use std::path::PathBuf;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S: Serializer>(path: &PathBuf, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&path.to_string_lossy())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PathBuf, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Err(D::Error::custom("empty track location"));
        }
        if !raw.starts_with("file:") {
            return Ok(PathBuf::from(raw));
        }

        let url = Url::parse(&raw).map_err(|e| D::Error::custom(format!("bad file URI {raw}: {e}")))?;
        // An escaped slash would otherwise turn into a path separator.
        if url.path().to_ascii_lowercase().contains("%2f") {
            return Err(D::Error::custom(format!("escaped slash in file URI {raw}")));
        }
        url.to_file_path()
            .map_err(|()| D::Error::custom(format!("not a local file URI: {raw}")))
    }
}
