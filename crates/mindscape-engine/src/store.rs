//! Full-replace persistence for the post collection.
//!
//! The whole collection is stored as one JSON array under a single key.
//! A missing blob loads as empty; a blob that is not a JSON array loads as
//! empty and is logged. Records that fail validation, such as a sentiment
//! outside [-1, 1], are dropped one by one and the rest load normally.

use mindscape_core::{AnalyzedPost, PostId, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default blob key
pub const STORAGE_KEY: &str = "inside_out_memories";

/// Storage backend for the post collection
pub trait MemoryStore: Send + Sync {
    /// Replace the stored collection
    fn save(&self, posts: &[AnalyzedPost]) -> Result<()>;

    /// Stored collection, or empty when absent or unreadable
    fn load(&self) -> Vec<AnalyzedPost>;

    /// Remove the stored blob
    fn clear(&self) -> Result<()>;

    /// Remove one post by id and return what remains
    fn delete(&self, id: &PostId) -> Result<Vec<AnalyzedPost>> {
        let remaining: Vec<AnalyzedPost> = self
            .load()
            .into_iter()
            .filter(|p| p.id() != id)
            .collect();
        self.save(&remaining)?;
        Ok(remaining)
    }
}

fn decode(key: &str, blob: &str) -> Vec<AnalyzedPost> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "corrupt memory blob, loading empty collection");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!(key, index, error = %e, "dropping invalid memory record");
                None
            }
        })
        .collect()
}

/// Process-local store keeping JSON blobs in a map
#[derive(Debug)]
pub struct InMemoryStore {
    key: String,
    blobs: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_key(STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Raw blob under the store key
    pub fn raw(&self) -> Option<String> {
        self.blobs.read().get(&self.key).cloned()
    }

    /// Overwrite the raw blob under the store key
    pub fn set_raw(&self, blob: impl Into<String>) {
        self.blobs.write().insert(self.key.clone(), blob.into());
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore for InMemoryStore {
    fn save(&self, posts: &[AnalyzedPost]) -> Result<()> {
        let blob = serde_json::to_string(posts)?;
        self.set_raw(blob);
        Ok(())
    }

    fn load(&self) -> Vec<AnalyzedPost> {
        self.raw()
            .map(|blob| decode(&self.key, &blob))
            .unwrap_or_default()
    }

    fn clear(&self) -> Result<()> {
        self.blobs.write().remove(&self.key);
        Ok(())
    }
}

/// File-backed store writing `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    key: String,
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = directory.as_ref().join(format!("{key}.json"));
        Self { key, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoryStore for JsonFileStore {
    fn save(&self, posts: &[AnalyzedPost]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves a half-written blob
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(posts)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Vec<AnalyzedPost> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => decode(&self.key, &blob),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read memory blob");
                Vec::new()
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
