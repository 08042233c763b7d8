// src/watch/cache.rs

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Last seen content hash per file.
///
/// Editors often write a file without changing it (save-all, format on
/// save). Those events are dropped here instead of rebuilding.
#[derive(Debug, Default)]
pub struct FileCache {
    hashes: HashMap<PathBuf, blake3::Hash>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current contents of `path` and report whether they differ
    /// from the last time it was seen.
    ///
    /// Unknown files, removed files and unreadable files all count as
    /// changed.
    pub fn has_changed(&mut self, path: &Path) -> bool {
        match content_hash(path) {
            Ok(hash) => {
                let changed = self.hashes.insert(path.to_path_buf(), hash) != Some(hash);
                if !changed {
                    debug!(path = ?path, "content unchanged");
                }
                changed
            }
            Err(err) => {
                debug!(path = ?path, error = %err, "could not hash; treating as changed");
                self.hashes.remove(path);
                true
            }
        }
    }

    /// Remember the current contents without reporting a change.
    pub fn prime(&mut self, path: &Path) {
        if let Ok(hash) = content_hash(path) {
            self.hashes.insert(path.to_path_buf(), hash);
        }
    }
}

fn content_hash(path: &Path) -> Result<blake3::Hash> {
    let file = File::open(path).with_context(|| format!("opening {:?} for hashing", path))?;
    let mut hasher = blake3::Hasher::new();
    hasher
        .update_reader(file)
        .with_context(|| format!("hashing {:?}", path))?;
    Ok(hasher.finalize())
}
