//! Durable pagination checkpoints
//!
//! One JSON file maps each stream key to the last page that fully landed
//! (API fetch, storage upserts, page handler all succeeded). The file is
//! loaded once at open and rewritten atomically after every page, so a
//! crash mid-write never leaves a partially visible checkpoint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::CheckpointError;

type Result<T> = std::result::Result<T, CheckpointError>;

/// Fetch progress for one paginated stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Last page index successfully processed, 1-based
    pub last_page: u32,

    /// True once the stream has been fully drained
    #[serde(default)]
    pub completed: bool,
}

/// File-backed store of per-stream checkpoints
pub struct CheckpointStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Checkpoint>>,
}

impl CheckpointStore {
    /// Open the store, loading any existing checkpoint file
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }

    /// Read the checkpoint for a stream key, if one was ever recorded
    pub fn get(&self, key: &str) -> Option<Checkpoint> {
        self.lock().get(key).copied()
    }

    /// Record that `page` fully landed for `key`, creating the record if
    /// absent. The write is durable before this returns.
    pub fn put(&self, key: &str, page: u32) -> Result<()> {
        let snapshot = {
            let mut entries = self.lock();
            entries.insert(
                key.to_string(),
                Checkpoint {
                    last_page: page,
                    completed: false,
                },
            );
            entries.clone()
        };
        self.persist(&snapshot)
    }

    /// Mark a stream as fully drained
    pub fn mark_completed(&self, key: &str) -> Result<()> {
        let snapshot = {
            let mut entries = self.lock();
            if let Some(cp) = entries.get_mut(key) {
                cp.completed = true;
            }
            entries.clone()
        };
        self.persist(&snapshot)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Checkpoint>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write the full map to a temp file, then rename over the target so a
    /// partial write is never visible.
    fn persist(&self, entries: &HashMap<String, Checkpoint>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
