//! JSON file-based session store.
//!
//! Keeps the session entries in a small human-readable JSON file. Every
//! mutation is flushed with an atomic write (write-to-temp + rename) so a crash
//! never leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "complexappToken": "eyJhbGciOi...",
//!     "complexappUsername": "alice",
//!     "complexappAvatar": "https://gravatar.com/avatar/..."
//!   }
//! }
//! ```

use crate::domain::error::{AppError, Result};
use crate::storage::backend::SessionStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the file format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file session store.
///
/// The whole file is loaded on creation and rewritten on each mutation. This
/// type is `Send` but not `Sync`; the store container serializes access to it.
pub struct JsonSessionStore {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonSessionStore {
    /// Creates or opens a session file.
    ///
    /// Parent directories are created automatically. A missing file yields an
    /// empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use complexapp::storage::JsonSessionStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonSessionStore::new(PathBuf::from("/tmp/complexapp/session.json"))?;
    /// # Ok::<(), complexapp::AppError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening session file");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no session file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(entries = data.entries.len(), "session file ready");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| AppError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(version = data.version, entries = data.entries.len(), "loaded session file");
        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| AppError::Storage(format!("failed to serialize session file: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "session file saved");
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_item", key = %key).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_item", key = %key).entered();

        if self.data.entries.remove(key).is_some() {
            self.dirty = true;
        }
        self.save_to_file()
    }
}

impl Drop for JsonSessionStore {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save session file on drop");
            }
        }
    }
}
