//! Item document persistence
//!
//! Handles saving and loading the item collection to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/quill/` (configurable via `Config`)
//!
//! Files:
//! - `my_blog_data_v1.json` - Pretty-printed JSON array of item records

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::models::Item;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the item document
///
/// Provides atomic file operations for saving/loading the collection.
pub struct JsonPersistence {
    config: Config,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a document exists on disk
    pub fn exists(&self) -> bool {
        self.config.data_file_path().exists()
    }

    /// Save the full collection to disk using atomic write
    ///
    /// This writes to a temporary file first, then renames it to the target
    /// path, so the document is never left in a partially-written state.
    pub fn save(&self, items: &[Item]) -> StorageResult<()> {
        let document = serde_json::to_string_pretty(items).map_err(StorageError::Encode)?;
        let target_path = self.config.data_file_path();

        atomic_write(&target_path, document.as_bytes())?;
        debug!(count = items.len(), path = %target_path.display(), "saved item document");

        Ok(())
    }

    /// Load the collection from disk
    ///
    /// Returns `None` if the document file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Vec<Item>>> {
        let path = self.config.data_file_path();

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StorageError::ReadError {
                path: path.clone(),
                source: e,
            })?;

        let items = serde_json::from_str(&content)
            .map_err(|e| StorageError::InvalidDocument { path, source: e })?;

        Ok(Some(items))
    }

    /// Delete the stored document
    ///
    /// No-op if nothing has been saved yet.
    pub fn delete(&self) -> StorageResult<()> {
        let path = self.config.data_file_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path))?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    // Write to temp file
    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
