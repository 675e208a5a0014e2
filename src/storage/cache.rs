//! JSON cache of the parsed content index
//!
//! The cache is a snapshot of the whole [`ContentIndex`] written after a
//! directory scan. It is never updated incrementally and has no staleness
//! check: it is replaced by the next scan-based load or removed by
//! [`IndexCache::clear`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::error::{StoreError, StoreResult};
use super::index::ContentIndex;

/// On-disk snapshot of a content index
#[derive(Debug, Clone)]
pub struct IndexCache {
    path: PathBuf,
}

impl IndexCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// When the cache was last written, if it exists
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Reads the cached index. An empty or malformed cache is an error.
    pub fn read(&self) -> StoreResult<ContentIndex> {
        let file = File::open(&self.path).map_err(|e| StoreError::cache_read(&self.path, e))?;

        let index: ContentIndex = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::cache_read(&self.path, e))?;

        if index.is_empty() {
            return Err(StoreError::cache_read(&self.path, "cache is empty"));
        }

        tracing::debug!(path = %self.path.display(), documents = index.len(), "loaded index from cache");
        Ok(index)
    }

    /// Writes the index atomically (temp file + rename), replacing any existing cache
    pub fn write(&self, index: &ContentIndex) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::CacheWrite(format!("{}: {}", parent.display(), e))
            })?;
        }

        let temp_path = self.temp_path();

        let file = File::create(&temp_path).map_err(|e| write_error(&temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, index).map_err(|e| write_error(&temp_path, e))?;
        writer.flush().map_err(|e| write_error(&temp_path, e))?;
        drop(writer);

        fs::rename(&temp_path, &self.path).map_err(|e| {
            StoreError::CacheWrite(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %self.path.display(), documents = index.len(), "wrote index cache");
        Ok(())
    }

    /// Deletes the cache file. Returns false if there was nothing to delete.
    pub fn clear(&self) -> StoreResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "cleared index cache");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::CacheWrite(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> StoreError {
    StoreError::CacheWrite(format!("{}: {}", path.display(), e))
}
