//! Errors raised by the content store

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse frontmatter in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to load cache {}: {message}", path.display())]
    CacheRead { path: PathBuf, message: String },

    #[error("Failed to write cache: {0}")]
    CacheWrite(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid slug (resolves outside the content directory): {0}")]
    InvalidSlug(String),

    #[error("Cannot sort: no documents are loaded")]
    SortPrecondition,
}

impl StoreError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn cache_read(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::CacheRead {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
