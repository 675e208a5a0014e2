//! # Storage Layer
//!
//! Loading flat content files into an in-memory index, and the optional
//! on-disk cache of that index.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Documents | YAML frontmatter + body | `{posts_dir}/{slug}{extension}` |
//! | Index cache | JSON object, file name to document | `cache.path` (optional) |
//! | Config | TOML | `folio.toml`, `~/.config/folio/config.toml` |
//!
//! ## Concurrency
//!
//! Everything is synchronous and single-threaded. A [`ContentStore`] owns its
//! index; callers sharing one across threads must serialize access. Cache
//! writes are atomic (temp file + rename).
//!
//! ## Key Types
//!
//! - [`ContentStore`] - Load content and query it
//! - [`ContentIndex`] - Ordered file name to document mapping
//! - [`IndexCache`] - JSON snapshot of an index
//! - [`StoreConfig`] - Store configuration

mod cache;
mod config;
mod error;
mod index;
mod markdown;
pub mod slug;
mod store;

pub use cache::IndexCache;
pub use config::{CacheConfig, ConfigError, StoreConfig, PROJECT_CONFIG_FILE};
pub use error::{StoreError, StoreResult};
pub use index::{ContentIndex, Entry};
pub use markdown::{split_frontmatter, DocumentParser, Parsed};
pub use store::ContentStore;
