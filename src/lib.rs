//! folio - a flat-file content store
//!
//! folio loads a directory of text documents, each a YAML frontmatter block
//! followed by a body, into an ordered in-memory index. The index can be
//! paged, sorted by any frontmatter field and filtered by tag, and may be
//! cached on disk as JSON to skip rescanning on the next start.
//!
//! ```no_run
//! use folio::{ContentStore, SortOrder, StoreConfig};
//!
//! # fn main() -> Result<(), folio::StoreError> {
//! let config = StoreConfig::new()
//!     .with_posts_dir("posts")
//!     .with_cache(".cache/index.json")
//!     .with_page_size(5);
//!
//! let mut store = ContentStore::new(config);
//! store.load()?;
//! store.sort_by("date", SortOrder::Desc)?;
//!
//! for entry in store.page(1) {
//!     println!("{}", entry.document.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Document, DocumentMeta, SortOrder};
pub use storage::{ContentIndex, ContentStore, Entry, StoreConfig, StoreError};
