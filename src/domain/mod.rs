//! Domain models for folio
//!
//! Contains the document model and value semantics without any I/O concerns.

mod document;
pub mod value;

pub use document::{Document, DocumentMeta, SortOrder};
