//! Slug handling for single-document lookups
//!
//! A slug is cleaned of a small denylist of characters, then joined to the
//! content directory. The joined path is canonicalized and must stay inside
//! the canonical content directory; anything else is rejected.

use std::path::{Component, Path, PathBuf};

use super::error::{StoreError, StoreResult};

/// Sequences removed from slugs before they touch the filesystem
const DENYLIST: &[&str] = &["../", "..\\", "~", "|", "*", "$", "'", "\"", "`"];

/// Removes denylisted sequences from a slug
pub fn sanitize(slug: &str) -> String {
    DENYLIST
        .iter()
        .fold(slug.trim().to_string(), |acc, pattern| acc.replace(pattern, ""))
}

/// Resolves `<dir>/<slug><extension>` to a canonical path inside `dir`.
///
/// Fails with [`StoreError::InvalidSlug`] when the slug would leave the
/// directory and [`StoreError::NotFound`] when the file does not exist.
pub fn resolve(dir: &Path, slug: &str, extension: &str) -> StoreResult<PathBuf> {
    if slug.is_empty() {
        return Err(StoreError::NotFound(String::new()));
    }

    let relative = PathBuf::from(format!("{}{}", slug, extension));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(StoreError::InvalidSlug(slug.to_string()));
    }

    let root = dir.canonicalize().map_err(|e| StoreError::read(dir, e))?;

    let canonical = match root.join(&relative).canonicalize() {
        Ok(path) => path,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        Err(e) => return Err(StoreError::read(root.join(&relative), e)),
    };

    if !canonical.starts_with(&root) {
        return Err(StoreError::InvalidSlug(slug.to_string()));
    }

    if !canonical.is_file() {
        return Err(StoreError::NotFound(slug.to_string()));
    }

    Ok(canonical)
}
