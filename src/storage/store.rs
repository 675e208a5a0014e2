//! The content store: loading plus queries over the loaded index

use std::fs;
use std::path::Path;

use super::cache::IndexCache;
use super::config::StoreConfig;
use super::error::{StoreError, StoreResult};
use super::index::{ContentIndex, Entry};
use super::markdown::{DocumentParser, Parsed};
use super::slug;
use crate::domain::{Document, SortOrder};

/// Loads content files and answers queries about them
#[derive(Debug, Clone)]
pub struct ContentStore {
    config: StoreConfig,
    index: ContentIndex,
}

impl ContentStore {
    /// Creates a store with an empty index. Nothing is read until [`load`](Self::load).
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            index: ContentIndex::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut StoreConfig {
        &mut self.config
    }

    /// The loaded index
    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    fn parser(&self) -> DocumentParser {
        DocumentParser::new(&self.config.extension, &self.config.published_field)
    }

    /// The configured cache, when caching is enabled
    fn cache(&self) -> StoreResult<Option<IndexCache>> {
        if !self.config.cache.enabled {
            return Ok(None);
        }

        match &self.config.cache.path {
            Some(path) => Ok(Some(IndexCache::new(path))),
            None => Err(StoreError::CacheWrite(
                "caching is enabled but no cache path is configured".to_string(),
            )),
        }
    }

    fn posts_dir(&self) -> StoreResult<&Path> {
        self.config
            .posts_dir
            .as_deref()
            .ok_or_else(|| StoreError::Config("posts directory is not set".to_string()))
    }

    /// Populates the index from the cache, or by scanning the posts directory.
    ///
    /// Replaces whatever was loaded before. Returns the number of documents.
    pub fn load(&mut self) -> StoreResult<usize> {
        let cache = self.cache()?;

        if let Some(cache) = cache.as_ref().filter(|c| c.exists()) {
            self.index = cache.read()?;
            return Ok(self.index.len());
        }

        self.index = self.scan()?;

        if let Some(cache) = cache {
            cache.write(&self.index)?;
        }

        Ok(self.index.len())
    }

    /// Scans the posts directory and parses every matching file.
    ///
    /// Files are visited in file name order. The first unreadable or
    /// unparsable file aborts the scan.
    fn scan(&self) -> StoreResult<ContentIndex> {
        let dir = self.posts_dir()?;
        let extension = self.config.extension.as_str();
        let parser = self.parser();

        tracing::debug!(dir = %dir.display(), extension, "scanning content directory");

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| StoreError::read(dir, e))? {
            let entry = entry.map_err(|e| StoreError::read(dir, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::trace!(file = ?raw, "skipping file with non UTF-8 name");
                    continue;
                }
            };

            if name.len() > extension.len()
                && name.ends_with(extension)
                && entry.path().is_file()
            {
                files.push(name);
            }
        }
        files.sort();

        let mut index = ContentIndex::new();
        for name in files {
            match parser.read_from_file(&dir.join(&name))? {
                Parsed::Document(doc) => index.insert(name, doc),
                Parsed::Unpublished => {
                    tracing::trace!(file = %name, "skipping unpublished document");
                }
            }
        }

        tracing::debug!(documents = index.len(), "scan complete");
        Ok(index)
    }

    /// Finds one document by slug.
    ///
    /// Tries the loaded index, then the cache, then the file itself. The
    /// cache only populates the index when nothing is loaded yet, so the
    /// order from an earlier sort survives. A document found on disk is
    /// returned but not added to the index.
    pub fn load_document(&mut self, slug: &str) -> StoreResult<Document> {
        let slug = slug::sanitize(slug);
        let file_name = format!("{}{}", slug, self.config.extension);

        if let Some(doc) = self.index.get(&file_name) {
            return Ok(doc.clone());
        }

        if let Some(cache) = self.cache()?.filter(|c| c.exists()) {
            let cached = cache.read()?;
            let hit = cached.get(&file_name).cloned();
            if self.index.is_empty() {
                self.index = cached;
            }
            if let Some(doc) = hit {
                return Ok(doc);
            }
        }

        let path = slug::resolve(self.posts_dir()?, &slug, &self.config.extension)?;
        match self.parser().read_from_file(&path)? {
            Parsed::Document(doc) => Ok(doc),
            Parsed::Unpublished => Err(StoreError::NotFound(slug)),
        }
    }

    /// Deletes the cache file. Returns whether a file was removed.
    pub fn clear_cache(&self) -> StoreResult<bool> {
        let path = self.config.cache.path.as_ref().ok_or_else(|| {
            StoreError::CacheWrite("no cache path is configured".to_string())
        })?;
        IndexCache::new(path).clear()
    }

    /// Reorders the index by `field`; missing values sort last
    pub fn sort_by(&mut self, field: &str, order: SortOrder) -> StoreResult<()> {
        if self.index.is_empty() {
            return Err(StoreError::SortPrecondition);
        }

        tracing::debug!(field, %order, "sorting index");
        self.index.sort_by(field, order);
        Ok(())
    }

    /// Every loaded document, in index order
    pub fn all(&self) -> &[Entry] {
        self.index.entries()
    }

    /// Looks up a loaded document by file name
    pub fn get(&self, file_name: &str) -> Option<&Document> {
        self.index.get(file_name)
    }

    pub fn count(&self) -> usize {
        self.index.len()
    }

    pub fn page_count(&self) -> usize {
        self.index.page_count(self.config.page_size)
    }

    /// Documents on 1-indexed `page`; empty when out of range
    pub fn page(&self, page: usize) -> &[Entry] {
        self.index.page(page, self.config.page_size)
    }

    /// Documents whose `field` list contains `tag`.
    ///
    /// The tag is decoded as a form-encoded query value: `+` is a space and
    /// percent-escapes are expanded, so `web+dev` and `web%20dev` both match
    /// `web dev` while `c%2B%2B` matches `c++`.
    pub fn by_tag(&self, tag: &str, field: &str) -> Vec<&Entry> {
        if self.index.is_empty() {
            return Vec::new();
        }

        let spaced = tag.replace('+', " ");
        let decoded = urlencoding::decode(&spaced)
            .map(|t| t.into_owned())
            .unwrap_or(spaced);

        self.index.by_tag(&decoded, field)
    }
}
