//! Document domain model
//!
//! A document is one content file: the frontmatter fields, the body text
//! that follows them, and the `url` slug derived from the file name.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Frontmatter fields - schema-less key-value pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentMeta(Map<String, Value>);

impl DocumentMeta {
    /// Creates empty metadata
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes a value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all key-value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for DocumentMeta {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A parsed content document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File name without the content extension
    pub url: String,

    /// Everything after the closing frontmatter delimiter
    #[serde(default)]
    pub body: String,

    /// Frontmatter fields
    #[serde(flatten)]
    pub meta: DocumentMeta,
}

impl Document {
    /// Builds a document from parsed frontmatter.
    ///
    /// `url` and `body` are derived, so frontmatter keys with those names
    /// are dropped in favour of the derived values.
    pub fn new(url: impl Into<String>, body: impl Into<String>, mut meta: DocumentMeta) -> Self {
        meta.remove("url");
        meta.remove("body");
        Self {
            url: url.into(),
            body: body.into(),
            meta,
        }
    }

    /// Looks up a field by name, including the derived `url` and `body`
    pub fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        match name {
            "url" => Some(Cow::Owned(Value::String(self.url.clone()))),
            "body" => Some(Cow::Owned(Value::String(self.body.clone()))),
            _ => self.meta.get(name).map(Cow::Borrowed),
        }
    }

    /// Convenience accessor for string fields such as `title`
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.meta.get(name).and_then(Value::as_str)
    }
}

/// Direction for [`crate::storage::ContentStore::sort_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}
