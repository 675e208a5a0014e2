//! Frontmatter parsing for content files
//!
//! Each file starts with a YAML mapping between two `---` delimiters:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust, web]
//! ---
//! Body text...
//! ```
//!
//! The body is kept verbatim, everything after the closing delimiter.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::error::{StoreError, StoreResult};
use crate::domain::{value, Document, DocumentMeta};

/// Frontmatter delimiter
const DELIMITER: &str = "---";

/// Outcome of parsing a single file
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Document(Document),
    /// The published field was set to a falsy value
    Unpublished,
}

/// Splits content into the raw frontmatter block and the body.
///
/// Returns `None` when fewer than two delimiters are present.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let open = content.find(DELIMITER)?;
    let start = open + DELIMITER.len();
    let close = start + content[start..].find(DELIMITER)?;

    Some((&content[start..close], &content[close + DELIMITER.len()..]))
}

/// Parses content files into documents
#[derive(Debug, Clone)]
pub struct DocumentParser {
    extension: String,
    published_field: String,
}

impl DocumentParser {
    pub fn new(extension: impl Into<String>, published_field: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            published_field: published_field.into(),
        }
    }

    /// Strips the content extension from a file name
    pub fn slug_for<'a>(&self, file_name: &'a str) -> &'a str {
        file_name.strip_suffix(self.extension.as_str()).unwrap_or(file_name)
    }

    /// Reads and parses a content file
    pub fn read_from_file(&self, path: &Path) -> StoreResult<Parsed> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::read(path, e))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_markdown(&file_name, &content)
            .map_err(|message| StoreError::parse(path, message))
    }

    /// Parses file content; `file_name` provides the slug
    pub fn parse_markdown(&self, file_name: &str, content: &str) -> Result<Parsed, String> {
        let (yaml, body) = split_frontmatter(content)
            .ok_or_else(|| format!("missing frontmatter delimiters ({} ... {})", DELIMITER, DELIMITER))?;

        let meta = parse_yaml(yaml)?;

        if let Some(flag) = meta.get(&self.published_field) {
            if !value::is_truthy(flag) {
                return Ok(Parsed::Unpublished);
            }
        }

        Ok(Parsed::Document(Document::new(
            self.slug_for(file_name),
            body,
            DocumentMeta::from(meta),
        )))
    }
}

fn parse_yaml(yaml: &str) -> Result<Map<String, Value>, String> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let parsed: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;

    match parsed {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(format!(
            "frontmatter must be a mapping, found {}",
            kind_of(&other)
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
