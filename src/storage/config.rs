//! Configuration handling for folio
//!
//! Configuration is layered: built-in defaults, then the global
//! `~/.config/folio/config.toml`, then `folio.toml` in the project directory.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Index cache settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Load from / save to the cache file
    pub enabled: bool,

    /// Location of the cache file (required when enabled)
    pub path: Option<PathBuf>,
}

/// Settings for a [`crate::storage::ContentStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the content files
    pub posts_dir: Option<PathBuf>,

    /// Content file extension, including the leading dot
    pub extension: String,

    /// Documents per page
    pub page_size: usize,

    /// Frontmatter key whose falsy value hides a document
    pub published_field: String,

    /// Frontmatter key holding the tag list
    pub tags_field: String,

    /// Cache settings
    pub cache: CacheConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            posts_dir: None,
            extension: ".md".to_string(),
            page_size: 10,
            published_field: "published".to_string(),
            tags_field: "tags".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.posts_dir = Some(dir.into());
        self
    }

    /// Sets the extension; a leading dot is added when missing
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = normalize_extension(extension);
        self
    }

    /// Enables the index cache at `path`
    pub fn with_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = CacheConfig {
            enabled: true,
            path: Some(path.into()),
        };
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_published_field(mut self, field: impl Into<String>) -> Self {
        self.published_field = field.into();
        self
    }

    pub fn with_tags_field(mut self, field: impl Into<String>) -> Self {
        self.tags_field = field.into();
        self
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "folio", "folio").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration for the project rooted at `project_dir`
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let global = Self::global_config_dir().map(|dir| dir.join("config.toml"));
        Self::load_layered(global.as_deref(), project_dir)
    }

    /// Loads configuration from an explicit global file and a project directory.
    ///
    /// Keys in the project file override keys in the global file, table by
    /// table. Relative paths resolve against the directory of the file that
    /// sets them.
    pub fn load_layered(global: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();

        if let Some(path) = global {
            if let Some(mut table) = read_table(path)? {
                resolve_paths(&mut table, path.parent().unwrap_or(project_dir));
                merge_tables(&mut merged, table);
            }
        }

        if let Some(mut table) = read_table(&project_dir.join(PROJECT_CONFIG_FILE))? {
            resolve_paths(&mut table, project_dir);
            merge_tables(&mut merged, table);
        }

        let mut config: StoreConfig = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

        config.extension = normalize_extension(&config.extension);
        Ok(config)
    }
}

fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Rewrites relative `posts_dir` and `cache.path` in one file's table
fn resolve_paths(table: &mut toml::Table, base: &Path) {
    fn rewrite(value: Option<&mut toml::Value>, base: &Path) {
        if let Some(toml::Value::String(path)) = value {
            *path = resolve(base, path).to_string_lossy().into_owned();
        }
    }

    rewrite(table.get_mut("posts_dir"), base);
    if let Some(toml::Value::Table(cache)) = table.get_mut("cache") {
        rewrite(cache.get_mut("path"), base);
    }
}

fn read_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();

        assert_eq!(config.posts_dir, None);
        assert_eq!(config.extension, ".md");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.published_field, "published");
        assert!(!config.cache.enabled);
        assert!(config.cache.path.is_none());
    }

    #[test]
    fn builder_normalizes_extension() {
        let config = StoreConfig::new().with_extension("txt");
        assert_eq!(config.extension, ".txt");

        let config = StoreConfig::new().with_extension(".markdown");
        assert_eq!(config.extension, ".markdown");
    }

    #[test]
    fn parse_project_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            r#"
posts_dir = "content"
extension = "mdx"
page_size = 3

[cache]
enabled = true
path = ".cache/index.json"
"#,
        )
        .unwrap();

        let config = StoreConfig::load_layered(None, dir.path()).unwrap();
        assert_eq!(config.posts_dir, Some(dir.path().join("content")));
        assert_eq!(config.extension, ".mdx");
        assert_eq!(config.page_size, 3);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, Some(dir.path().join(".cache/index.json")));
        assert_eq!(config.published_field, "published");
    }

    #[test]
    fn project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "page_size = 25\npublished_field = \"live\"\n[cache]\nenabled = true\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "page_size = 5\n[cache]\npath = \"idx.json\"\n",
        )
        .unwrap();

        let config = StoreConfig::load_layered(Some(&global), dir.path()).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.published_field, "live");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, Some(dir.path().join("idx.json")));
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config =
            StoreConfig::load_layered(Some(&dir.path().join("nope.toml")), dir.path()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "page_size = [").unwrap();

        let err = StoreConfig::load_layered(None, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn global_paths_resolve_against_global_dir() {
        let dir = TempDir::new().unwrap();
        let global_dir = dir.path().join("global");
        let project_dir = dir.path().join("project");
        fs::create_dir_all(&global_dir).unwrap();
        fs::create_dir_all(&project_dir).unwrap();

        let global = global_dir.join("config.toml");
        fs::write(
            &global,
            "posts_dir = \"shared\"\n[cache]\nenabled = true\npath = \"idx.json\"\n",
        )
        .unwrap();

        let config = StoreConfig::load_layered(Some(&global), &project_dir).unwrap();
        assert_eq!(config.posts_dir, Some(global_dir.join("shared")));
        assert_eq!(config.cache.path, Some(global_dir.join("idx.json")));

        // Project keys still win and resolve against the project
        fs::write(project_dir.join(PROJECT_CONFIG_FILE), "posts_dir = \"posts\"\n").unwrap();
        let config = StoreConfig::load_layered(Some(&global), &project_dir).unwrap();
        assert_eq!(config.posts_dir, Some(project_dir.join("posts")));
        assert_eq!(config.cache.path, Some(global_dir.join("idx.json")));
    }
}
