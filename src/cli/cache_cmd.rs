//! Cache CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::storage::{ContentStore, IndexCache, StoreConfig};

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Rescan the content directory and rewrite the cache
    Rebuild,

    /// Delete the cache file
    Clear,

    /// Show cache status
    Status,
}

pub fn run(cmd: CacheCommands, output: &Output, config: StoreConfig) -> Result<()> {
    match cmd {
        CacheCommands::Rebuild => rebuild(output, config),
        CacheCommands::Clear => clear(output, config),
        CacheCommands::Status => status(output, config),
    }
}

fn require_cache(config: &StoreConfig) -> Result<IndexCache> {
    match (&config.cache.path, config.cache.enabled) {
        (Some(path), true) => Ok(IndexCache::new(path)),
        _ => anyhow::bail!("Caching is not enabled. Pass --cache <PATH> or set [cache] in folio.toml."),
    }
}

fn rebuild(output: &Output, config: StoreConfig) -> Result<()> {
    require_cache(&config)?;
    let mut store = ContentStore::new(config);
    output.verbose("Rebuilding cache from source files");

    let start = std::time::Instant::now();
    store.clear_cache()?;
    let count = store.load()?;
    let duration = start.elapsed();

    if output.is_json() {
        output.data(&serde_json::json!({
            "rebuilt": true,
            "duration_ms": duration.as_millis(),
            "documents": count,
        }));
    } else {
        output.success(&format!("Cache rebuilt in {:?} ({} documents)", duration, count));
    }

    Ok(())
}

fn clear(output: &Output, config: StoreConfig) -> Result<()> {
    let store = ContentStore::new(config);
    let removed = store.clear_cache()?;

    if removed {
        output.success("Cache cleared");
    } else {
        output.success("No cache to clear");
    }

    Ok(())
}

fn status(output: &Output, config: StoreConfig) -> Result<()> {
    let cache = require_cache(&config)?;
    let modified = cache.modified();
    let documents = if cache.exists() {
        cache.read().ok().map(|index| index.len())
    } else {
        None
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": cache.path().display().to_string(),
            "exists": cache.exists(),
            "modified": modified,
            "documents": documents,
        }));
    } else {
        println!("Cache Status");
        println!("{}", "=".repeat(40));
        println!("Path: {}", cache.path().display());
        match modified {
            Some(time) => println!("Written: {}", time.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("Written: never"),
        }
        match documents {
            Some(n) => println!("Documents: {}", n),
            None if cache.exists() => println!("Documents: unreadable (run 'folio cache rebuild')"),
            None => println!("Documents: -"),
        }
    }

    Ok(())
}
