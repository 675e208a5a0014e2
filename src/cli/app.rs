//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{cache_cmd, query};
use crate::domain::SortOrder;
use crate::storage::StoreConfig;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Query a directory of frontmatter documents")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the content files
    #[arg(long, short = 'd', global = true, env = "FOLIO_DIR")]
    pub dir: Option<PathBuf>,

    /// Content file extension (default: .md)
    #[arg(long, global = true)]
    pub ext: Option<String>,

    /// Enable the index cache at this path
    #[arg(long, global = true, env = "FOLIO_CACHE")]
    pub cache: Option<PathBuf>,

    /// Documents per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Frontmatter field that hides a document when false
    #[arg(long, global = true)]
    pub published_field: Option<String>,

    /// Frontmatter field holding tags
    #[arg(long, global = true)]
    pub tags_field: Option<String>,

    /// Directory searched for folio.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all documents
    List {
        /// Sort by this frontmatter field
        #[arg(long, short)]
        sort: Option<String>,

        /// Sort order (asc, desc)
        #[arg(long, short, default_value = "asc")]
        order: SortOrder,
    },

    /// Show one document by slug
    Show {
        /// Document slug (file name without extension)
        slug: String,
    },

    /// Print the number of documents
    Count,

    /// Print the number of pages
    Pages,

    /// List one page of documents
    Page {
        /// Page number, starting at 1
        number: usize,

        /// Sort by this frontmatter field before paging
        #[arg(long, short)]
        sort: Option<String>,

        /// Sort order (asc, desc)
        #[arg(long, short, default_value = "asc")]
        order: SortOrder,
    },

    /// List documents carrying a tag
    Tag {
        /// Tag to match (percent-encoding is decoded)
        tag: String,

        /// Field holding the tag list (defaults to the configured tags field)
        #[arg(long)]
        field: Option<String>,
    },

    /// Manage the index cache
    #[command(subcommand)]
    Cache(cache_cmd::CacheCommands),
}

impl Cli {
    /// Loads folio.toml (and the global config) and applies command-line overrides
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = StoreConfig::load(&self.config_dir).with_context(|| {
            format!("Failed to load configuration from {}", self.config_dir.display())
        })?;

        if let Some(dir) = &self.dir {
            config = config.with_posts_dir(dir);
        }
        if let Some(ext) = &self.ext {
            config = config.with_extension(ext);
        }
        if let Some(cache) = &self.cache {
            config = config.with_cache(cache);
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(field) = &self.published_field {
            config = config.with_published_field(field);
        }
        if let Some(field) = &self.tags_field {
            config = config.with_tags_field(field);
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "folio=debug" } else { "folio=warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = Output::new(cli.format, cli.verbose);

    let config = cli.store_config()?;
    output.verbose(&format!("Using configuration: {:?}", config));

    match cli.command {
        Commands::List { sort, order } => {
            output.verbose_ctx("list", &format!("sort={:?}, order={}", sort, order));
            query::list(&output, config, sort.as_deref(), order)?
        }
        Commands::Show { slug } => {
            output.verbose_ctx("show", &format!("Looking up slug: {}", slug));
            query::show(&output, config, &slug)?
        }
        Commands::Count => query::count(&output, config)?,
        Commands::Pages => query::pages(&output, config)?,
        Commands::Page { number, sort, order } => {
            output.verbose_ctx("page", &format!("page={}, sort={:?}, order={}", number, sort, order));
            query::page(&output, config, number, sort.as_deref(), order)?
        }
        Commands::Tag { tag, field } => {
            let field = field.unwrap_or_else(|| config.tags_field.clone());
            output.verbose_ctx("tag", &format!("Filtering {} by tag: {}", field, tag));
            query::tag(&output, config, &tag, &field)?
        }
        Commands::Cache(cmd) => cache_cmd::run(cmd, &output, config)?,
    }

    Ok(())
}
