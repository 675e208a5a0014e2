//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | All documents, optionally sorted |
//! | `show SLUG` | One document with its body |
//! | `count`, `pages` | Document and page counts |
//! | `page N` | One page of documents |
//! | `tag TAG` | Documents carrying a tag |
//! | `cache rebuild/clear/status` | Index cache maintenance |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Configuration
//!
//! Settings come from `folio.toml` (see [`crate::storage::StoreConfig`]) and
//! can be overridden per invocation with `--dir`, `--ext`, `--cache`,
//! `--page-size`, `--published-field` and `--tags-field`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod query;
mod cache_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
