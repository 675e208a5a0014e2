//! Query commands (list, show, count, pages, page, tag)

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::SortOrder;
use crate::storage::{ContentStore, StoreConfig};

/// Opens a store and loads its index
fn open(output: &Output, config: StoreConfig) -> Result<ContentStore> {
    let mut store = ContentStore::new(config);
    let loaded = store.load().context("Failed to load content")?;
    output.verbose(&format!("Loaded {} documents", loaded));
    Ok(store)
}

fn sorted(output: &Output, config: StoreConfig, sort: Option<&str>, order: SortOrder) -> Result<ContentStore> {
    let mut store = open(output, config)?;
    if let Some(field) = sort {
        // An empty directory has nothing to sort
        if store.count() > 0 {
            store.sort_by(field, order)?;
        }
    }
    Ok(store)
}

/// List all documents
pub fn list(output: &Output, config: StoreConfig, sort: Option<&str>, order: SortOrder) -> Result<()> {
    let store = sorted(output, config, sort, order)?;

    if output.is_json() {
        let docs: Vec<_> = store.all().iter().map(|e| &e.document).collect();
        output.data(&docs);
    } else if store.count() == 0 {
        println!("No documents found.");
    } else {
        println!("Documents ({}):", store.count());
        output.document_rows(store.all().iter().map(|e| &e.document));
    }

    Ok(())
}

/// Show one document
pub fn show(output: &Output, config: StoreConfig, slug: &str) -> Result<()> {
    let mut store = ContentStore::new(config);
    let doc = store
        .load_document(slug)
        .with_context(|| format!("Failed to load document '{}'", slug))?;

    if output.is_json() {
        output.data(&doc);
    } else {
        println!("{}", doc.url);
        println!("{}", "=".repeat(40));
        for (key, value) in doc.meta.iter() {
            match value.as_str() {
                Some(s) => println!("{}: {}", key, s),
                None => println!("{}: {}", key, value),
            }
        }
        println!();
        println!("{}", doc.body.trim());
    }

    Ok(())
}

/// Print the document count
pub fn count(output: &Output, config: StoreConfig) -> Result<()> {
    let store = open(output, config)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "count": store.count() }));
    } else {
        println!("{}", store.count());
    }

    Ok(())
}

/// Print the page count
pub fn pages(output: &Output, config: StoreConfig) -> Result<()> {
    let page_size = config.page_size;
    let store = open(output, config)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "pages": store.page_count(),
            "page_size": page_size,
            "count": store.count(),
        }));
    } else {
        println!("{}", store.page_count());
    }

    Ok(())
}

/// List one page of documents
pub fn page(
    output: &Output,
    config: StoreConfig,
    number: usize,
    sort: Option<&str>,
    order: SortOrder,
) -> Result<()> {
    let store = sorted(output, config, sort, order)?;
    let entries = store.page(number);

    if output.is_json() {
        let docs: Vec<_> = entries.iter().map(|e| &e.document).collect();
        output.data(&serde_json::json!({
            "page": number,
            "pages": store.page_count(),
            "documents": docs,
        }));
    } else if entries.is_empty() {
        println!("Page {} is empty ({} pages).", number, store.page_count());
    } else {
        println!("Page {} of {}:", number, store.page_count());
        output.document_rows(entries.iter().map(|e| &e.document));
    }

    Ok(())
}

/// List documents carrying a tag
pub fn tag(output: &Output, config: StoreConfig, tag: &str, field: &str) -> Result<()> {
    let store = open(output, config)?;
    let entries = store.by_tag(tag, field);
    output.verbose_ctx("tag", &format!("Found {} matching documents", entries.len()));

    if output.is_json() {
        let docs: Vec<_> = entries.iter().map(|e| &e.document).collect();
        output.data(&docs);
    } else if entries.is_empty() {
        println!("No documents tagged '{}'.", tag);
    } else {
        println!("Tagged '{}' ({}):", tag, entries.len());
        output.document_rows(entries.iter().map(|e| &e.document));
    }

    Ok(())
}
