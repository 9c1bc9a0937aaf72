//! Whole-run orchestration and catalog output

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::assemble::assemble_product;
use crate::crawl::crawl_collection;
use crate::render::Renderer;
use crate::types::{Catalog, CollectionSpec};

/// Crawl every collection in order and assemble its products
///
/// Any render failure aborts the whole run; nothing is returned partially.
pub fn build_catalog<R: Renderer>(
    renderer: &mut R,
    collections: &[CollectionSpec],
    vendor_id: &str,
    max_pages: Option<u32>,
) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for collection in collections {
        info!("Starting collection: {}", collection.url);
        let summaries = crawl_collection(renderer, collection, vendor_id, max_pages)?;
        for summary in summaries {
            catalog.push(assemble_product(renderer, summary, &collection.category_tags)?);
        }
    }

    Ok(catalog)
}

/// Write the catalog as pretty-printed JSON, replacing any existing file
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)
        .with_context(|| format!("Failed to serialize catalog for: {}", path.display()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write catalog: {}", path.display()))
}
