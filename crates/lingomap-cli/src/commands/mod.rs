//! Command implementations for the lingomap CLI
//!
//! Each command lives in its own submodule. The helpers here wire the
//! configured collaborators into a [`SitemapLoader`].

mod ingest;
mod render;
mod serve;

pub use ingest::execute as ingest_resources;
pub use render::{index as render_index, page as render_page};
pub use serve::execute as serve;

use anyhow::{Context, Result};
use lingomap_core::{Config, SearchIndex, SitemapLoader};
use std::sync::Arc;

/// Base URL used when neither the command line nor the config names one.
pub const FALLBACK_BASE_URL: &str = "http://localhost";

/// Open the configured index and build a loader over it.
///
/// The index must already exist; only `ingest` creates one.
pub fn open_loader(config: &Config) -> Result<SitemapLoader> {
    let index = SearchIndex::open(&config.index.path).with_context(|| {
        format!(
            "Failed to open search index at {} (run `lingomap ingest` first)",
            config.index.path.display()
        )
    })?;

    let loader = SitemapLoader::new(
        Arc::new(index),
        Arc::new(config.rewriter()?),
        config.language_set()?,
        config.sitemap.max_urls_per_page,
    )?;
    Ok(loader)
}
