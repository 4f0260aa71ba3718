//! `lingomap index` and `lingomap page`: sitemap documents on stdout.

use anyhow::Result;
use lingomap_core::xml::{write_index, write_urlset};
use lingomap_core::{Config, EntriesRequest, IndexRequest, SiteScope, SitemapLoader};
use std::io::{self, BufWriter, Write};

use super::{FALLBACK_BASE_URL, open_loader};
use crate::cli::RenderArgs;

/// Write the sitemap index to stdout.
pub fn index(config: &Config, args: &RenderArgs) -> Result<()> {
    let loader = open_loader(config)?;
    let out = BufWriter::new(io::stdout().lock());
    write_index_document(&loader, config, args, out)?.flush()?;
    Ok(())
}

/// Write sitemap page `page` to stdout.
pub fn page(config: &Config, page: u32, args: &RenderArgs) -> Result<()> {
    let loader = open_loader(config)?;
    let out = BufWriter::new(io::stdout().lock());
    write_page_document(&loader, config, page, args, out)?.flush()?;
    Ok(())
}

fn write_index_document<W: Write>(
    loader: &SitemapLoader,
    config: &Config,
    args: &RenderArgs,
    out: W,
) -> Result<W> {
    let entries = loader.load_index(&IndexRequest {
        scope: scope(args),
    })?;
    Ok(write_index(out, &base_url(config, args), entries)?)
}

fn write_page_document<W: Write>(
    loader: &SitemapLoader,
    config: &Config,
    page: u32,
    args: &RenderArgs,
    out: W,
) -> Result<W> {
    let entries = loader.load_entries(&EntriesRequest {
        page,
        scope: scope(args),
    })?;
    Ok(write_urlset(out, &base_url(config, args), entries)?)
}

fn scope(args: &RenderArgs) -> SiteScope {
    SiteScope::from_csv(args.site_excludes.as_deref(), args.site_includes.as_deref())
}

fn base_url(config: &Config, args: &RenderArgs) -> String {
    args.base_url
        .clone()
        .or_else(|| config.server.public_base_url.clone())
        .unwrap_or_else(|| FALLBACK_BASE_URL.to_string())
}
