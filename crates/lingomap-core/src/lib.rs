//! # lingomap-core
//!
//! Core functionality for lingomap - paginated, multi-language XML sitemaps
//! computed on demand from a search index.
//!
//! Every indexed resource is published once per configured language. The
//! sitemap lists each language variant as its own `<url>` entry and links it
//! to its siblings with `xhtml:link rel="alternate"` annotations. Because the
//! number of variants per resource is fixed, pages are sized in hits rather
//! than URLs, and a sitemap index advertises how many pages exist.
//!
//! ## Architecture
//!
//! - **Loading**: [`SitemapLoader`] turns index and entries requests into
//!   [`IndexEntry`] lists and streams of [`UrlEntry`] values
//! - **Pagination**: [`PaginationPlanner`] fixes the hit capacity of a page
//! - **Search**: the [`Search`] trait, implemented by the tantivy-backed
//!   [`SearchIndex`]
//! - **Rewriting**: the [`UrlRewriter`] trait, implemented by [`PrefixRewriter`]
//! - **Serialization**: streaming sitemap XML in [`xml`]
//!
//! ## Quick Start
//!
//! ```rust
//! use lingomap_core::{
//!     EntriesRequest, LanguageSet, PrefixRewriter, Resource, SearchIndex, SiteScope,
//!     SitemapLoader,
//! };
//! use std::sync::Arc;
//!
//! let dir = tempfile::TempDir::new()?;
//! let mut index = SearchIndex::create(dir.path())?;
//! index.index_resources(&[Resource::new("/about", "12")])?;
//!
//! let loader = SitemapLoader::new(
//!     Arc::new(index),
//!     Arc::new(PrefixRewriter::default()),
//!     LanguageSet::from_codes("de_DE", &["en_US"])?,
//!     1000,
//! )?;
//!
//! let request = EntriesRequest { page: 1, scope: SiteScope::Unrestricted };
//! let entries = loader.load_entries(&request)?;
//! let body = lingomap_core::xml::write_urlset(Vec::new(), "https://example.com", entries)?;
//! assert!(String::from_utf8_lossy(&body).contains("https://example.com/en/about"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration loading and validation
pub mod config;
/// Error types and result aliases
pub mod error;
/// Expansion of hits into language variants
pub mod expand;
/// Search filter model
pub mod filter;
/// Search index implementation using Tantivy
pub mod index;
/// Locales and language sets
pub mod language;
/// Sitemap index and page loading
pub mod loader;
/// Page capacity and windows
pub mod pagination;
/// URL rewrite boundary
pub mod rewrite;
/// Site include/exclude scopes
pub mod scope;
/// Search boundary
pub mod search;
/// Core data types
pub mod types;
/// Language-aware URL construction
pub mod url;
/// Streaming sitemap XML
pub mod xml;

// Re-export commonly used types
pub use config::{Config, IndexConfig, LanguagesConfig, RewriteConfig, ServerConfig, SitemapConfig};
pub use error::{Error, Result};
pub use expand::EntryExpander;
pub use filter::{Filter, build_filter};
pub use index::{Resource, SearchIndex};
pub use language::{Language, LanguageSet, Locale};
pub use loader::{EntryStream, SitemapLoader};
pub use pagination::{PageWindow, PaginationPlanner, SITEMAP_URL_LIMIT};
pub use rewrite::{PrefixRewriter, RewriteKind, RewriteOptions, RewriteRule, UrlRewriter};
pub use scope::SiteScope;
pub use search::{Hit, Search, SearchQuery, SearchResult};
pub use types::*;
pub use url::UrlBuilder;
