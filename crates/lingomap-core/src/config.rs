//! Configuration for the sitemap service.
//!
//! Configuration is stored in TOML. Every section is optional and falls back
//! to defaults, so an empty file (or no file at all) yields a working
//! single-language setup.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [sitemap]
//! max_urls_per_page = 50000
//!
//! [languages]
//! primary = "de_DE"
//! translations = ["en_US", "it_IT"]
//!
//! [index]
//! path = "/var/lib/lingomap/index"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! public_base_url = "https://www.example.com"
//!
//! [[rewrite.rules]]
//! prefix = "/objects"
//! replacement = ""
//! ```
//!
//! ## Loading
//!
//! ```rust
//! use lingomap_core::Config;
//!
//! let config = Config::from_toml_str(
//!     r#"
//!     [languages]
//!     primary = "de_DE"
//!     translations = ["en_US"]
//!     "#,
//! )?;
//! config.validate()?;
//! assert_eq!(config.language_set()?.len(), 2);
//! # Ok::<(), lingomap_core::Error>(())
//! ```

use crate::language::{LanguageSet, Locale};
use crate::pagination::{PaginationPlanner, SITEMAP_URL_LIMIT};
use crate::rewrite::{PrefixRewriter, RewriteRule};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "lingomap.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page sizing
    pub sitemap: SitemapConfig,
    /// Primary language and translations
    pub languages: LanguagesConfig,
    /// Search index location
    pub index: IndexConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Link rewrite rules
    pub rewrite: RewriteConfig,
}

/// Page sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Maximum number of `<url>` entries in one sitemap document.
    ///
    /// Must be between 1 and 50 000 and at least the number of languages,
    /// since every hit is emitted once per language.
    pub max_urls_per_page: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            max_urls_per_page: SITEMAP_URL_LIMIT,
        }
    }
}

/// Languages the site is published in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Locale of the primary language (`de_DE`). Its URLs carry no prefix.
    pub primary: String,
    /// Translation locales, in the order their variants are emitted.
    pub translations: Vec<String>,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            primary: "en_US".to_string(),
            translations: Vec::new(),
        }
    }
}

/// Search index location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory of the tantivy index.
    ///
    /// Defaults to `index/` under the platform data directory.
    pub path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: directories::ProjectDirs::from("dev", "lingomap", "lingomap").map_or_else(
                || PathBuf::from(".lingomap/index"),
                |dirs| dirs.data_dir().join("index"),
            ),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,
    /// Absolute base URL sitemap locations are resolved against.
    ///
    /// When unset the server derives it from the request's `Host` header.
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            public_base_url: None,
        }
    }
}

/// Link rewrite rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Rules applied in order; the first matching prefix wins.
    pub rules: Vec<RewriteRule>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the platform config
    /// directory is consulted and a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema. Values are not validated here; call [`Config::validate`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Where the config file lives when no path is given.
    ///
    /// - Linux: `~/.config/lingomap/lingomap.toml`
    /// - macOS: `~/Library/Application Support/dev.lingomap.lingomap/lingomap.toml`
    /// - Windows: `%APPDATA%\lingomap\lingomap\config\lingomap.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "lingomap", "lingomap")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Check every value that would otherwise fail at request time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - `max_urls_per_page` is outside `1..=50000`
    /// - a locale is empty or malformed, or two locales share a language
    /// - a page cannot hold one hit in every language
    /// - `public_base_url` is not an absolute http(s) URL
    /// - a rewrite rule prefix does not start with `/`
    pub fn validate(&self) -> Result<()> {
        let max = self.sitemap.max_urls_per_page;
        if !(1..=SITEMAP_URL_LIMIT).contains(&max) {
            return Err(Error::Config(format!(
                "max_urls_per_page must be between 1 and {SITEMAP_URL_LIMIT}, got {max}"
            )));
        }

        let languages = self.language_set()?;
        PaginationPlanner::new(max, languages.len())?;

        if let Some(base) = &self.server.public_base_url {
            let parsed = url::Url::parse(base)
                .map_err(|e| Error::Config(format!("Invalid public_base_url '{base}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "public_base_url must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }

        self.rewriter()?;
        Ok(())
    }

    /// The configured language set, primary first.
    pub fn language_set(&self) -> Result<LanguageSet> {
        let primary = Locale::parse(&self.languages.primary)?;
        let translations = self
            .languages
            .translations
            .iter()
            .map(|code| Locale::parse(code))
            .collect::<Result<Vec<_>>>()?;
        LanguageSet::new(primary, translations)
    }

    /// The rewriter described by `[rewrite]`.
    pub fn rewriter(&self) -> Result<PrefixRewriter> {
        PrefixRewriter::new(self.rewrite.rules.clone())
    }
}
