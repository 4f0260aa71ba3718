//! Sitemap requests and the entries produced for them.
//!
//! Field names follow the sitemaps.org protocol
//! (<https://www.sitemaps.org/protocol.html>).

use crate::scope::SiteScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request for the sitemap index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRequest {
    /// Sites covered by the advertised pages.
    pub scope: SiteScope,
}

/// Request for one page of URL entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesRequest {
    /// 1-based page number.
    pub page: u32,
    /// Sites covered by the page.
    pub scope: SiteScope,
}

/// One `<sitemap>` element of a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Location relative to the request's base URL (`/sitemap-1.xml`).
    pub loc: String,
    /// Last modification of the referenced sitemap.
    pub last_mod: Option<DateTime<Utc>>,
}

impl IndexEntry {
    /// Entry without modification time.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            last_mod: None,
        }
    }
}

/// Change frequency hints from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// Protocol value of this frequency.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `xhtml:link` hint pointing at another variant of the same resource.
///
/// See <https://developers.google.com/search/docs/specialty/international/localized-versions#sitemap>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Link relation, `alternate` for language variants.
    pub rel: String,
    /// Primary language subtag of the target (`en`).
    pub href_lang: String,
    /// Target URL relative to the request's base URL.
    pub href: String,
}

/// One `<url>` element of a sitemap page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEntry {
    /// Location relative to the request's base URL.
    pub loc: String,
    /// Last modification of the resource.
    pub last_mod: Option<DateTime<Utc>>,
    /// Expected change frequency.
    pub change_freq: ChangeFrequency,
    /// Priority relative to other URLs of the site, in `[0, 1]`.
    pub priority: f32,
    /// Alternate language variants, in language-set order.
    pub links: Vec<Link>,
}
