//! Search filter expressions for sitemap queries.
//!
//! A sitemap only lists internal HTML documents. On top of that fixed
//! restriction, a request may narrow the result to or away from some sites.

use crate::scope::SiteScope;
use serde::{Deserialize, Serialize};

/// Source value of documents that belong to the site itself.
pub const INTERNAL_SOURCE: &str = "internal";

/// Content type pattern of HTML documents; `*` matches any suffix such as
/// `; charset=UTF-8`.
pub const HTML_CONTENT_TYPE: &str = "text/html*";

/// One clause of a conjunctive search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Document source is one of these values.
    Source(Vec<String>),
    /// Document content type matches one of these patterns (`*` wildcards).
    ContentType(Vec<String>),
    /// Document belongs to one of these sites.
    Site(Vec<String>),
    /// Inverts the inner clause.
    Not(Box<Filter>),
}

impl Filter {
    /// Negate this clause.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// Build the filter for a sitemap request.
///
/// Returns the fixed internal/HTML restriction followed by at most one site
/// clause.
pub fn build_filter(scope: &SiteScope) -> Vec<Filter> {
    let mut filter = vec![
        Filter::Source(vec![INTERNAL_SOURCE.to_string()]),
        Filter::ContentType(vec![HTML_CONTENT_TYPE.to_string()]),
    ];

    match scope {
        SiteScope::Exclude(sites) => filter.push(Filter::Site(sites.clone()).negate()),
        SiteScope::Include(sites) => filter.push(Filter::Site(sites.clone())),
        SiteScope::Unrestricted => {},
    }

    filter
}
