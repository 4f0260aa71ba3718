//! Boundary to the search collaborator.
//!
//! The sitemap only needs a total count and the canonical path of each hit;
//! ranking, facets and timing stay on the other side of this trait.

use crate::Result;
use crate::filter::Filter;
use crate::pagination::PageWindow;

/// A filtered, windowed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Conjunctive filter clauses.
    pub filter: Vec<Filter>,
    /// Number of hits to skip.
    pub offset: usize,
    /// Maximum number of hits to return; `0` only counts.
    pub limit: usize,
}

impl SearchQuery {
    /// Query that only asks for the total number of matching documents.
    pub const fn count(filter: Vec<Filter>) -> Self {
        Self {
            filter,
            offset: 0,
            limit: 0,
        }
    }

    /// Query for one page of hits.
    pub const fn page(filter: Vec<Filter>, window: PageWindow) -> Self {
        Self {
            filter,
            offset: window.offset,
            limit: window.limit,
        }
    }
}

/// One matching document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Canonical, unprefixed path of the resource (`/about/team.php`).
    pub path: String,
}

impl Hit {
    /// Hit for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Answer of the search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Number of documents matching the filter, regardless of the window.
    pub total: u64,
    /// Hits inside the requested window, in a stable order.
    pub hits: Vec<Hit>,
}

/// A search engine able to answer filtered, windowed queries.
pub trait Search: Send + Sync {
    /// Execute a query.
    fn search(&self, query: &SearchQuery) -> Result<SearchResult>;
}

impl<T: Search + ?Sized> Search for std::sync::Arc<T> {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        (**self).search(query)
    }
}

impl<T: Search + ?Sized> Search for &T {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        (**self).search(query)
    }
}
