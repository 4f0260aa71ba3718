//! Page planning for sitemap documents.
//!
//! Each search hit expands into one URL entry per language, so a page holds
//! `max_urls_per_page / languages` hits. The capacity is fixed when the
//! planner is built, which keeps the page count advertised by the index and
//! the windows used by entries requests in agreement without sharing any
//! cursor between requests.
//!
//! ```rust
//! use lingomap_core::PaginationPlanner;
//!
//! let planner = PaginationPlanner::new(1000, 4)?;
//! assert_eq!(planner.hit_capacity(), 250);
//! assert_eq!(planner.page_count(1234), 5);
//! assert_eq!(planner.window(3).map(|w| w.offset), Some(500));
//! assert_eq!(planner.window(0), None);
//! # Ok::<(), lingomap_core::Error>(())
//! ```

use crate::{Error, Result};
use std::num::NonZeroUsize;

/// Hard limit of URLs in one sitemap file imposed by sitemaps.org.
pub const SITEMAP_URL_LIMIT: usize = 50_000;

/// Offset and limit of one page of hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of hits to skip.
    pub offset: usize,
    /// Number of hits on the page.
    pub limit: usize,
}

/// Immutable page planner derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlanner {
    hit_capacity: NonZeroUsize,
}

impl PaginationPlanner {
    /// Build a planner for `max_urls_per_page` entries and `language_count`
    /// languages.
    ///
    /// Fails when no complete set of language variants fits on a page.
    pub fn new(max_urls_per_page: usize, language_count: usize) -> Result<Self> {
        let language_count = NonZeroUsize::new(language_count)
            .ok_or_else(|| Error::Config("The language set must not be empty".into()))?;

        // Round down to a multiple of the language count before dividing.
        let adjusted = max_urls_per_page - max_urls_per_page % language_count.get();
        let hit_capacity = NonZeroUsize::new(adjusted / language_count.get()).ok_or_else(|| {
            Error::Config(format!(
                "max_urls_per_page ({max_urls_per_page}) must be at least \
                 the number of languages ({language_count})"
            ))
        })?;

        Ok(Self { hit_capacity })
    }

    /// Hits per page.
    pub const fn hit_capacity(&self) -> usize {
        self.hit_capacity.get()
    }

    /// Number of pages needed for `total_hits` hits; zero when there are none.
    pub fn page_count(&self, total_hits: u64) -> u64 {
        total_hits.div_ceil(self.hit_capacity.get() as u64)
    }

    /// Window of hits for a 1-based page number.
    ///
    /// Page numbers beyond [`page_count`](Self::page_count) are not rejected;
    /// they describe windows past the last hit. Page `0` has no window.
    pub const fn window(&self, page: u32) -> Option<PageWindow> {
        if page == 0 {
            return None;
        }
        let index = (page - 1) as usize;
        Some(PageWindow {
            offset: index.saturating_mul(self.hit_capacity.get()),
            limit: self.hit_capacity.get(),
        })
    }
}
