//! Sitemap loading: from a request to index entries or URL entries.
//!
//! The loader issues one search per request. Index and entries requests are
//! independent: the page count advertised by the index is a snapshot, and an
//! entries request re-runs the query for its own window. When the index
//! changes between the two requests the advertised pages and the hits they
//! contain can disagree; no cursor or cache papers over that.

use crate::Result;
use crate::expand::EntryExpander;
use crate::filter::build_filter;
use crate::language::LanguageSet;
use crate::pagination::PaginationPlanner;
use crate::rewrite::UrlRewriter;
use crate::scope::SiteScope;
use crate::search::{Hit, Search, SearchQuery};
use crate::types::{EntriesRequest, IndexEntry, IndexRequest, UrlEntry};
use crate::url::UrlBuilder;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Location of sitemap page `page` for a scope (`/sitemap-2.xml?siteIncludes=3`).
pub fn page_location(page: u64, scope: &SiteScope) -> String {
    format!("/sitemap-{page}.xml{}", scope.query_string())
}

/// Computes sitemap content from the search collaborator.
///
/// Built once at startup; the language set and page capacity never change
/// afterwards, so every request paginates the same way.
#[derive(Clone)]
pub struct SitemapLoader {
    search: Arc<dyn Search>,
    expander: Arc<EntryExpander>,
    planner: PaginationPlanner,
}

impl SitemapLoader {
    /// Wire the collaborators together.
    ///
    /// Fails when `max_urls_per_page` cannot hold one hit in every language.
    pub fn new(
        search: Arc<dyn Search>,
        rewriter: Arc<dyn UrlRewriter>,
        languages: LanguageSet,
        max_urls_per_page: usize,
    ) -> Result<Self> {
        let planner = PaginationPlanner::new(max_urls_per_page, languages.len())?;
        debug!(
            languages = languages.len(),
            hit_capacity = planner.hit_capacity(),
            "Configured sitemap loader"
        );

        Ok(Self {
            search,
            expander: Arc::new(EntryExpander::new(languages, UrlBuilder::new(rewriter))),
            planner,
        })
    }

    /// The page planner shared by index and entries requests.
    pub const fn planner(&self) -> &PaginationPlanner {
        &self.planner
    }

    /// One index entry per page needed for the request's scope.
    #[instrument(skip(self), fields(scope = ?request.scope))]
    pub fn load_index(&self, request: &IndexRequest) -> Result<Vec<IndexEntry>> {
        let result = self
            .search
            .search(&SearchQuery::count(build_filter(&request.scope)))?;
        let pages = self.planner.page_count(result.total);

        debug!(total = result.total, pages, "Planned sitemap index");

        Ok((1..=pages)
            .map(|page| IndexEntry::new(page_location(page, &request.scope)))
            .collect())
    }

    /// The entries of one page, expanded lazily while iterating.
    ///
    /// The search runs before this returns, so search failures surface here;
    /// rewrite failures surface as `Err` items of the stream. Page `0` lies
    /// before the first page and yields nothing.
    #[instrument(skip(self), fields(page = request.page, scope = ?request.scope))]
    pub fn load_entries(&self, request: &EntriesRequest) -> Result<EntryStream> {
        let Some(window) = self.planner.window(request.page) else {
            debug!("Page 0 holds no entries");
            return Ok(self.stream(Vec::new()));
        };
        let result = self
            .search
            .search(&SearchQuery::page(build_filter(&request.scope), window))?;

        debug!(
            total = result.total,
            offset = window.offset,
            hits = result.hits.len(),
            "Loaded sitemap page"
        );

        Ok(self.stream(result.hits))
    }

    fn stream(&self, hits: Vec<Hit>) -> EntryStream {
        EntryStream {
            expander: Arc::clone(&self.expander),
            remaining_hits: hits.len(),
            hits: hits.into_iter(),
            pending: Vec::new().into_iter(),
            failed: false,
        }
    }
}

impl std::fmt::Debug for SitemapLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapLoader")
            .field("planner", &self.planner)
            .finish_non_exhaustive()
    }
}

/// Iterator over the URL entries of one page.
///
/// Hits are expanded one at a time, so only the variants of the current hit
/// are held in memory. Iteration stops after the first error.
pub struct EntryStream {
    expander: Arc<EntryExpander>,
    hits: std::vec::IntoIter<Hit>,
    pending: std::vec::IntoIter<UrlEntry>,
    remaining_hits: usize,
    failed: bool,
}

impl EntryStream {
    /// Number of entries still to be produced.
    pub fn remaining(&self) -> usize {
        self.pending.len() + self.remaining_hits * self.expander.languages().len()
    }
}

impl Iterator for EntryStream {
    type Item = Result<UrlEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(entry) = self.pending.next() {
                return Some(Ok(entry));
            }
            let hit = self.hits.next()?;
            self.remaining_hits -= 1;
            match self.expander.expand(&hit.path) {
                Ok(entries) => self.pending = entries.into_iter(),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                },
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::filter::Filter;
    use crate::rewrite::{PrefixRewriter, RewriteKind, RewriteOptions};
    use crate::search::SearchResult;
    use crate::types::Link;
    use std::sync::Mutex;

    /// Returns a fixed result and records the queries it receives.
    struct StubSearch {
        result: SearchResult,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl StubSearch {
        fn new(total: u64, paths: &[&str]) -> Self {
            Self {
                result: SearchResult {
                    total,
                    hits: paths.iter().map(|p| Hit::new(*p)).collect(),
                },
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl Search for StubSearch {
        fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(self.result.clone())
        }
    }

    struct RejectingRewriter;

    impl UrlRewriter for RejectingRewriter {
        fn rewrite(&self, _: RewriteKind, path: &str, _: &RewriteOptions) -> Result<String> {
            if path.contains("/en") {
                Err(Error::Rewrite {
                    path: path.into(),
                    reason: "no english route".into(),
                })
            } else {
                Ok(path.into())
            }
        }
    }

    fn loader(search: Arc<StubSearch>, primary: &str, translations: &[&str]) -> SitemapLoader {
        SitemapLoader::new(
            search,
            Arc::new(PrefixRewriter::default()),
            LanguageSet::from_codes(primary, translations).unwrap(),
            1000,
        )
        .unwrap()
    }

    fn scope_excluding() -> SiteScope {
        SiteScope::from_lists(
            vec!["12".into(), "13".into()],
            vec!["14".into(), "15".into()],
        )
    }

    #[test]
    fn test_load_index_with_site_includes_and_excludes() {
        let search = Arc::new(StubSearch::new(1234, &[]));
        let loader = loader(search.clone(), "de_DE", &["en_US", "it_IT"]);

        let indexes = loader
            .load_index(&IndexRequest {
                scope: scope_excluding(),
            })
            .unwrap();

        let expected: Vec<_> = (1..=4)
            .map(|n| IndexEntry::new(format!("/sitemap-{n}.xml?siteExcludes=12,13")))
            .collect();
        assert_eq!(indexes, expected);

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].limit, 0);
        assert!(matches!(queries[0].filter.last(), Some(Filter::Not(_))));
    }

    #[test]
    fn test_load_index_with_site_includes() {
        let search = Arc::new(StubSearch::new(1234, &[]));
        let loader = loader(search, "de_DE", &["en_US", "it_IT", "fr_FR"]);

        let indexes = loader
            .load_index(&IndexRequest {
                scope: SiteScope::from_csv(None, Some("14,15")),
            })
            .unwrap();

        assert_eq!(indexes.len(), 5);
        assert_eq!(indexes[0].loc, "/sitemap-1.xml?siteIncludes=14,15");
        assert_eq!(indexes[4].loc, "/sitemap-5.xml?siteIncludes=14,15");
    }

    #[test]
    fn test_load_index_without_hits_is_empty() {
        let search = Arc::new(StubSearch::new(0, &[]));
        let loader = loader(search, "de_DE", &[]);

        let indexes = loader.load_index(&IndexRequest::default()).unwrap();
        assert!(indexes.is_empty());
    }

    #[test]
    fn test_load_entries_expands_every_hit() {
        let search = Arc::new(StubSearch::new(5, &["/a", "/b"]));
        let loader = loader(search.clone(), "de_DE", &["en_US"]);

        let entries: Vec<_> = loader
            .load_entries(&EntriesRequest {
                page: 1,
                scope: scope_excluding(),
            })
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        let summary: Vec<(&str, Vec<Link>)> = entries
            .iter()
            .map(|e| (e.loc.as_str(), e.links.clone()))
            .collect();
        let link = |lang: &str, href: &str| Link {
            rel: "alternate".into(),
            href_lang: lang.into(),
            href: href.into(),
        };
        assert_eq!(
            summary,
            vec![
                ("/a", vec![link("en", "/en/a")]),
                ("/en/a", vec![link("de", "/a")]),
                ("/b", vec![link("en", "/en/b")]),
                ("/en/b", vec![link("de", "/b")]),
            ]
        );

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries[0].offset, 0);
        assert_eq!(queries[0].limit, 500);
    }

    #[test]
    fn test_load_entries_window_for_later_page() {
        let search = Arc::new(StubSearch::new(5000, &[]));
        let loader = loader(search.clone(), "de_DE", &["en_US", "it_IT", "fr_FR"]);

        let stream = loader
            .load_entries(&EntriesRequest {
                page: 3,
                scope: SiteScope::Unrestricted,
            })
            .unwrap();
        assert_eq!(stream.count(), 0);

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries[0].offset, 500);
        assert_eq!(queries[0].limit, 250);
    }

    #[test]
    fn test_page_zero_is_empty_and_skips_search() {
        let search = Arc::new(StubSearch::new(2, &["/a", "/b"]));
        let loader = loader(search.clone(), "de_DE", &["en_US"]);

        let pages = loader.load_index(&IndexRequest::default()).unwrap();
        assert_eq!(pages, vec![IndexEntry::new("/sitemap-1.xml")]);

        let stream = loader
            .load_entries(&EntriesRequest {
                page: 0,
                scope: SiteScope::Unrestricted,
            })
            .unwrap();
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.count(), 0);

        // Only the index request reached the search.
        assert_eq!(search.queries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_entry_stream_stops_after_rewrite_failure() {
        let search = Arc::new(StubSearch::new(2, &["/a", "/b"]));
        let loader = SitemapLoader::new(
            search,
            Arc::new(RejectingRewriter),
            LanguageSet::from_codes("de_DE", &["en_US"]).unwrap(),
            1000,
        )
        .unwrap();

        let mut stream = loader
            .load_entries(&EntriesRequest {
                page: 1,
                scope: SiteScope::Unrestricted,
            })
            .unwrap();
        assert_eq!(stream.remaining(), 4);

        assert!(matches!(stream.next(), Some(Err(Error::Rewrite { .. }))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_remaining_counts_down() {
        let search = Arc::new(StubSearch::new(2, &["/a", "/b"]));
        let loader = loader(search, "de_DE", &["en_US", "it_IT"]);
        let mut stream = loader
            .load_entries(&EntriesRequest {
                page: 1,
                scope: SiteScope::Unrestricted,
            })
            .unwrap();

        assert_eq!(stream.remaining(), 6);
        stream.next();
        assert_eq!(stream.remaining(), 5);
        assert_eq!(stream.by_ref().count(), 5);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_page_location() {
        assert_eq!(page_location(2, &SiteScope::Unrestricted), "/sitemap-2.xml");
    }
}
