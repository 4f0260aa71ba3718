//! Tantivy-backed search collaborator.
//!
//! Stores one document per resource with its canonical path, site, source
//! and content type, and answers sitemap queries with exact counts and a
//! stable hit order (index order of the current snapshot).

use crate::filter::Filter;
use crate::search::{Hit, Search, SearchQuery, SearchResult};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tantivy::collector::{Count, DocSetCollector};
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, STORED, STRING, Schema, TEXT, Value};
use tantivy::{DocAddress, Index, IndexReader, IndexWriter, TantivyDocument, Term, doc};
use tracing::{debug, info};

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// A resource as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Canonical, unprefixed path (`/about/team.php`).
    pub path: String,
    /// Identifier of the site the resource belongs to.
    pub site: String,
    /// Origin of the resource; sitemaps only list `internal` ones.
    #[serde(default = "default_source")]
    pub source: String,
    /// MIME type, possibly with parameters (`text/html; charset=UTF-8`).
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
}

impl Resource {
    /// An internal HTML resource of `site`.
    pub fn new(path: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            site: site.into(),
            source: default_source(),
            content_type: default_content_type(),
            title: String::new(),
        }
    }
}

fn default_source() -> String {
    crate::filter::INTERNAL_SOURCE.to_string()
}

fn default_content_type() -> String {
    "text/html".to_string()
}

/// Search index over site resources.
pub struct SearchIndex {
    index: Index,
    path_field: Field,
    site_field: Field,
    source_field: Field,
    content_type_field: Field,
    title_field: Field,
    reader: IndexReader,
}

impl SearchIndex {
    /// Create a new, empty index in `index_path`.
    pub fn create(index_path: &Path) -> Result<Self> {
        let mut schema_builder = Schema::builder();
        schema_builder.add_text_field("path", STRING | STORED);
        schema_builder.add_text_field("site", STRING | STORED);
        schema_builder.add_text_field("source", STRING | STORED);
        schema_builder.add_text_field("content_type", STRING | STORED);
        schema_builder.add_text_field("title", TEXT | STORED);
        let schema = schema_builder.build();

        std::fs::create_dir_all(index_path)
            .map_err(|e| Error::Index(format!("Failed to create index directory: {e}")))?;

        let index = Index::create_in_dir(index_path, schema)
            .map_err(|e| Error::Index(format!("Failed to create index: {e}")))?;

        info!(path = %index_path.display(), "Created search index");
        Self::from_index(index)
    }

    /// Open an existing index.
    pub fn open(index_path: &Path) -> Result<Self> {
        let index = Index::open_in_dir(index_path)
            .map_err(|e| Error::Index(format!("Failed to open index: {e}")))?;
        Self::from_index(index)
    }

    /// Open the index in `index_path`, creating it when the directory holds none.
    pub fn open_or_create(index_path: &Path) -> Result<Self> {
        if index_path.join("meta.json").exists() {
            Self::open(index_path)
        } else {
            Self::create(index_path)
        }
    }

    fn from_index(index: Index) -> Result<Self> {
        let schema = index.schema();
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| Error::Index(format!("Missing {name} field")))
        };

        let path_field = field("path")?;
        let site_field = field("site")?;
        let source_field = field("source")?;
        let content_type_field = field("content_type")?;
        let title_field = field("title")?;

        let reader = index
            .reader_builder()
            .reload_policy(tantivy::ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| Error::Index(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            path_field,
            site_field,
            source_field,
            content_type_field,
            title_field,
            reader,
        })
    }

    /// Insert or replace resources, keyed by path. Returns the number written.
    pub fn index_resources(&mut self, resources: &[Resource]) -> Result<usize> {
        let mut writer: IndexWriter = self
            .index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| Error::Index(format!("Failed to create writer: {e}")))?;

        for resource in resources {
            writer.delete_term(Term::from_field_text(self.path_field, &resource.path));
            writer
                .add_document(doc!(
                    self.path_field => resource.path.as_str(),
                    self.site_field => resource.site.as_str(),
                    self.source_field => resource.source.as_str(),
                    self.content_type_field => resource.content_type.as_str(),
                    self.title_field => resource.title.as_str()
                ))
                .map_err(|e| Error::Index(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| Error::Index(format!("Failed to commit: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| Error::Index(format!("Failed to reload reader: {e}")))?;

        info!(count = resources.len(), "Indexed resources");
        Ok(resources.len())
    }

    /// Number of live documents in the current snapshot.
    pub fn document_count(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn build_query(&self, filter: &[Filter]) -> Result<Box<dyn Query>> {
        if filter.is_empty() {
            return Ok(Box::new(AllQuery));
        }
        let clauses = filter
            .iter()
            .map(|clause| Ok((Occur::Must, self.clause_query(clause)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(BooleanQuery::new(clauses)))
    }

    fn clause_query(&self, clause: &Filter) -> Result<Box<dyn Query>> {
        match clause {
            Filter::Source(values) => Ok(any_term(self.source_field, values)),
            Filter::Site(values) => Ok(any_term(self.site_field, values)),
            Filter::ContentType(patterns) => any_pattern(self.content_type_field, patterns),
            Filter::Not(inner) => Ok(Box::new(BooleanQuery::new(vec![
                (Occur::Must, Box::new(AllQuery) as Box<dyn Query>),
                (Occur::MustNot, self.clause_query(inner)?),
            ]))),
        }
    }
}

impl Search for SearchIndex {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let searcher = self.reader.searcher();
        let tantivy_query = self.build_query(&query.filter)?;

        if query.limit == 0 {
            let total = searcher.search(&*tantivy_query, &Count)?;
            debug!(total, "Counted matching resources");
            return Ok(SearchResult {
                total: total as u64,
                hits: Vec::new(),
            });
        }

        let (total, matching) = searcher.search(&*tantivy_query, &(Count, DocSetCollector))?;
        let mut addresses: Vec<DocAddress> = matching.into_iter().collect();
        addresses.sort_unstable_by_key(|address| (address.segment_ord, address.doc_id));

        let hits = addresses
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .map(|address| {
                let doc: TantivyDocument = searcher.doc(address)?;
                Ok(Hit::new(stored_text(&doc, self.path_field)?))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            total,
            offset = query.offset,
            returned = hits.len(),
            "Loaded page of resources"
        );

        Ok(SearchResult {
            total: total as u64,
            hits,
        })
    }
}

fn any_term(field: Field, values: &[String]) -> Box<dyn Query> {
    let clauses = values
        .iter()
        .map(|value| {
            let term = Term::from_field_text(field, value);
            (
                Occur::Should,
                Box::new(TermQuery::new(term, IndexRecordOption::Basic)) as Box<dyn Query>,
            )
        })
        .collect();
    Box::new(BooleanQuery::new(clauses))
}

fn any_pattern(field: Field, patterns: &[String]) -> Result<Box<dyn Query>> {
    let clauses = patterns
        .iter()
        .map(|pattern| {
            let query: Box<dyn Query> = if pattern.contains('*') {
                Box::new(
                    RegexQuery::from_pattern(&glob_to_regex(pattern), field)
                        .map_err(|e| Error::Index(format!("Invalid pattern '{pattern}': {e}")))?,
                )
            } else {
                Box::new(TermQuery::new(
                    Term::from_field_text(field, pattern),
                    IndexRecordOption::Basic,
                ))
            };
            Ok((Occur::Should, query))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Box::new(BooleanQuery::new(clauses)))
}

fn stored_text(doc: &TantivyDocument, field: Field) -> Result<String> {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(std::string::ToString::to_string)
        .ok_or_else(|| Error::Index("Field not found in document".into()))
}

/// Translate a `*` glob into an anchored regex over the whole term.
fn glob_to_regex(pattern: &str) -> String {
    pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("documents", &self.document_count())
            .finish_non_exhaustive()
    }
}
