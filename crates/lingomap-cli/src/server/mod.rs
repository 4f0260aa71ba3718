//! HTTP surface for sitemaps.
//!
//! - `GET /sitemap.xml`: the sitemap index
//! - `GET /sitemap-N.xml`: page `N`, expanded while it is being streamed
//! - `GET /robots.txt`: advertises the sitemap index
//!
//! Both sitemap routes accept `siteExcludes` / `siteIncludes` query
//! parameters. Searches run on the blocking pool and both documents are
//! streamed; a failure before the first byte is a `500`, a failure while
//! streaming aborts the connection.

mod body;
mod path;

pub use path::{INDEX_FILE, SitemapPath};

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use lingomap_core::xml::{self, write_index, write_urlset};
use lingomap_core::{EntriesRequest, Error, IndexRequest, SiteScope, SitemapLoader};
use tracing::{debug, error};

/// State shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    loader: SitemapLoader,
    public_base_url: Option<String>,
}

impl AppState {
    /// `public_base_url` overrides the `Host`-derived base for every response.
    pub fn new(loader: SitemapLoader, public_base_url: Option<String>) -> Self {
        Self {
            loader,
            public_base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    fn base_url(&self, headers: &HeaderMap) -> Option<String> {
        if let Some(url) = &self.public_base_url {
            return Some(url.clone());
        }
        headers
            .get(header::HOST)
            .and_then(|host| host.to_str().ok())
            .filter(|host| !host.is_empty())
            .map(|host| format!("http://{host}"))
    }
}

/// Create the sitemap router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/robots.txt", get(robots))
        .route("/{file}", get(sitemap))
        .with_state(state)
}

async fn robots(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(base_url) = state.base_url(&headers) else {
        return missing_host();
    };
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/{INDEX_FILE}\n"),
    )
        .into_response()
}

async fn sitemap(
    State(state): State<AppState>,
    Path(file): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let Some(target) = SitemapPath::parse(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(base_url) = state.base_url(&headers) else {
        return missing_host();
    };
    let scope = SiteScope::from_query(query.as_deref());
    debug!(?target, ?scope, "Sitemap request");

    match target {
        SitemapPath::Index => index_response(state.loader, scope, base_url).await,
        SitemapPath::Page(page) => {
            page_response(state.loader, EntriesRequest { page, scope }, base_url).await
        },
    }
}

async fn index_response(loader: SitemapLoader, scope: SiteScope, base_url: String) -> Response {
    let loaded =
        tokio::task::spawn_blocking(move || loader.load_index(&IndexRequest { scope })).await;

    let entries = match loaded {
        Ok(Ok(entries)) => entries,
        Ok(Err(e)) => return error_response(&e),
        Err(e) => return join_failure(&e),
    };

    xml_response(body::spawn_streaming(move |writer| {
        write_index(writer, &base_url, entries).map(drop)
    }))
}

async fn page_response(
    loader: SitemapLoader,
    request: EntriesRequest,
    base_url: String,
) -> Response {
    let loaded = tokio::task::spawn_blocking(move || loader.load_entries(&request)).await;

    let entries = match loaded {
        Ok(Ok(entries)) => entries,
        Ok(Err(e)) => return error_response(&e),
        Err(e) => return join_failure(&e),
    };

    xml_response(body::spawn_streaming(move |writer| {
        write_urlset(writer, &base_url, entries).map(drop)
    }))
}

fn xml_response(body: Body) -> Response {
    ([(header::CONTENT_TYPE, xml::CONTENT_TYPE)], body).into_response()
}

fn error_response(err: &Error) -> Response {
    error!(category = err.category(), "Failed to load sitemap: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

fn join_failure(err: &tokio::task::JoinError) -> Response {
    error!("Sitemap task failed: {err}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn missing_host() -> Response {
    (StatusCode::BAD_REQUEST, "Missing Host header").into_response()
}
