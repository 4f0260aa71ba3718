//! Streaming sitemap XML serialization.
//!
//! Documents are written element by element into any [`std::io::Write`], so
//! the size of a response is not bounded by memory: an entry is serialized
//! and handed to the writer before the next one is produced.
//!
//! Two document shapes exist:
//!
//! - **Sitemap index**: `<sitemapindex>` with one `<sitemap>` per page
//! - **URL set**: `<urlset>` with one `<url>` per entry and `xhtml:link`
//!   children for language alternates
//!
//! ```rust
//! use lingomap_core::IndexEntry;
//! use lingomap_core::xml::IndexWriter;
//!
//! let mut writer = IndexWriter::begin(Vec::new(), "https://example.com")?;
//! writer.write_entry(&IndexEntry::new("/sitemap-1.xml"))?;
//! let xml = String::from_utf8(writer.finish()?).unwrap();
//! assert!(xml.contains("<loc>https://example.com/sitemap-1.xml</loc>"));
//! # Ok::<(), lingomap_core::Error>(())
//! ```
//!
//! A document whose entries fail half-way is never closed: the error is
//! returned and the caller is expected to abort the response, so a crawler
//! never sees a truncated document that still parses.

use crate::Result;
use crate::types::{IndexEntry, UrlEntry};
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Namespace of the sitemap protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// Namespace of `xhtml:link` alternates.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
/// Google image sitemap extension namespace.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
/// Google video sitemap extension namespace.
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// Content type of every sitemap document.
pub const CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

const LASTMOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a timestamp the way `<lastmod>` expects it (`2025-01-24T08:55:00Z`).
pub fn format_lastmod(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(LASTMOD_FORMAT).to_string()
}

/// Shared element-level writer for both document shapes.
struct DocumentWriter<W: Write> {
    writer: Writer<W>,
    base_url: String,
    root: &'static str,
}

impl<W: Write> DocumentWriter<W> {
    fn begin(
        inner: W,
        base_url: &str,
        root: &'static str,
        namespaces: &[(&str, &str)],
    ) -> Result<Self> {
        let mut writer = Writer::new_with_indent(inner, b' ', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new(root).with_attributes(namespaces.iter().copied()),
        ))?;

        Ok(Self {
            writer,
            base_url: base_url.trim_end_matches('/').to_string(),
            root,
        })
    }

    fn absolute(&self, location: &str) -> String {
        format!("{}{location}", self.base_url)
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn loc_and_lastmod(&mut self, loc: &str, last_mod: Option<&DateTime<Utc>>) -> Result<()> {
        let loc = self.absolute(loc);
        self.text_element("loc", &loc)?;
        if let Some(timestamp) = last_mod {
            self.text_element("lastmod", &format_lastmod(timestamp))?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        let root = self.root;
        self.end(root)?;
        let mut inner = self.writer.into_inner();
        inner.write_all(b"\n")?;
        inner.flush()?;
        Ok(inner)
    }
}

/// Incremental writer for a `<sitemapindex>` document.
pub struct IndexWriter<W: Write> {
    document: DocumentWriter<W>,
}

impl<W: Write> IndexWriter<W> {
    /// Write the XML declaration and open the root element.
    ///
    /// Locations are made absolute by prefixing `base_url`.
    pub fn begin(inner: W, base_url: &str) -> Result<Self> {
        Ok(Self {
            document: DocumentWriter::begin(
                inner,
                base_url,
                "sitemapindex",
                &[("xmlns", SITEMAP_NS)],
            )?,
        })
    }

    /// Write one `<sitemap>` element.
    pub fn write_entry(&mut self, entry: &IndexEntry) -> Result<()> {
        self.document.start("sitemap")?;
        self.document
            .loc_and_lastmod(&entry.loc, entry.last_mod.as_ref())?;
        self.document.end("sitemap")
    }

    /// Close the document and flush, returning the inner writer.
    pub fn finish(self) -> Result<W> {
        self.document.finish()
    }
}

/// Incremental writer for a `<urlset>` document.
pub struct UrlsetWriter<W: Write> {
    document: DocumentWriter<W>,
}

impl<W: Write> UrlsetWriter<W> {
    /// Write the XML declaration and open the root element with all
    /// namespace declarations.
    pub fn begin(inner: W, base_url: &str) -> Result<Self> {
        Ok(Self {
            document: DocumentWriter::begin(
                inner,
                base_url,
                "urlset",
                &[
                    ("xmlns", SITEMAP_NS),
                    ("xmlns:xhtml", XHTML_NS),
                    ("xmlns:image", IMAGE_NS),
                    ("xmlns:video", VIDEO_NS),
                ],
            )?,
        })
    }

    /// Write one `<url>` element: `loc`, optional `lastmod`, then the
    /// alternate links in order.
    pub fn write_entry(&mut self, entry: &UrlEntry) -> Result<()> {
        self.document.start("url")?;
        self.document
            .loc_and_lastmod(&entry.loc, entry.last_mod.as_ref())?;

        for link in &entry.links {
            let href = self.document.absolute(&link.href);
            let element = BytesStart::new("xhtml:link").with_attributes([
                ("rel", link.rel.as_str()),
                ("hreflang", link.href_lang.as_str()),
                ("href", href.as_str()),
            ]);
            self.document.writer.write_event(Event::Empty(element))?;
        }

        self.document.end("url")
    }

    /// Close the document and flush, returning the inner writer.
    pub fn finish(self) -> Result<W> {
        self.document.finish()
    }
}

/// Write a complete sitemap index.
pub fn write_index<W, I>(inner: W, base_url: &str, entries: I) -> Result<W>
where
    W: Write,
    I: IntoIterator<Item = IndexEntry>,
{
    let mut writer = IndexWriter::begin(inner, base_url)?;
    for entry in entries {
        writer.write_entry(&entry)?;
    }
    writer.finish()
}

/// Write a complete URL set from fallible entries.
///
/// Stops at the first error without closing the document.
pub fn write_urlset<W, I>(inner: W, base_url: &str, entries: I) -> Result<W>
where
    W: Write,
    I: IntoIterator<Item = Result<UrlEntry>>,
{
    let mut writer = UrlsetWriter::begin(inner, base_url)?;
    for entry in entries {
        writer.write_entry(&entry?)?;
    }
    writer.finish()
}
