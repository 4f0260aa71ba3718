//! Sitemap file names recognized by the server.

/// File name of the sitemap index.
pub const INDEX_FILE: &str = "sitemap.xml";

/// A request target under `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapPath {
    /// `/sitemap.xml`
    Index,
    /// `/sitemap-N.xml`
    Page(u32),
}

impl SitemapPath {
    /// Recognize `sitemap.xml` and `sitemap-N.xml` with a canonical decimal `N`.
    ///
    /// Leading zeros are rejected so every page has exactly one file name.
    /// Page `0` parses and lies before the first page.
    pub fn parse(file: &str) -> Option<Self> {
        if file == INDEX_FILE {
            return Some(Self::Index);
        }

        let digits = file.strip_prefix("sitemap-")?.strip_suffix(".xml")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        digits.parse().ok().map(Self::Page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_pages() {
        assert_eq!(SitemapPath::parse("sitemap.xml"), Some(SitemapPath::Index));
        assert_eq!(SitemapPath::parse("sitemap-1.xml"), Some(SitemapPath::Page(1)));
        assert_eq!(
            SitemapPath::parse("sitemap-120.xml"),
            Some(SitemapPath::Page(120))
        );
        assert_eq!(SitemapPath::parse("sitemap-0.xml"), Some(SitemapPath::Page(0)));
    }

    #[test]
    fn test_rejects_other_files() {
        for file in [
            "sitemap-.xml",
            "sitemap-a.xml",
            "sitemap--1.xml",
            "sitemap-01.xml",
            "sitemap-007.xml",
            "sitemap-00.xml",
            "sitemap-+1.xml",
            "sitemap-1.xml.gz",
            "sitemap-99999999999.xml",
            "sitemaps.xml",
            "index.html",
            "",
        ] {
            assert_eq!(SitemapPath::parse(file), None, "{file}");
        }
    }
}
