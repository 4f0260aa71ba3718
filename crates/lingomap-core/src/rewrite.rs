//! Boundary to the URL-rewrite collaborator.
//!
//! Sitemap code hands every language-prefixed path to a [`UrlRewriter`] and
//! treats the answer as opaque. [`PrefixRewriter`] is the rule-based rewriter
//! used by the `lingomap` binary.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// What kind of reference is being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RewriteKind {
    /// A link to a page.
    Link,
}

/// Extra knobs for a rewrite; sitemap links never set any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct RewriteOptions {}

impl RewriteOptions {
    /// No options.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Turns internal paths into public-facing URLs.
pub trait UrlRewriter: Send + Sync {
    /// Rewrite a path.
    fn rewrite(&self, kind: RewriteKind, path: &str, options: &RewriteOptions) -> Result<String>;
}

impl<T: UrlRewriter + ?Sized> UrlRewriter for std::sync::Arc<T> {
    fn rewrite(&self, kind: RewriteKind, path: &str, options: &RewriteOptions) -> Result<String> {
        (**self).rewrite(kind, path, options)
    }
}

/// One `prefix -> replacement` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Path prefix to match; must start with `/`.
    pub prefix: String,
    /// Text substituted for the prefix.
    pub replacement: String,
}

/// Applies the first rule whose prefix matches; unmatched paths pass through.
#[derive(Debug, Clone, Default)]
pub struct PrefixRewriter {
    rules: Vec<RewriteRule>,
}

impl PrefixRewriter {
    /// Build a rewriter from rules, checked in order.
    pub fn new(rules: Vec<RewriteRule>) -> Result<Self> {
        if let Some(rule) = rules.iter().find(|r| !r.prefix.starts_with('/')) {
            return Err(Error::Config(format!(
                "Rewrite prefix '{}' must start with '/'",
                rule.prefix
            )));
        }
        Ok(Self { rules })
    }
}

impl UrlRewriter for PrefixRewriter {
    fn rewrite(&self, kind: RewriteKind, path: &str, _: &RewriteOptions) -> Result<String> {
        let RewriteKind::Link = kind;

        let rewritten = self
            .rules
            .iter()
            .find(|rule| path.starts_with(rule.prefix.as_str()))
            .map_or_else(
                || path.to_string(),
                |rule| format!("{}{}", rule.replacement, &path[rule.prefix.len()..]),
            );
        if rewritten.is_empty() {
            return Ok("/".to_string());
        }
        Ok(rewritten)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule(prefix: &str, replacement: &str) -> RewriteRule {
        RewriteRule {
            prefix: prefix.into(),
            replacement: replacement.into(),
        }
    }

    #[test]
    fn test_passthrough_without_rules() {
        let rewriter = PrefixRewriter::default();
        let url = rewriter
            .rewrite(RewriteKind::Link, "/en/a", &RewriteOptions::none())
            .unwrap();
        assert_eq!(url, "/en/a");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rewriter = PrefixRewriter::new(vec![
            rule("/objects/news", "/news"),
            rule("/objects", ""),
        ])
        .unwrap();

        let news = rewriter
            .rewrite(RewriteKind::Link, "/objects/news/x.php", &RewriteOptions::none())
            .unwrap();
        assert_eq!(news, "/news/x.php");

        let other = rewriter
            .rewrite(RewriteKind::Link, "/objects/y.php", &RewriteOptions::none())
            .unwrap();
        assert_eq!(other, "/y.php");
    }

    #[test]
    fn test_rewrite_never_yields_empty_path() {
        let rewriter = PrefixRewriter::new(vec![rule("/home", "")]).unwrap();
        let url = rewriter
            .rewrite(RewriteKind::Link, "/home", &RewriteOptions::none())
            .unwrap();
        assert_eq!(url, "/");
    }

    #[test]
    fn test_relative_prefix_rejected() {
        assert!(PrefixRewriter::new(vec![rule("objects", "")]).is_err());
    }
}
