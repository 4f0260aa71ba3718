//! Language-aware URL construction.

use crate::Result;
use crate::language::Language;
use crate::rewrite::{RewriteKind, RewriteOptions, UrlRewriter};
use std::sync::Arc;

/// Builds the public URL of a resource in one language.
#[derive(Clone)]
pub struct UrlBuilder {
    rewriter: Arc<dyn UrlRewriter>,
}

impl UrlBuilder {
    /// Wrap a rewrite collaborator.
    pub fn new(rewriter: Arc<dyn UrlRewriter>) -> Self {
        Self { rewriter }
    }

    /// Prefix `path` with the language's path prefix and rewrite it as a link.
    ///
    /// Rewriter failures are returned unchanged.
    pub fn build(&self, language: &Language, path: &str) -> Result<String> {
        let localized = format!("{}{path}", language.path_prefix());
        self.rewriter
            .rewrite(RewriteKind::Link, &localized, &RewriteOptions::none())
    }
}

impl std::fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlBuilder").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::language::LanguageSet;
    use crate::{Error, PrefixRewriter};

    struct FailingRewriter;

    impl UrlRewriter for FailingRewriter {
        fn rewrite(&self, _: RewriteKind, path: &str, _: &RewriteOptions) -> Result<String> {
            Err(Error::Rewrite {
                path: path.to_string(),
                reason: "unavailable".into(),
            })
        }
    }

    #[test]
    fn test_primary_language_path_unchanged() {
        let set = LanguageSet::from_codes("de_DE", &["en_US"]).unwrap();
        let builder = UrlBuilder::new(Arc::new(PrefixRewriter::default()));

        assert_eq!(builder.build(set.primary(), "/a").unwrap(), "/a");
    }

    #[test]
    fn test_translation_prefixed_with_subtag() {
        let set = LanguageSet::from_codes("de_DE", &["en_US"]).unwrap();
        let builder = UrlBuilder::new(Arc::new(PrefixRewriter::default()));
        let english = set.iter().nth(1).unwrap();

        assert_eq!(builder.build(english, "/a/b.php").unwrap(), "/en/a/b.php");
    }

    #[test]
    fn test_rewriter_failure_propagates() {
        let set = LanguageSet::from_codes("de_DE", &[]).unwrap();
        let builder = UrlBuilder::new(Arc::new(FailingRewriter));

        let err = builder.build(set.primary(), "/a").unwrap_err();
        assert!(matches!(err, Error::Rewrite { ref path, .. } if path == "/a"));
    }
}
