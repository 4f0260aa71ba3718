//! Expansion of search hits into per-language URL entries.
//!
//! Every hit yields one entry per language, in language-set order. Each entry
//! carries an `alternate` link to every other language variant of the same
//! resource, so a set of `n` languages produces `n` entries with `n - 1`
//! links each.

use crate::Result;
use crate::language::LanguageSet;
use crate::types::{ChangeFrequency, Link, UrlEntry};
use crate::url::UrlBuilder;

/// Link relation used for language variants.
pub const ALTERNATE: &str = "alternate";

/// Change frequency advertised for every entry.
pub const DEFAULT_CHANGE_FREQUENCY: ChangeFrequency = ChangeFrequency::Daily;

/// Priority advertised for every entry.
pub const DEFAULT_PRIORITY: f32 = 1.0;

/// Turns one resource path into its language variants.
#[derive(Debug, Clone)]
pub struct EntryExpander {
    languages: LanguageSet,
    urls: UrlBuilder,
}

impl EntryExpander {
    /// Create an expander for a language set.
    pub const fn new(languages: LanguageSet, urls: UrlBuilder) -> Self {
        Self { languages, urls }
    }

    /// The language set entries are expanded into.
    pub const fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    /// Expand one hit path into one entry per language.
    ///
    /// The URL of each variant is built once and shared between the entry's
    /// `loc` and the links of its siblings.
    pub fn expand(&self, path: &str) -> Result<Vec<UrlEntry>> {
        let variants = self
            .languages
            .iter()
            .map(|language| Ok((language.tag(), self.urls.build(language, path)?)))
            .collect::<Result<Vec<_>>>()?;

        let entries = variants
            .iter()
            .enumerate()
            .map(|(index, (_, loc))| UrlEntry {
                loc: loc.clone(),
                last_mod: None,
                change_freq: DEFAULT_CHANGE_FREQUENCY,
                priority: DEFAULT_PRIORITY,
                links: variants
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, (tag, href))| Link {
                        rel: ALTERNATE.to_string(),
                        href_lang: tag.clone(),
                        href: href.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(entries)
    }
}
