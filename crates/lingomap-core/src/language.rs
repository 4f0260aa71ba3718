//! Locales and the ordered language set of a channel.
//!
//! The first language is the primary one: its URLs carry no language prefix.
//! Every translation is addressed below `/<subtag>`, where the subtag is the
//! primary language subtag of its locale (`en_US` -> `en`).

use crate::{Error, Result};
use std::fmt;

/// A locale identifier such as `de_DE`, `en-US` or `it`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Parse a locale, rejecting empty input and a missing language subtag.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let subtag = trimmed.split(['_', '-']).next().unwrap_or_default();
        if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Parse(format!("Invalid locale: '{raw}'")));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Primary language subtag, lowercased (`de_DE` -> `de`).
    pub fn primary_language(&self) -> String {
        self.0
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// The locale as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One member of a [`LanguageSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    locale: Locale,
    primary: bool,
}

impl Language {
    /// Whether this is the unprefixed primary language.
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Locale this language was configured with.
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Value used for `hreflang` attributes.
    pub fn tag(&self) -> String {
        self.locale.primary_language()
    }

    /// Path prefix for this language: empty for the primary one, `/<subtag>`
    /// otherwise.
    pub fn path_prefix(&self) -> String {
        if self.primary {
            String::new()
        } else {
            format!("/{}", self.locale.primary_language())
        }
    }
}

/// Ordered set of languages: the primary language first, then translations
/// in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    languages: Vec<Language>,
}

impl LanguageSet {
    /// Build a language set from a primary locale and its translations.
    ///
    /// Fails when two entries share a language subtag, since their URLs
    /// would collide.
    pub fn new(primary: Locale, translations: Vec<Locale>) -> Result<Self> {
        let mut languages = Vec::with_capacity(translations.len() + 1);
        languages.push(Language {
            locale: primary,
            primary: true,
        });

        for locale in translations {
            let subtag = locale.primary_language();
            if languages.iter().any(|l| l.tag() == subtag) {
                return Err(Error::Config(format!(
                    "Duplicate language '{subtag}' in language set"
                )));
            }
            languages.push(Language {
                locale,
                primary: false,
            });
        }

        Ok(Self { languages })
    }

    /// Convenience constructor from raw locale strings.
    pub fn from_codes(primary: &str, translations: &[&str]) -> Result<Self> {
        let translations = translations
            .iter()
            .map(|code| Locale::parse(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(Locale::parse(primary)?, translations)
    }

    /// Number of languages, primary included. Always at least one.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always `false`; a language set contains its primary language.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// The unprefixed primary language.
    pub fn primary(&self) -> &Language {
        &self.languages[0]
    }

    /// Iterate languages in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Language> {
        self.languages.iter()
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a Language;
    type IntoIter = std::slice::Iter<'a, Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_language_extraction() {
        assert_eq!(Locale::parse("de_DE").unwrap().primary_language(), "de");
        assert_eq!(Locale::parse("en-US").unwrap().primary_language(), "en");
        assert_eq!(Locale::parse("IT").unwrap().primary_language(), "it");
    }

    #[test]
    fn test_invalid_locales_rejected() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("  ").is_err());
        assert!(Locale::parse("_DE").is_err());
        assert!(Locale::parse("1x_DE").is_err());
    }

    #[test]
    fn test_language_set_order_and_prefixes() {
        let set = LanguageSet::from_codes("de_DE", &["en_US", "it_IT"]).unwrap();

        assert_eq!(set.len(), 3);
        let prefixes: Vec<_> = set.iter().map(Language::path_prefix).collect();
        assert_eq!(prefixes, vec!["", "/en", "/it"]);

        let tags: Vec<_> = set.iter().map(Language::tag).collect();
        assert_eq!(tags, vec!["de", "en", "it"]);
        assert!(set.primary().is_primary());
    }

    #[test]
    fn test_duplicate_subtags_rejected() {
        let err = LanguageSet::from_codes("en_GB", &["en_US"]).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_single_language_set() {
        let set = LanguageSet::from_codes("fr_FR", &[]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
