//! Site scope of a sitemap request.
//!
//! A request restricts the sitemap either to everything except some sites,
//! to only some sites, or not at all. Excludes win when both lists are given.

use serde::{Deserialize, Serialize};

/// Query parameter carrying excluded site identifiers.
pub const SITE_EXCLUDES_PARAM: &str = "siteExcludes";
/// Query parameter carrying included site identifiers.
pub const SITE_INCLUDES_PARAM: &str = "siteIncludes";

/// Which sites a sitemap covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "sites")]
pub enum SiteScope {
    /// Every site.
    #[default]
    Unrestricted,
    /// Every site except these.
    Exclude(Vec<String>),
    /// Only these sites.
    Include(Vec<String>),
}

impl SiteScope {
    /// Resolve a scope from both lists; a non-empty exclude list wins.
    pub fn from_lists(excludes: Vec<String>, includes: Vec<String>) -> Self {
        if !excludes.is_empty() {
            Self::Exclude(excludes)
        } else if !includes.is_empty() {
            Self::Include(includes)
        } else {
            Self::Unrestricted
        }
    }

    /// Resolve a scope from the two comma-separated parameter values.
    pub fn from_csv(excludes: Option<&str>, includes: Option<&str>) -> Self {
        Self::from_lists(
            parse_site_list(excludes.unwrap_or_default()),
            parse_site_list(includes.unwrap_or_default()),
        )
    }

    /// Resolve a scope from a raw, still percent-encoded query string.
    ///
    /// Unknown parameters are ignored, a repeated parameter keeps its last
    /// value, and anything unparsable simply yields no restriction.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unrestricted;
        };

        let mut excludes = None;
        let mut includes = None;
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                SITE_EXCLUDES_PARAM => excludes = Some(value.into_owned()),
                SITE_INCLUDES_PARAM => includes = Some(value.into_owned()),
                _ => {},
            }
        }

        Self::from_csv(excludes.as_deref(), includes.as_deref())
    }

    /// Query string that reproduces this scope on a sub-sitemap location,
    /// including the leading `?`. Empty when unrestricted.
    ///
    /// Site identifiers are appended verbatim.
    pub fn query_string(&self) -> String {
        match self {
            Self::Unrestricted => String::new(),
            Self::Exclude(sites) => format!("?{SITE_EXCLUDES_PARAM}={}", sites.join(",")),
            Self::Include(sites) => format!("?{SITE_INCLUDES_PARAM}={}", sites.join(",")),
        }
    }
}

/// Split a comma-separated list of site identifiers.
///
/// Surrounding whitespace is trimmed and empty tokens are dropped.
pub fn parse_site_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sites(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_site_list() {
        assert_eq!(parse_site_list("12,13"), sites(&["12", "13"]));
        assert_eq!(parse_site_list(""), Vec::<String>::new());
        assert_eq!(parse_site_list(" 12 , ,13,"), sites(&["12", "13"]));
    }

    #[test]
    fn test_excludes_take_precedence() {
        let scope = SiteScope::from_lists(sites(&["12", "13"]), sites(&["14", "15"]));
        assert_eq!(scope, SiteScope::Exclude(sites(&["12", "13"])));
    }

    #[test]
    fn test_includes_used_without_excludes() {
        let scope = SiteScope::from_csv(Some(""), Some("14,15"));
        assert_eq!(scope, SiteScope::Include(sites(&["14", "15"])));
    }

    #[test]
    fn test_missing_parameters_unrestricted() {
        assert_eq!(SiteScope::from_csv(None, None), SiteScope::Unrestricted);
        assert_eq!(SiteScope::from_query(None), SiteScope::Unrestricted);
        assert_eq!(SiteScope::from_query(Some("")), SiteScope::Unrestricted);
        assert_eq!(
            SiteScope::from_query(Some("foo=bar&&=")),
            SiteScope::Unrestricted
        );
    }

    #[test]
    fn test_from_query_decodes_values() {
        let scope = SiteScope::from_query(Some("siteExcludes=12%2C13&siteIncludes=14"));
        assert_eq!(scope, SiteScope::Exclude(sites(&["12", "13"])));

        let scope = SiteScope::from_query(Some("siteIncludes=14,15"));
        assert_eq!(scope, SiteScope::Include(sites(&["14", "15"])));
    }

    #[test]
    fn test_query_string() {
        assert_eq!(SiteScope::Unrestricted.query_string(), "");
        assert_eq!(
            SiteScope::Exclude(sites(&["12", "13"])).query_string(),
            "?siteExcludes=12,13"
        );
        assert_eq!(
            SiteScope::Include(sites(&["14", "15"])).query_string(),
            "?siteIncludes=14,15"
        );
    }

    proptest! {
        #[test]
        fn test_exclude_always_wins(
            excludes in prop::collection::vec("[a-z0-9]{1,4}", 1..5),
            includes in prop::collection::vec("[a-z0-9]{1,4}", 0..5),
        ) {
            let scope = SiteScope::from_lists(excludes.clone(), includes);
            prop_assert_eq!(scope, SiteScope::Exclude(excludes));
        }

        #[test]
        fn test_csv_round_trips_through_query_string(
            list in prop::collection::vec("[a-z0-9]{1,4}", 1..5),
        ) {
            let scope = SiteScope::Include(list);
            let rendered = scope.query_string();
            let reparsed = SiteScope::from_query(rendered.strip_prefix('?'));
            prop_assert_eq!(reparsed, scope);
        }
    }
}
