//! Error types and handling for lingomap-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! grouped into categories so the HTTP layer can pick a status code and the
//! logs can be filtered without string matching.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: writing the response body, reading config or resource files
//! - **XML Errors**: the streaming writer rejected an event
//! - **Index Errors**: tantivy index creation, ingestion or querying
//! - **Search / Rewrite Errors**: failures reported by external collaborators
//! - **Configuration Errors**: invalid settings, detected at startup
//!
//! ```rust
//! use lingomap_core::Error;
//!
//! let err = Error::Config("max_urls_per_page must be positive".into());
//! assert_eq!(err.category(), "config");
//! ```

use thiserror::Error;

/// The main error type for lingomap-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Most commonly the response writer went away while a document was
    /// being streamed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// Input could not be parsed (resource files, page numbers, locales).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Search index operation failed.
    ///
    /// Covers tantivy failures while creating, writing or querying the index.
    #[error("Index error: {0}")]
    Index(String),

    /// The search collaborator failed to answer a query.
    #[error("Search error: {0}")]
    Search(String),

    /// The URL-rewrite collaborator failed for a path.
    #[error("Rewrite error for '{path}': {reason}")]
    Rewrite {
        /// Path that was being rewritten.
        path: String,
        /// Reason reported by the rewriter.
        reason: String,
    },

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - `max_urls_per_page` smaller than the number of configured languages
    /// - Empty or duplicate locales in the language set
    /// - Malformed TOML in the config file
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Io(std::io::Error::new(io.kind(), io.to_string())),
            other => Self::Xml(other.to_string()),
        }
    }
}

impl From<tantivy::TantivyError> for Error {
    fn from(err: tantivy::TantivyError) -> Self {
        Self::Index(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// Used as a structured logging field and to map errors to HTTP status
    /// codes.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Xml(_) => "xml",
            Self::Parse(_) => "parse",
            Self::Index(_) => "index",
            Self::Search(_) => "search",
            Self::Rewrite { .. } => "rewrite",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unnecessary_wraps)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let cases = vec![
            (Error::Parse("bad page".into()), "Parse error: bad page"),
            (Error::Index("corrupt".into()), "Index error: corrupt"),
            (Error::Config("zero capacity".into()), "Configuration error: zero capacity"),
            (Error::Search("down".into()), "Search error: down"),
            (
                Error::Rewrite {
                    path: "/a".into(),
                    reason: "no rule".into(),
                },
                "Rewrite error for '/a': no rule",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "client went away");
        let error: Error = io_error.into();

        assert!(matches!(error, Error::Io(_)));
        assert_eq!(error.category(), "io");
        assert!(error.to_string().contains("client went away"));
    }

    #[test]
    fn test_result_type_alias() {
        fn ok() -> Result<u32> {
            Ok(7)
        }
        fn err() -> Result<u32> {
            Err(Error::Search("nope".into()))
        }

        assert_eq!(ok().unwrap(), 7);
        assert!(err().is_err());
    }

    proptest! {
        #[test]
        fn test_parse_error_keeps_message(msg in r".{0,200}") {
            let error = Error::Parse(msg.clone());
            prop_assert_eq!(error.to_string(), format!("Parse error: {msg}"));
            prop_assert_eq!(error.category(), "parse");
        }
    }
}
