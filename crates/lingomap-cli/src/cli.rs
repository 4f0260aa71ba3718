//! # CLI Structure and Argument Parsing
//!
//! The `lingomap` binary serves sitemaps over HTTP and renders the same
//! documents offline for inspection.
//!
//! ```bash
//! # Load resources into the search index
//! lingomap ingest resources.jsonl
//!
//! # Serve /sitemap.xml, /sitemap-N.xml and /robots.txt
//! lingomap serve --bind 0.0.0.0:8080
//!
//! # Render documents to stdout
//! lingomap index --site-excludes 12,13
//! lingomap page 2 --base-url https://www.example.com
//! ```

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LINGOMAP_CONFIG";

/// Main CLI structure for the `lingomap` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "lingomap")]
#[command(version)]
#[command(about = "lingomap - Multi-language XML sitemaps from a search index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `LINGOMAP_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Serve sitemaps over HTTP
    Serve {
        /// Address to listen on (defaults to `server.bind`)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Add or replace resources from a JSON Lines file
    ///
    /// Each line is an object with `path` and `site`, and optionally
    /// `source`, `contentType` and `title`. Use `-` to read stdin.
    Ingest {
        /// Resource file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the sitemap index document to stdout
    Index(RenderArgs),

    /// Write one sitemap page to stdout
    Page {
        /// Page number, starting at 1
        #[arg(value_name = "N")]
        page: u32,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Options shared by the offline rendering commands.
#[derive(Args, Clone, Debug, Default)]
pub struct RenderArgs {
    /// Base URL for absolute locations (defaults to `server.public_base_url`)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Comma-separated sites to leave out
    #[arg(long, value_name = "CSV")]
    pub site_excludes: Option<String>,

    /// Comma-separated sites to restrict to (ignored when excludes are given)
    #[arg(long, value_name = "CSV")]
    pub site_includes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_page_with_scope() {
        let cli = Cli::try_parse_from([
            "lingomap",
            "page",
            "3",
            "--site-includes",
            "14,15",
            "--base-url",
            "https://example.com",
        ])
        .unwrap();

        match cli.command {
            Commands::Page { page, render } => {
                assert_eq!(page, 3);
                assert_eq!(render.site_includes.as_deref(), Some("14,15"));
                assert_eq!(render.base_url.as_deref(), Some("https://example.com"));
                assert!(render.site_excludes.is_none());
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lingomap", "serve", "--verbose", "--config", "x.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["lingomap", "-v", "-q", "index"]).is_err());
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["lingomap", "serve", "--bind", "nowhere"]).is_err());
    }
}
