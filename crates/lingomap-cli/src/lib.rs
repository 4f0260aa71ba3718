//! lingomap CLI - multi-language XML sitemaps from a search index
//!
//! This is the library behind the `lingomap` binary. Command implementations
//! live in [`commands`]; the HTTP surface lives in [`server`].

use anyhow::{Context, Result};
use lingomap_core::Config;
use tracing::debug;

pub mod cli;
pub mod commands;
pub mod server;
mod utils;

use crate::cli::{Cli, Commands};
use crate::utils::initialize_logging;

/// Execute the lingomap CLI with the given arguments.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails.
pub async fn run(cli: Cli) -> Result<()> {
    initialize_logging(&cli)?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    debug!(?config, "Configuration loaded");

    execute_command(cli, &config).await
}

async fn execute_command(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Serve { bind } => commands::serve(config, bind).await?,
        Commands::Ingest { file } => commands::ingest_resources(config, &file, cli.quiet)?,
        Commands::Index(args) => commands::render_index(config, &args)?,
        Commands::Page { page, render } => commands::render_page(config, page, &render)?,
    }
    Ok(())
}
