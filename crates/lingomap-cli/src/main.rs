//! lingomap CLI entry point.

use clap::Parser;
use lingomap_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lingomap_cli::run(Cli::parse()).await
}
