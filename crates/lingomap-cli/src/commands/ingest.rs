//! `lingomap ingest`

use anyhow::{Context, Result, ensure};
use lingomap_core::{Config, Resource, SearchIndex};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read JSON Lines resources from `file` (or stdin for `-`) into the index.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a line is not a valid
/// resource, or the index cannot be written.
pub fn execute(config: &Config, file: &Path, quiet: bool) -> Result<()> {
    let content = if file == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read resources from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let resources = parse_resources(&content)?;
    debug!(count = resources.len(), "Parsed resources");

    let mut index = SearchIndex::open_or_create(&config.index.path).with_context(|| {
        format!(
            "Failed to open search index at {}",
            config.index.path.display()
        )
    })?;
    let written = index.index_resources(&resources)?;

    if !quiet {
        println!(
            "Indexed {written} resources ({} in index)",
            index.document_count()
        );
    }
    Ok(())
}

/// Parse one resource per non-blank line.
pub fn parse_resources(content: &str) -> Result<Vec<Resource>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            let resource: Resource = serde_json::from_str(line)
                .with_context(|| format!("Invalid resource on line {}", number + 1))?;
            ensure!(
                resource.path.starts_with('/'),
                "Resource path on line {} must start with '/': {}",
                number + 1,
                resource.path
            );
            Ok(resource)
        })
        .collect()
}
