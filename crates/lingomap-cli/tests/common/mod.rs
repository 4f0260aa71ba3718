#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// A config file and index directory that live as long as the test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Two languages, two hits per page, index under the temp dir.
    pub fn new() -> Self {
        Self::with_config(
            r#"
[sitemap]
max_urls_per_page = 4

[languages]
primary = "de_DE"
translations = ["en_US"]

[server]
public_base_url = "https://www.example.com"
"#,
        )
    }

    pub fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let index = dir.path().join("index");
        let config = format!("{extra}\n[index]\npath = {:?}\n", index.display().to_string());
        std::fs::write(dir.path().join("lingomap.toml"), config).unwrap();
        Self { dir }
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.path().join("index")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("lingomap.toml")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// A `lingomap` command pointed at this workspace's config.
    pub fn cmd(&self) -> Command {
        lingomap_cmd(&self.config_path())
    }
}

pub fn lingomap_cmd(config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lingomap"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("LINGOMAP_CONFIG", config);
    cmd.env("NO_COLOR", "1");
    cmd
}
