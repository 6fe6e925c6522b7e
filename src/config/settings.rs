//! Release notes settings: checklists, links, and the binaries table.
//!
//! Settings come from an optional TOML file. Anything the file leaves out
//! falls back to the built-in defaults, so an empty file is valid.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the binaries table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBinary {
    /// Operating system label, e.g. "macOS"
    pub system: String,
    /// Icon URL shown in the System column
    pub icon: String,
    /// Architecture label, e.g. "x86_64"
    pub arch: String,
    /// Target suffix used in archive names, e.g. "x86_64-apple-darwin"
    pub target: String,
}

impl PlatformBinary {
    fn new(system: &str, icon: &str, arch: &str, target: &str) -> Self {
        Self {
            system: system.to_string(),
            icon: icon.to_string(),
            arch: arch.to_string(),
            target: target.to_string(),
        }
    }

    /// Archive file name for this platform: `{project}-{version}-{target}.tar.gz`
    pub fn archive_name(&self, project: &str, version: &str) -> String {
        format!("{}-{}-{}.tar.gz", project, version, self.target)
    }
}

const APPLE_ICON: &str = "https://simpleicons.org/icons/apple.svg";
const LINUX_ICON: &str = "https://simpleicons.org/icons/linux.svg";
const RASPBERRY_ICON: &str = "https://simpleicons.org/icons/raspberrypi.svg";
const WINDOWS_ICON: &str = "https://simpleicons.org/icons/windows.svg";

/// Default binaries table
pub fn default_platforms() -> Vec<PlatformBinary> {
    vec![
        PlatformBinary::new("macOS", APPLE_ICON, "x86_64", "x86_64-apple-darwin"),
        PlatformBinary::new("Linux", LINUX_ICON, "x86_64", "x86_64-unknown-linux-gnu"),
        PlatformBinary::new("Raspberry Pi", RASPBERRY_ICON, "aarch64", "aarch64-unknown-linux-gnu"),
        PlatformBinary::new("Windows", WINDOWS_ICON, "x86_64", "x86_64-windows"),
    ]
}

/// Settings controlling the rendered release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseSettings {
    /// Archive name prefix. Empty means "use the repository name"
    pub project: String,
    /// Fingerprint of the key signing the binaries
    pub pgp_fingerprint: String,
    /// Documentation page for pre-built binaries
    pub binaries_doc_url: String,
    /// Documentation page explaining the update priority table
    pub update_priorities_url: String,
    /// Manual testing checklist items
    pub testing_checklist: Vec<String>,
    /// Manual release checklist items
    pub release_checklist: Vec<String>,
    /// Binaries table rows
    pub platforms: Vec<PlatformBinary>,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            project: String::new(),
            pgp_fingerprint: "<FINGERPRINT>".to_string(),
            binaries_doc_url: String::new(),
            update_priorities_url: String::new(),
            testing_checklist: vec![
                "Run on synced testnet nodes.".to_string(),
                "Run on synced mainnet nodes.".to_string(),
                "Resync a testnet node.".to_string(),
                "Resync a mainnet node.".to_string(),
            ],
            release_checklist: vec![
                "Merge `unstable` -> `stable`.".to_string(),
                "Ensure docker images are published (check `latest` and the version tag)."
                    .to_string(),
                "Prepare Discord post.".to_string(),
                "Prepare Twitter post.".to_string(),
                "Prepare mailing list email.".to_string(),
            ],
            platforms: default_platforms(),
        }
    }
}

impl ReleaseSettings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ConfigError::SettingsUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        let settings = Self::from_toml(&content)?;
        log::debug!(
            "Loaded release settings from {} ({} platforms)",
            path.display(),
            settings.platforms.len()
        );
        Ok(settings)
    }

    /// Archive prefix, falling back to the repository name
    pub fn project_or<'a>(&'a self, repo_name: &'a str) -> &'a str {
        if self.project.trim().is_empty() {
            repo_name
        } else {
            &self.project
        }
    }
}
