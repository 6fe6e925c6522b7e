//! Runner step outputs.
//!
//! Hosted runners read `KEY=value` lines from the file named by
//! `GITHUB_OUTPUT`. Writing there lets `extract-version` feed a later job
//! when the tool runs as one step of a larger workflow.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Environment variable naming the runner's output file
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// Append-only writer for runner step outputs
#[derive(Debug, Clone)]
pub struct StepOutput {
    path: PathBuf,
}

impl StepOutput {
    /// Writer targeting an explicit file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer targeting `GITHUB_OUTPUT`, if set and non-empty
    pub fn from_env() -> Option<Self> {
        std::env::var_os(OUTPUT_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    /// Output file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `key=value` as one line.
    ///
    /// Values containing newlines use the heredoc form runners accept.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let line = if value.contains('\n') {
            let delimiter = format!("EOF_{}", key.to_uppercase());
            format!("{key}<<{delimiter}\n{value}\n{delimiter}\n")
        } else {
            format!("{key}={value}\n")
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        log::debug!("Wrote step output {} to {}", key, self.path.display());
        Ok(())
    }
}
