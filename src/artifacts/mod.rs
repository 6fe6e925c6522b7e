//! Retrieval of build artifacts staged by an earlier pipeline run.
//!
//! Artifacts land in the workspace after history has been acquired, since a
//! fetch can rewrite the working tree. Retrieved files are listed but never
//! attached to the release.

mod archive;

use crate::error::{ArtifactError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Where staged artifacts come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Directory holding the artifact bundles
    Directory(PathBuf),
    /// ZIP archive served over HTTP(S)
    Archive(Url),
}

impl ArtifactSource {
    /// `http(s)://` values are archives; anything else is a directory
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Archive(url),
            _ => Self::Directory(PathBuf::from(value)),
        }
    }

    /// Place the artifacts under `workspace`, returning the files written
    pub async fn retrieve(&self, workspace: &Path) -> Result<Vec<PathBuf>> {
        let files = match self {
            Self::Directory(dir) => copy_directory(dir, workspace).await?,
            Self::Archive(url) => {
                let data = archive::download(url).await?;
                archive::extract_zip(&data, workspace).await?
            }
        };

        log::info!("Retrieved {} artifact file(s)", files.len());
        for file in &files {
            log::debug!("  {}", file.display());
        }
        Ok(files)
    }
}

/// Copy every file under `source` into `dest`, keeping relative paths
async fn copy_directory(source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(ArtifactError::SourceMissing {
            path: source.to_path_buf(),
        }
        .into());
    }

    let source = source.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for entry in walkdir::WalkDir::new(&source).sort_by_file_name() {
            let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&source)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
            written.push(target);
        }
        Ok(written)
    })
    .await
    .map_err(|e| ArtifactError::Extract {
        reason: format!("Copy task failed: {}", e),
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sources() {
        assert!(matches!(
            ArtifactSource::parse("https://example.com/artifacts.zip"),
            ArtifactSource::Archive(_)
        ));
        assert_eq!(
            ArtifactSource::parse("./staged"),
            ArtifactSource::Directory(PathBuf::from("./staged"))
        );
        assert_eq!(
            ArtifactSource::parse("C:/artifacts"),
            ArtifactSource::Directory(PathBuf::from("C:/artifacts"))
        );
    }

    #[tokio::test]
    async fn copies_nested_files() {
        let staged = tempfile::tempdir().expect("tempdir");
        let workspace = tempfile::tempdir().expect("tempdir");

        let nested = staged.path().join("x86_64-apple-darwin");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::write(nested.join("app.tar.gz"), b"bin").expect("write");
        std::fs::write(nested.join("app.tar.gz.asc"), b"sig").expect("write");

        let files = ArtifactSource::Directory(staged.path().to_path_buf())
            .retrieve(workspace.path())
            .await
            .expect("retrieve");

        assert_eq!(files.len(), 2);
        let copied = workspace.path().join("x86_64-apple-darwin/app.tar.gz");
        assert_eq!(std::fs::read(copied).expect("read"), b"bin");
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let workspace = tempfile::tempdir().expect("tempdir");
        let err = ArtifactSource::Directory(workspace.path().join("nope"))
            .retrieve(workspace.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Artifact(ArtifactError::SourceMissing { .. })
        ));
    }
}
