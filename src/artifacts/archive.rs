//! Download and extraction of zipped artifact bundles.

use crate::error::{ArtifactError, Result};
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Download an artifact bundle, returning its bytes
pub(super) async fn download(url: &Url) -> Result<Vec<u8>> {
    log::info!("Downloading artifacts from {}", url);

    let response = reqwest::get(url.clone())
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ArtifactError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let bytes = response.bytes().await.map_err(|e| ArtifactError::Download {
        url: url.to_string(),
        reason: format!("Failed to read response: {}", e),
    })?;

    Ok(bytes.to_vec())
}

/// Reject entry names that could escape the destination directory.
///
/// Backslashes count as separators and `X:` drive names are refused on
/// every platform.
fn is_safe_entry(name: &str) -> bool {
    let normalized = name.replace('\\', "/");
    let drive = normalized.as_bytes().get(1) == Some(&b':');
    !drive
        && Path::new(&normalized)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Extract a ZIP archive from memory into `dest`.
///
/// Entries with parent-directory components, absolute paths, or drive
/// prefixes are rejected.
pub(super) async fn extract_zip(data: &[u8], dest: &Path) -> Result<Vec<PathBuf>> {
    use async_zip::base::read::mem::ZipFileReader;
    use futures_lite::io::AsyncReadExt as _;

    let reader = ZipFileReader::new(data.to_vec())
        .await
        .map_err(|e| ArtifactError::Extract {
            reason: format!("Failed to read ZIP archive: {}", e),
        })?;

    let mut written = Vec::new();

    for i in 0..reader.file().entries().len() {
        let entry = reader
            .file()
            .entries()
            .get(i)
            .ok_or_else(|| ArtifactError::Extract {
                reason: format!("Failed to get ZIP entry {}", i),
            })?;

        let filename = entry
            .filename()
            .as_str()
            .map_err(|e| ArtifactError::Extract {
                reason: format!("Invalid filename in ZIP: {}", e),
            })?
            .to_string();

        if !is_safe_entry(&filename) {
            return Err(ArtifactError::UnsafeEntry { entry: filename }.into());
        }

        let is_dir = entry.dir().map_err(|e| ArtifactError::Extract {
            reason: format!("Failed to check if entry is directory: {}", e),
        })?;
        if is_dir {
            tokio::fs::create_dir_all(dest.join(&filename)).await?;
            continue;
        }

        let file_path = dest.join(&filename);
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut entry_reader =
            reader
                .reader_with_entry(i)
                .await
                .map_err(|e| ArtifactError::Extract {
                    reason: format!("Failed to read ZIP entry: {}", e),
                })?;
        let mut content = Vec::new();
        entry_reader.read_to_end(&mut content).await?;

        tokio::fs::write(&file_path, content).await?;
        written.push(file_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_entries() {
        assert!(is_safe_entry("lighthouse-v1.2.3-x86_64-windows.tar.gz"));
        assert!(is_safe_entry("nested/dir/file.asc"));
        assert!(!is_safe_entry("../etc/passwd"));
        assert!(!is_safe_entry("/abs/path"));
        assert!(!is_safe_entry("\\windows"));
        assert!(!is_safe_entry("C:evil"));
        assert!(!is_safe_entry("nested/../../escape"));
        assert!(!is_safe_entry("nested\\..\\..\\escape"));
    }

    #[test]
    fn dots_inside_names_are_allowed() {
        assert!(is_safe_entry("app-v1..tar.gz"));
        assert!(is_safe_entry("dist/release..notes.md"));
        assert!(is_safe_entry("./lighthouse-v1.2.3-x86_64-apple-darwin.tar.gz"));
    }

    #[tokio::test]
    async fn garbage_is_not_an_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = extract_zip(b"definitely not a zip", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Artifact(ArtifactError::Extract { .. })
        ));
    }
}
