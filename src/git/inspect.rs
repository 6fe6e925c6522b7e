//! Reference inspection using gix.
//!
//! Looks up the release tag without spawning git, so a wrong or missing tag
//! is reported before any history query runs.

use crate::error::{GitError, Result};
use std::path::{Path, PathBuf};

/// Read-only view of a repository's references
#[derive(Debug, Clone)]
pub struct RepositoryInspector {
    path: PathBuf,
}

/// Resolved release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget {
    /// Tag name, without `refs/tags/`
    pub name: String,
    /// Full reference name
    pub reference: String,
    /// Commit the tag points at (peeled through annotated tags)
    pub commit: String,
}

impl RepositoryInspector {
    /// Bind to a repository directory; opening is deferred to each query
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `refs/tags/<tag>` to the commit it marks
    pub async fn resolve_tag(&self, tag: &str) -> Result<TagTarget> {
        let path = self.path.clone();
        let tag = tag.to_string();

        tokio::task::spawn_blocking(move || -> Result<TagTarget> {
            let repo = gix::open(&path).map_err(|_| GitError::NotRepository { path: path.clone() })?;

            let reference = format!("refs/tags/{}", tag);
            let found = repo
                .try_find_reference(reference.as_str())
                .map_err(|e| GitError::Inspection {
                    reason: format!("Failed to look up {}: {}", reference, e),
                })?;
            if found.is_none() {
                return Err(GitError::TagNotFound { tag: tag.clone() }.into());
            }

            let spec = format!("{}^{{commit}}", reference);
            let commit = repo
                .rev_parse_single(spec.as_str())
                .map_err(|e| GitError::Inspection {
                    reason: format!("Failed to peel {}: {}", reference, e),
                })?
                .detach()
                .to_string();

            Ok(TagTarget {
                name: tag,
                reference,
                commit,
            })
        })
        .await
        .map_err(|e| GitError::Inspection {
            reason: format!("Task join error: {}", e),
        })?
    }
}
