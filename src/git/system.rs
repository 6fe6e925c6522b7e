//! System git backend.
//!
//! History queries shell out to the `git` binary with an isolated
//! environment so user or runner configuration cannot change the output
//! format.

use crate::error::{GitError, ReleaseError, Result};
use crate::git::GitOperations;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Git backend using the system git binary
#[derive(Debug, Clone)]
pub struct SystemGit {
    git: PathBuf,
    repo_path: PathBuf,
}

impl SystemGit {
    /// Locate git on PATH and bind it to a repository directory
    pub fn open(repo_path: impl Into<PathBuf>) -> Result<Self> {
        let git = which::which("git").map_err(|_| GitError::GitNotInstalled)?;
        let repo_path = repo_path.into();
        if !repo_path.exists() {
            return Err(GitError::NotRepository { path: repo_path }.into());
        }
        log::debug!("Using {} for {}", git.display(), repo_path.display());
        Ok(Self { git, repo_path })
    }

    /// Repository directory
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Create a git command with isolated environment
    ///
    /// - Runs against the repository path
    /// - Clears environment variables except PATH and HOME
    /// - Overrides config that would change output
    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new(&self.git);
        cmd.arg("-C").arg(&self.repo_path);

        cmd.env_clear();
        if let Ok(path) = std::env::var("PATH") {
            cmd.env("PATH", path);
        }
        if let Ok(home) = std::env::var("HOME") {
            cmd.env("HOME", home);
        }

        cmd.arg("-c").arg("core.quotePath=false");
        cmd.arg("-c").arg("log.showSignature=false");
        cmd.arg("-c").arg("i18n.logOutputEncoding=UTF-8");
        cmd
    }

    /// Run git with `args`, returning trimmed stdout on success
    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        log::debug!("Running {}", command);

        let output = self
            .git_cmd()
            .args(args)
            .output()
            .await
            .map_err(|e| GitError::CommandFailed {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Whether `rev` names an object in the repository
    async fn resolves(&self, rev: &str) -> Result<bool> {
        let output = self
            .git_cmd()
            .args(["rev-parse", "--verify", "--quiet", rev])
            .output()
            .await?;
        Ok(output.status.success())
    }

    /// Tag exists but its commit has no parent
    async fn is_root_tag(&self, tag_name: &str) -> Result<bool> {
        Ok(self.tag_exists(tag_name).await?
            && !self.resolves(&format!("refs/tags/{}^{{commit}}^", tag_name)).await?)
    }
}

/// `git describe` found no tag to name the revision with
fn is_undescribable(stderr: &str) -> bool {
    stderr.contains("No names found") || stderr.contains("No tags can describe")
}

fn no_previous_tag(tag_name: &str) -> ReleaseError {
    GitError::NoPreviousTag {
        tag: tag_name.to_string(),
    }
    .into()
}

impl GitOperations for SystemGit {
    async fn is_shallow(&self) -> Result<bool> {
        let out = self.run(&["rev-parse", "--is-shallow-repository"]).await?;
        Ok(out.trim() == "true")
    }

    async fn fetch_full_history(&self) -> Result<()> {
        self.run(&["fetch", "--unshallow", "--tags", "--force"]).await?;
        Ok(())
    }

    async fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        self.resolves(&format!("refs/tags/{}", tag_name)).await
    }

    async fn nearest_ancestor_tag(&self, tag_name: &str) -> Result<String> {
        let parent = format!("{}^", tag_name);
        let err = match self.run(&["describe", "--tags", "--abbrev=0", &parent]).await {
            Ok(tag) if !tag.trim().is_empty() => return Ok(tag.trim().to_string()),
            Ok(_) => return Err(no_previous_tag(tag_name)),
            Err(e) => e,
        };

        let undescribable = matches!(
            &err,
            ReleaseError::Git(GitError::CommandFailed { stderr, .. }) if is_undescribable(stderr)
        );
        // A tag on the root commit has no parent to describe
        if undescribable || self.is_root_tag(tag_name).await? {
            log::debug!("No tag reachable from {}: {}", parent, err);
            return Err(no_previous_tag(tag_name));
        }
        Err(err)
    }

    async fn commit_subjects(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let range = format!("{}..{}", from, to);
        let out = self.run(&["log", "--pretty=format:%s", &range]).await?;
        Ok(out
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_describe_misses_count_as_no_previous_tag() {
        assert!(is_undescribable("fatal: No names found, cannot describe anything."));
        assert!(is_undescribable(
            "fatal: No tags can describe '2b1f0c3'.\nTry --always, or create some tags."
        ));
        assert!(!is_undescribable(
            "fatal: not a git repository (or any of the parent directories): .git"
        ));
        assert!(!is_undescribable("fatal: Not a valid object name v9.9.9^"));
    }
}
