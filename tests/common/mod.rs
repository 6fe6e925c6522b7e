//! Shared fixtures: scratch git repositories with tagged history.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway repository with linear history
pub struct ScratchRepo {
    dir: TempDir,
}

impl ScratchRepo {
    /// Empty repository
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Self { dir };
        repo.git(&["init", "--quiet"]);
        repo
    }

    /// Repository with the history used by most tests:
    ///
    /// ```text
    /// v1.2.3  add feature
    ///         fix bug
    /// v1.2.2  release v1.2.2
    ///         initial
    /// ```
    pub fn tagged() -> Self {
        let repo = Self::new();
        repo.commit("initial");
        repo.commit("release v1.2.2");
        repo.tag("v1.2.2");
        repo.commit("fix bug");
        repo.commit("add feature");
        repo.tag("v1.2.3");
        repo
    }

    /// Depth-1 clone of this repository over the `file://` transport
    pub fn shallow_clone(&self) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("file://{}", self.dir.path().display());
        let output = Command::new("git")
            .args(["clone", "--quiet", "--depth", "1", &url])
            .arg(dir.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("run git clone");
        assert!(
            output.status.success(),
            "git clone failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Self { dir }
    }

    /// Working tree path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Owned working tree path
    pub fn path_buf(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Run git in the repository, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args([
                "-c",
                "user.name=Release Tester",
                "-c",
                "user.email=tester@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .args(args)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit an empty change with `subject`
    pub fn commit(&self, subject: &str) {
        self.git(&["commit", "--quiet", "--allow-empty", "-m", subject]);
    }

    /// Annotated tag at HEAD
    pub fn tag(&self, name: &str) {
        self.git(&["tag", "-a", name, "-m", name]);
    }

    /// Commit id a revision resolves to
    pub fn rev(&self, spec: &str) -> String {
        self.git(&["rev-parse", spec])
    }
}
