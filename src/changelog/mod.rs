//! Changelog generation from commit history.
//!
//! The range is bounded by the nearest tag before the release tag
//! (exclusive) and the release tag itself (inclusive). Subjects are kept
//! exactly as committed, newest first.

use crate::error::Result;
use crate::git::GitOperations;
use crate::version::ReleaseVersion;

/// Commit subjects between two tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// Tag bounding the range from below (excluded)
    pub previous_tag: String,
    /// Release tag (included)
    pub current_tag: String,
    /// Commit subjects, newest first
    pub entries: Vec<String>,
}

impl Changelog {
    /// Build the changelog for `version`.
    ///
    /// Fails when no earlier tag is reachable from the release tag.
    pub async fn generate<G: GitOperations>(git: &G, version: &ReleaseVersion) -> Result<Self> {
        let current_tag = version.as_str().to_string();
        let previous_tag = git.nearest_ancestor_tag(&current_tag).await?;
        let entries = git.commit_subjects(&previous_tag, &current_tag).await?;

        log::info!(
            "Changelog {}..{}: {} commit(s)",
            previous_tag,
            current_tag,
            entries.len()
        );

        Ok(Self {
            previous_tag,
            current_tag,
            entries,
        })
    }

    /// Markdown bullet lines, `- <subject>`
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|s| format!("- {}", s)).collect()
    }

    /// Bullet lines joined with newlines
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Number of commits in the range
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the range holds no commits
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use std::sync::Mutex;

    /// Canned history: tags map to positions in a linear list of subjects
    struct FakeGit {
        subjects: Vec<(&'static str, Option<&'static str>)>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeGit {
        fn position(&self, tag: &str) -> usize {
            self.subjects
                .iter()
                .position(|(_, t)| *t == Some(tag))
                .expect("tag present")
        }
    }

    impl GitOperations for FakeGit {
        async fn is_shallow(&self) -> Result<bool> {
            Ok(false)
        }

        async fn fetch_full_history(&self) -> Result<()> {
            Ok(())
        }

        async fn tag_exists(&self, tag_name: &str) -> Result<bool> {
            Ok(self.subjects.iter().any(|(_, t)| *t == Some(tag_name)))
        }

        async fn nearest_ancestor_tag(&self, tag_name: &str) -> Result<String> {
            self.calls.lock().unwrap().push(format!("describe {tag_name}^"));
            let start = self.position(tag_name) + 1;
            self.subjects[start..]
                .iter()
                .find_map(|(_, t)| t.map(str::to_string))
                .ok_or_else(|| {
                    GitError::NoPreviousTag {
                        tag: tag_name.to_string(),
                    }
                    .into()
                })
        }

        async fn commit_subjects(&self, from: &str, to: &str) -> Result<Vec<String>> {
            self.calls.lock().unwrap().push(format!("log {from}..{to}"));
            let end = self.position(from);
            let start = self.position(to);
            Ok(self.subjects[start..end]
                .iter()
                .map(|(s, _)| s.to_string())
                .collect())
        }
    }

    fn history() -> FakeGit {
        // Newest first
        FakeGit {
            subjects: vec![
                ("add feature", Some("v1.2.3")),
                ("fix bug", None),
                ("release v1.2.2", Some("v1.2.2")),
                ("initial", Some("v1.0.0")),
            ],
            calls: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn range_excludes_previous_tag_and_includes_current() {
        let git = history();
        let changelog = Changelog::generate(&git, &ReleaseVersion::new("v1.2.3"))
            .await
            .expect("changelog");

        assert_eq!(changelog.previous_tag, "v1.2.2");
        assert_eq!(changelog.entries, vec!["add feature", "fix bug"]);
        assert_eq!(changelog.render(), "- add feature\n- fix bug");
        assert_eq!(
            *git.calls.lock().unwrap(),
            vec!["describe v1.2.3^", "log v1.2.2..v1.2.3"]
        );
    }

    #[tokio::test]
    async fn missing_previous_tag_fails() {
        let git = history();
        let err = Changelog::generate(&git, &ReleaseVersion::new("v1.0.0"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Git(GitError::NoPreviousTag { .. })
        ));
        assert_eq!(git.calls.lock().unwrap().len(), 1, "log must not run");
    }

    #[test]
    fn empty_changelog_renders_empty() {
        let changelog = Changelog {
            previous_tag: "v1".to_string(),
            current_tag: "v2".to_string(),
            entries: vec![],
        };
        assert!(changelog.is_empty());
        assert_eq!(changelog.render(), "");
    }
}
