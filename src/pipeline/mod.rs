//! Two-stage release drafting pipeline.
//!
//! Stage one turns the pushed tag reference into a version. Stage two takes
//! that version as an explicit value and runs, strictly in order:
//!
//! 1. version check (non-empty)
//! 2. full history acquisition
//! 3. artifact retrieval (must follow step 2)
//! 4. release tag inspection
//! 5. changelog generation
//! 6. release notes rendering
//! 7. draft release creation (skipped in dry-run mode)
//!
//! Any failing step aborts the run. Nothing is retried or cleaned up.

mod report;

pub use report::{DraftReporter, DraftStep, LogReporter};

use crate::changelog::Changelog;
use crate::config::DraftConfig;
use crate::error::{ConfigError, Result};
use crate::git::{GitOperations, RepositoryInspector, TagTarget};
use crate::github::{CreatedRelease, DraftReleaseRequest, GitHubClient};
use crate::notes::{NotesContext, ReleaseNotes};
use crate::version::{ReleaseVersion, extract_version};
use std::path::PathBuf;

/// Output of the version extraction stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedVersion {
    /// Reference the version came from
    pub tag_ref: String,
    /// Extracted version
    pub version: ReleaseVersion,
}

/// Stage one: derive the version from a tag reference
pub fn extract_stage(tag_ref: &str) -> ExtractedVersion {
    let version = extract_version(tag_ref);
    if !version.is_empty() && version.semver().is_none() {
        log::warn!("Tag '{}' is not a semantic version; using it as-is", version);
    }
    ExtractedVersion {
        tag_ref: tag_ref.to_string(),
        version,
    }
}

/// Everything a drafting run produced
#[derive(Debug, Clone)]
pub struct DraftOutcome {
    /// Released version
    pub version: ReleaseVersion,
    /// Commit the release tag points at
    pub tag: TagTarget,
    /// Generated changelog
    pub changelog: Changelog,
    /// Rendered release body
    pub body: String,
    /// Files retrieved into the workspace
    pub artifacts: Vec<PathBuf>,
    /// Created release; `None` in dry-run mode
    pub release: Option<CreatedRelease>,
}

/// Stage two: draft the release
pub struct ReleaseDrafter<'a, G: GitOperations> {
    config: &'a DraftConfig,
    git: G,
    inspector: RepositoryInspector,
    notes: ReleaseNotes,
    reporter: &'a dyn DraftReporter,
}

impl<'a, G: GitOperations> ReleaseDrafter<'a, G> {
    /// Drafter over the configured workspace
    pub fn new(config: &'a DraftConfig, git: G, reporter: &'a dyn DraftReporter) -> Result<Self> {
        Ok(Self {
            config,
            git,
            inspector: RepositoryInspector::new(&config.workspace),
            notes: ReleaseNotes::new()?,
            reporter,
        })
    }

    /// Use a custom notes template
    pub fn with_notes(mut self, notes: ReleaseNotes) -> Self {
        self.notes = notes;
        self
    }

    /// Run every step for `extracted`
    pub async fn run(&self, extracted: &ExtractedVersion) -> Result<DraftOutcome> {
        let report = self.reporter;
        let version = &extracted.version;

        report.started(DraftStep::CheckVersion);
        if version.is_empty() {
            return Err(ConfigError::EmptyVersion {
                tag_ref: extracted.tag_ref.clone(),
            }
            .into());
        }
        report.finished(DraftStep::CheckVersion, &format!("Drafting release {}", version));

        report.started(DraftStep::AcquireHistory);
        if self.git.ensure_full_history().await? {
            report.finished(DraftStep::AcquireHistory, "Fetched full history");
        } else {
            report.finished(DraftStep::AcquireHistory, "History already complete");
        }

        let artifacts = match &self.config.artifacts {
            Some(source) => {
                report.started(DraftStep::RetrieveArtifacts);
                let files = source.retrieve(&self.config.workspace).await?;
                for file in &files {
                    report.detail(&file.display().to_string());
                }
                report.finished(
                    DraftStep::RetrieveArtifacts,
                    &format!("Retrieved {} artifact file(s)", files.len()),
                );
                files
            }
            None => {
                report.skipped(DraftStep::RetrieveArtifacts, "no artifact source configured");
                Vec::new()
            }
        };

        report.started(DraftStep::InspectTag);
        let tag = self.inspector.resolve_tag(version.as_str()).await?;
        report.finished(
            DraftStep::InspectTag,
            &format!("{} -> {}", tag.reference, tag.commit),
        );

        report.started(DraftStep::GenerateChangelog);
        let changelog = Changelog::generate(&self.git, version).await?;
        report.finished(
            DraftStep::GenerateChangelog,
            &format!(
                "Changelog {}..{}: {} commit(s)",
                changelog.previous_tag,
                changelog.current_tag,
                changelog.len()
            ),
        );

        report.started(DraftStep::RenderNotes);
        let context = NotesContext::for_draft(self.config, version, &changelog);
        let body = self.notes.render(&context)?;
        report.finished(
            DraftStep::RenderNotes,
            &format!("Rendered {} line(s) of release notes", body.lines().count()),
        );

        let release = if self.config.dry_run {
            report.skipped(DraftStep::CreateRelease, "dry run");
            None
        } else {
            report.started(DraftStep::CreateRelease);
            let client = GitHubClient::new(
                self.config.api_base.clone(),
                self.config.repository.clone(),
                &self.config.account,
                &self.config.token,
            )?;
            let request = DraftReleaseRequest::new(version, body.clone());
            let created = client.create_draft_release(&request).await?;
            report.finished(
                DraftStep::CreateRelease,
                &format!("Created draft release: {}", created.html_url),
            );
            Some(created)
        };

        Ok(DraftOutcome {
            version: version.clone(),
            tag,
            changelog,
            body,
            artifacts,
            release,
        })
    }
}
