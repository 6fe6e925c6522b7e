//! Release notes rendering.
//!
//! The body is a Markdown template filled from [`NotesContext`]. Platform
//! rows come from [`ReleaseSettings::platforms`] and are rendered by a loop
//! in the template, so adding a target never touches the markup.

use crate::changelog::Changelog;
use crate::config::{DraftConfig, ReleaseSettings, RepoSlug};
use crate::error::{NotesError, Result};
use crate::version::ReleaseVersion;
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATE_NAME: &str = "release_notes";
const TEMPLATE: &str = include_str!("release_notes.md.hbs");

/// One rendered row of the binaries table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformRow {
    /// Operating system label
    pub system: String,
    /// Icon URL
    pub icon: String,
    /// Architecture label
    pub arch: String,
    /// Archive file name
    pub archive: String,
    /// Download URL of the archive
    pub archive_url: String,
    /// Download URL of the detached signature
    pub signature_url: String,
}

/// Everything the template can reference
#[derive(Debug, Clone, Serialize)]
pub struct NotesContext {
    /// Release version, e.g. `v1.2.3`
    pub version: String,
    /// `owner/name`
    pub repository: String,
    /// Container image name
    pub image_name: String,
    /// Changelog lines, already `- ` prefixed
    pub changelog: Vec<String>,
    /// Binaries table rows
    pub platforms: Vec<PlatformRow>,
    /// Testing checklist items
    pub testing_checklist: Vec<String>,
    /// Release checklist items
    pub release_checklist: Vec<String>,
    /// Signing key fingerprint
    pub pgp_fingerprint: String,
    /// Binaries documentation link, may be empty
    pub binaries_doc_url: String,
    /// Update priorities documentation link, may be empty
    pub update_priorities_url: String,
    /// Docker Hub page for this version's tag
    pub docker_tag_url: String,
    /// Docker Hub repository page
    pub docker_url: String,
}

impl NotesContext {
    /// Assemble the template context
    pub fn new(
        version: &ReleaseVersion,
        repository: &RepoSlug,
        image_name: &str,
        project: &str,
        changelog_lines: Vec<String>,
        settings: &ReleaseSettings,
    ) -> Self {
        let download_base = format!(
            "https://github.com/{}/releases/download/{}",
            repository, version
        );

        let platforms = settings
            .platforms
            .iter()
            .map(|p| {
                let archive = p.archive_name(project, version.as_str());
                PlatformRow {
                    system: p.system.clone(),
                    icon: p.icon.clone(),
                    arch: p.arch.clone(),
                    archive_url: format!("{}/{}", download_base, archive),
                    signature_url: format!("{}/{}.asc", download_base, archive),
                    archive,
                }
            })
            .collect();

        Self {
            version: version.to_string(),
            repository: repository.to_string(),
            image_name: image_name.to_string(),
            changelog: changelog_lines,
            platforms,
            testing_checklist: settings.testing_checklist.clone(),
            release_checklist: settings.release_checklist.clone(),
            pgp_fingerprint: settings.pgp_fingerprint.clone(),
            binaries_doc_url: settings.binaries_doc_url.clone(),
            update_priorities_url: settings.update_priorities_url.clone(),
            docker_tag_url: format!(
                "https://hub.docker.com/r/{}/tags?page=1&ordering=last_updated&name={}",
                image_name, version
            ),
            docker_url: format!("https://hub.docker.com/r/{}", image_name),
        }
    }

    /// Context for a drafting run
    pub fn for_draft(config: &DraftConfig, version: &ReleaseVersion, changelog: &Changelog) -> Self {
        Self::new(
            version,
            &config.repository,
            &config.image_name,
            config.project(),
            changelog.lines(),
            &config.settings,
        )
    }
}

/// Compiled release notes template
pub struct ReleaseNotes {
    registry: Handlebars<'static>,
}

impl ReleaseNotes {
    /// Compile the built-in template
    pub fn new() -> Result<Self> {
        Self::with_template(TEMPLATE)
    }

    /// Compile a custom template
    pub fn with_template(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(NotesError::from)?;
        Ok(Self { registry })
    }

    /// Render the body
    pub fn render(&self, context: &NotesContext) -> Result<String> {
        let body = self
            .registry
            .render(TEMPLATE_NAME, context)
            .map_err(NotesError::from)?;
        log::debug!("Rendered release notes ({} bytes)", body.len());
        Ok(body)
    }
}
