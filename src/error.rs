//! Error types for release drafting operations.
//!
//! Every failure aborts the run. Errors carry enough context to tell the
//! operator which step failed and what to check before re-running.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release drafting operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release drafting operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Artifact retrieval errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Release notes rendering errors
    #[error("Release notes error: {0}")]
    Notes(#[from] NotesError),

    /// Release hosting API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration errors, raised before any side effect happens
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value was not provided or was blank
    #[error("Missing required value '{field}' (set {env} or pass --{flag})")]
    Missing {
        /// Field name
        field: &'static str,
        /// Environment variable that supplies it
        env: &'static str,
        /// Equivalent command line flag
        flag: &'static str,
    },

    /// The extracted version is empty
    #[error("Version extracted from tag reference '{tag_ref}' is empty")]
    EmptyVersion {
        /// Tag reference the version came from
        tag_ref: String,
    },

    /// Repository slug is not `owner/name`
    #[error("Invalid repository '{value}'. Expected: owner/name")]
    InvalidRepository {
        /// Offending value
        value: String,
    },

    /// API base URL could not be parsed
    #[error("Invalid API URL '{value}': {reason}")]
    InvalidApiUrl {
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },

    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {reason}")]
    SettingsUnreadable {
        /// Settings file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {path}")]
    NotRepository {
        /// Path that was opened
        path: PathBuf,
    },

    /// git executable not found on PATH
    #[error("git executable not found on PATH")]
    GitNotInstalled,

    /// Release tag not present in the repository
    #[error("Tag '{tag}' not found in repository")]
    TagNotFound {
        /// Tag name
        tag: String,
    },

    /// No tag reachable before the release tag
    #[error("No tag found before '{tag}'; cannot bound the changelog")]
    NoPreviousTag {
        /// Release tag
        tag: String,
    },

    /// A git command exited non-zero
    #[error("Command '{command}' failed: {stderr}")]
    CommandFailed {
        /// Command line that ran
        command: String,
        /// Captured stderr
        stderr: String,
    },

    /// Repository inspection through gix failed
    #[error("Repository inspection failed: {reason}")]
    Inspection {
        /// Reason for the error
        reason: String,
    },
}

/// Artifact retrieval errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Staging directory does not exist
    #[error("Artifact source not found: {path}")]
    SourceMissing {
        /// Staging directory
        path: PathBuf,
    },

    /// Download failed
    #[error("Failed to download artifacts from {url}: {reason}")]
    Download {
        /// Archive URL
        url: String,
        /// Reason for the error
        reason: String,
    },

    /// Archive could not be extracted
    #[error("Failed to extract artifact archive: {reason}")]
    Extract {
        /// Reason for the error
        reason: String,
    },

    /// Archive entry would escape the workspace
    #[error("Rejected archive entry outside the workspace: {entry}")]
    UnsafeEntry {
        /// Entry name
        entry: String,
    },
}

/// Release notes rendering errors
#[derive(Error, Debug)]
pub enum NotesError {
    /// Template failed to compile
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template failed to render
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Release hosting API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Token or account rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Repository or release not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected, e.g. a release for this tag already exists
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other unsuccessful status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl From<handlebars::TemplateError> for NotesError {
    fn from(error: handlebars::TemplateError) -> Self {
        NotesError::Template(Box::new(error))
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::Missing { env, flag, .. }) => vec![
                format!("Export {env} in the job environment"),
                format!("Or pass --{flag} on the command line"),
            ],
            ReleaseError::Config(ConfigError::EmptyVersion { .. }) => vec![
                "Run from a tag push so GITHUB_REF is refs/tags/<version>".to_string(),
                "Or pass --tag-ref refs/tags/vX.Y.Z explicitly".to_string(),
            ],
            ReleaseError::Git(GitError::NoPreviousTag { tag }) => vec![
                format!("Ensure a release tag exists before '{tag}' in history"),
                "Fetch tags if the checkout was shallow: git fetch --unshallow --tags".to_string(),
            ],
            ReleaseError::Git(GitError::TagNotFound { tag }) => vec![
                format!("Fetch the tag: git fetch origin tag {tag}"),
                "Check the tag name matches the pushed reference".to_string(),
            ],
            ReleaseError::Git(GitError::GitNotInstalled) => {
                vec!["Install git and make sure it is on PATH".to_string()]
            }
            ReleaseError::GitHub(GitHubError::Authentication(_)) => vec![
                "Verify GITHUB_TOKEN is valid and has contents:write scope".to_string(),
                "Verify GITHUB_USER matches the token's account".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Validation(_)) => vec![
                "A release for this tag may already exist; delete the stale draft first"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_suggests_env_and_flag() {
        let err = ReleaseError::from(ConfigError::Missing {
            field: "token",
            env: "GITHUB_TOKEN",
            flag: "token",
        });
        assert_eq!(
            err.recovery_suggestions(),
            vec!["Export GITHUB_TOKEN in the job environment", "Or pass --token on the command line"]
        );
    }

    #[test]
    fn git_command_failures_do_not_suggest_tagging() {
        let no_tag = ReleaseError::from(GitError::NoPreviousTag {
            tag: "v1.2.3".to_string(),
        });
        assert!(no_tag.recovery_suggestions()[0].contains("before 'v1.2.3'"));

        let failed = ReleaseError::from(GitError::CommandFailed {
            command: "git describe --tags --abbrev=0 v1.2.3^".to_string(),
            stderr: "fatal: not a git repository".to_string(),
        });
        assert!(failed.to_string().contains("not a git repository"));
        assert!(
            failed
                .recovery_suggestions()
                .iter()
                .all(|s| !s.contains("tag"))
        );
    }
}
