//! # Release Drafter
//!
//! Turns a pushed version tag into a draft GitHub release.
//!
//! The run has two stages. The first extracts the version from the tag
//! reference. The second acquires full history, retrieves staged build
//! artifacts, builds a changelog from the commits since the previous tag,
//! renders the release notes, and creates the draft.
//!
//! ## Usage
//!
//! ```bash
//! release-drafter extract-version --tag-ref refs/tags/v1.2.3
//! release-drafter changelog --release-version v1.2.3
//! release-drafter draft --tag-ref refs/tags/v1.2.3 --artifacts ./staged
//! release-drafter draft --dry-run      # render only, no API call
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifacts;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod notes;
pub mod pipeline;
pub mod version;

pub use artifacts::ArtifactSource;
pub use changelog::Changelog;
pub use cli::Args;
pub use config::{ConfigInputs, DraftConfig, PlatformBinary, ReleaseSettings, RepoSlug};
pub use error::{ReleaseError, Result};
pub use git::{GitOperations, RepositoryInspector, SystemGit};
pub use github::{CreatedRelease, DraftReleaseRequest, GitHubClient};
pub use notes::{NotesContext, ReleaseNotes};
pub use pipeline::{
    DraftOutcome, DraftReporter, DraftStep, ExtractedVersion, LogReporter, ReleaseDrafter,
    extract_stage,
};
pub use version::{ReleaseVersion, StepOutput, TAG_REF_PREFIX, extract_version};
