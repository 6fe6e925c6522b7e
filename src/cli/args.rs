//! Command line argument parsing and validation.
//!
//! Every configuration value can come from a flag or from the environment
//! variable a hosted runner would set, so the binary runs unchanged inside a
//! tag-push job or from a maintainer's shell.

use crate::config::ConfigInputs;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Draft releases from version tags
#[derive(Parser, Debug)]
#[command(
    name = "release-drafter",
    version,
    about = "Draft a GitHub release from a version tag",
    long_about = "Extract the version from a pushed tag, build a changelog from the commits
since the previous tag, render the release notes, and create a draft release.

Usage:
  release-drafter extract-version --tag-ref refs/tags/v1.2.3
  release-drafter changelog --release-version v1.2.3
  release-drafter draft --artifacts ./staged"
)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Show step-by-step detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors and command results
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the version for a tag reference
    ExtractVersion {
        /// Tag reference, e.g. refs/tags/v1.2.3
        #[arg(long, env = "GITHUB_REF")]
        tag_ref: String,

        /// Also append VERSION=<version> to this runner output file
        #[arg(long, env = "GITHUB_OUTPUT")]
        output_file: Option<PathBuf>,
    },

    /// Print the changelog for a version tag
    Changelog {
        /// Release tag, e.g. v1.2.3
        #[arg(long, value_name = "VERSION")]
        release_version: String,

        /// Repository checkout
        #[arg(long, default_value = ".")]
        repo_path: PathBuf,
    },

    /// Print the rendered release notes without creating anything
    Notes {
        /// Release tag, e.g. v1.2.3
        #[arg(long, value_name = "VERSION")]
        release_version: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Run the full pipeline and create a draft release
    Draft {
        /// Tag reference, e.g. refs/tags/v1.2.3
        #[arg(long, env = "GITHUB_REF")]
        tag_ref: String,

        /// Staged artifacts: a directory or an http(s) URL of a ZIP bundle
        #[arg(long, env = "ARTIFACTS_SOURCE")]
        artifacts: Option<String>,

        /// Render the notes but do not call the API
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

/// Repository identity and notes settings
#[derive(ClapArgs, Debug, Clone)]
pub struct TargetArgs {
    /// Repository as owner/name
    #[arg(long, env = "REPO_NAME")]
    pub repository: Option<String>,

    /// Container image name for the Docker row
    #[arg(long, env = "IMAGE_NAME")]
    pub image_name: Option<String>,

    /// Release notes settings file (TOML)
    #[arg(long, env = "RELEASE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Repository checkout
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,
}

/// API credentials
#[derive(ClapArgs, Debug, Clone)]
pub struct CredentialArgs {
    /// Account identifier paired with the token
    #[arg(long, env = "GITHUB_USER")]
    pub account: Option<String>,

    /// Scoped API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

impl Command {
    /// Name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::ExtractVersion { .. } => "extract-version",
            Command::Changelog { .. } => "changelog",
            Command::Notes { .. } => "notes",
            Command::Draft { .. } => "draft",
        }
    }
}

impl TargetArgs {
    /// `REPO_NAME`, falling back to the runner's `GITHUB_REPOSITORY`
    fn repository(&self) -> Option<String> {
        self.repository
            .clone()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| std::env::var("GITHUB_REPOSITORY").ok())
    }

    /// Config inputs for a render-only run
    pub fn to_inputs(&self) -> ConfigInputs {
        ConfigInputs {
            repository: self.repository(),
            image_name: self.image_name.clone(),
            workspace: self.repo_path.clone(),
            settings_file: self.settings.clone(),
            dry_run: true,
            ..ConfigInputs::default()
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Changelog {
                release_version, ..
            }
            | Command::Notes {
                release_version, ..
            } if release_version.trim().is_empty() =>
            {
                Err("--release-version must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Config inputs for the `draft` command
    pub fn draft_inputs(&self) -> Option<ConfigInputs> {
        match &self.command {
            Command::Draft {
                artifacts,
                dry_run,
                target,
                credentials,
                ..
            } => Some(ConfigInputs {
                account: credentials.account.clone(),
                token: credentials.token.clone(),
                api_base: credentials.api_url.clone(),
                artifacts: artifacts.clone(),
                dry_run: *dry_run,
                ..target.to_inputs()
            }),
            _ => None,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}
