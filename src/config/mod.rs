//! Validated configuration for drafting a release.
//!
//! Values arrive from flags or the job environment as optional strings.
//! [`DraftConfig::from_inputs`] checks every required field up front so a
//! missing token or repository fails before git or the network is touched,
//! instead of interpolating blanks into the release notes.

mod settings;

pub use settings::{PlatformBinary, ReleaseSettings, default_platforms};

use crate::artifacts::ArtifactSource;
use crate::error::{ConfigError, Result};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

/// Default REST API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository identifier in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Account or organization owning the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Parse `owner/name`
    pub fn parse(value: &str) -> Result<Self> {
        static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?P<owner>[A-Za-z0-9_.-]+)/(?P<name>[A-Za-z0-9_.-]+)$")
                .expect("repository slug regex is valid")
        });

        let caps = SLUG_RE
            .captures(value.trim())
            .ok_or_else(|| ConfigError::InvalidRepository {
                value: value.to_string(),
            })?;

        Ok(Self {
            owner: caps["owner"].to_string(),
            name: caps["name"].trim_end_matches(".git").to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Unvalidated configuration values, as collected from flags and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    /// `owner/name` of the repository (REPO_NAME)
    pub repository: Option<String>,
    /// Container image name (IMAGE_NAME)
    pub image_name: Option<String>,
    /// Account identifier used with the token (GITHUB_USER)
    pub account: Option<String>,
    /// Scoped API token (GITHUB_TOKEN)
    pub token: Option<String>,
    /// API base URL (GITHUB_API_URL)
    pub api_base: Option<String>,
    /// Repository checkout to operate on
    pub workspace: PathBuf,
    /// Where staged build artifacts come from
    pub artifacts: Option<String>,
    /// Optional settings file
    pub settings_file: Option<PathBuf>,
    /// Render only, skip the API call
    pub dry_run: bool,
}

/// Validated configuration for one drafting run
#[derive(Debug, Clone)]
pub struct DraftConfig {
    /// Target repository
    pub repository: RepoSlug,
    /// Container image name shown in the Docker row
    pub image_name: String,
    /// Account identifier paired with the token
    pub account: String,
    /// Scoped API token
    pub token: String,
    /// API base URL
    pub api_base: Url,
    /// Repository checkout to operate on
    pub workspace: PathBuf,
    /// Where staged build artifacts come from, if anywhere
    pub artifacts: Option<ArtifactSource>,
    /// Render only, skip the API call
    pub dry_run: bool,
    /// Release notes settings
    pub settings: ReleaseSettings,
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
    flag: &'static str,
) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing { field, env, flag }.into()),
    }
}

impl DraftConfig {
    /// Validate inputs into a config.
    ///
    /// Credentials are only required when the run will call the API; a dry
    /// run renders with whatever identity values are present.
    pub async fn from_inputs(inputs: ConfigInputs) -> Result<Self> {
        let repository = RepoSlug::parse(&required(
            inputs.repository,
            "repository",
            "REPO_NAME",
            "repository",
        )?)?;
        let image_name = required(inputs.image_name, "image name", "IMAGE_NAME", "image-name")?;

        let (account, token) = if inputs.dry_run {
            (
                inputs.account.unwrap_or_default(),
                inputs.token.unwrap_or_default(),
            )
        } else {
            (
                required(inputs.account, "account", "GITHUB_USER", "account")?,
                required(inputs.token, "token", "GITHUB_TOKEN", "token")?,
            )
        };

        let api_base_raw = inputs
            .api_base
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Url::parse(&api_base_raw).map_err(|e| ConfigError::InvalidApiUrl {
            value: api_base_raw.clone(),
            reason: e.to_string(),
        })?;

        let settings = match &inputs.settings_file {
            Some(path) => ReleaseSettings::load(path).await?,
            None => ReleaseSettings::default(),
        };

        let artifacts = inputs
            .artifacts
            .filter(|v| !v.trim().is_empty())
            .map(|v| ArtifactSource::parse(&v));

        Ok(Self {
            repository,
            image_name,
            account,
            token,
            api_base,
            workspace: inputs.workspace,
            artifacts,
            dry_run: inputs.dry_run,
            settings,
        })
    }

    /// Archive prefix for the binaries table
    pub fn project(&self) -> &str {
        self.settings.project_or(&self.repository.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_inputs() -> ConfigInputs {
        ConfigInputs {
            repository: Some("sigp/lighthouse".to_string()),
            image_name: Some("sigp/lighthouse".to_string()),
            account: Some("release-bot".to_string()),
            token: Some("t0ken".to_string()),
            workspace: PathBuf::from("."),
            ..ConfigInputs::default()
        }
    }

    #[test]
    fn parses_repository_slug() {
        let slug = RepoSlug::parse("sigp/lighthouse").expect("valid slug");
        assert_eq!(slug.owner, "sigp");
        assert_eq!(slug.name, "lighthouse");
        assert_eq!(slug.to_string(), "sigp/lighthouse");
    }

    #[test]
    fn rejects_malformed_slugs() {
        for bad in ["lighthouse", "a/b/c", "/name", "owner/", "own er/name"] {
            assert!(RepoSlug::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[tokio::test]
    async fn complete_inputs_validate() {
        let config = DraftConfig::from_inputs(complete_inputs()).await.expect("valid");
        assert_eq!(config.api_base.as_str(), "https://api.github.com/");
        assert_eq!(config.project(), "lighthouse");
        assert!(config.artifacts.is_none());
    }

    #[tokio::test]
    async fn blank_token_is_missing() {
        let inputs = ConfigInputs {
            token: Some("   ".to_string()),
            ..complete_inputs()
        };
        let err = DraftConfig::from_inputs(inputs).await.unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Config(ConfigError::Missing { env: "GITHUB_TOKEN", .. })
        ));
    }

    #[tokio::test]
    async fn missing_image_name_fails_fast() {
        let inputs = ConfigInputs {
            image_name: None,
            ..complete_inputs()
        };
        let err = DraftConfig::from_inputs(inputs).await.unwrap_err();
        assert!(err.to_string().contains("IMAGE_NAME"));
    }

    #[tokio::test]
    async fn dry_run_does_not_need_credentials() {
        let inputs = ConfigInputs {
            account: None,
            token: None,
            dry_run: true,
            ..complete_inputs()
        };
        let config = DraftConfig::from_inputs(inputs).await.expect("valid");
        assert!(config.token.is_empty());
    }

    #[tokio::test]
    async fn invalid_api_url_is_reported() {
        let inputs = ConfigInputs {
            api_base: Some("not a url".to_string()),
            ..complete_inputs()
        };
        let err = DraftConfig::from_inputs(inputs).await.unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Config(ConfigError::InvalidApiUrl { .. })
        ));
    }
}
