//! Draft release creation.

use super::client::GitHubClient;
use crate::error::{GitHubError, Result};
use crate::version::ReleaseVersion;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Request to create a draft release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReleaseRequest {
    /// Tag the release is attached to
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Markdown body
    pub body: String,
    /// Always true for this tool
    pub draft: bool,
    /// Files uploaded after creation
    pub assets: Vec<PathBuf>,
}

impl DraftReleaseRequest {
    /// Draft named after `version`, with no assets
    pub fn new(version: &ReleaseVersion, body: impl Into<String>) -> Self {
        Self {
            tag_name: version.to_string(),
            name: version.to_string(),
            body: body.into(),
            draft: true,
            assets: Vec::new(),
        }
    }
}

/// JSON payload for `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Serialize)]
struct CreateReleaseBody<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
}

/// Release as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRelease {
    /// Release ID
    pub id: u64,
    /// Release page URL
    pub html_url: String,
    /// Asset upload URL template
    #[serde(default)]
    pub upload_url: String,
    /// Whether the release is a draft
    pub draft: bool,
    /// Tag name
    pub tag_name: String,
    /// Creation time
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Uploaded asset as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    /// Asset ID
    pub id: u64,
    /// Asset file name
    pub name: String,
    /// Download URL
    pub browser_download_url: String,
}

/// Turn `https://uploads.../assets{?name,label}` into a concrete URL
fn asset_upload_url(template: &str, file_name: &str) -> Result<Url> {
    let base = template.split('{').next().unwrap_or(template);
    let mut url = Url::parse(base)
        .map_err(|e| GitHubError::Validation(format!("Bad upload URL '{}': {}", template, e)))?;
    url.query_pairs_mut().append_pair("name", file_name);
    Ok(url)
}

impl GitHubClient {
    /// Create a draft release, then upload any assets in the request.
    ///
    /// One POST creates the release. Nothing is retried; a failure after
    /// creation leaves the draft in place for manual cleanup.
    pub async fn create_draft_release(&self, request: &DraftReleaseRequest) -> Result<CreatedRelease> {
        let url = self.repo_url("releases")?;
        let payload = CreateReleaseBody {
            tag_name: &request.tag_name,
            name: &request.name,
            body: &request.body,
            draft: request.draft,
        };

        log::info!(
            "Creating draft release {} on {} ({} asset(s))",
            request.tag_name,
            self.repository(),
            request.assets.len()
        );

        let response = self
            .send(self.request(Method::POST, url).json(&payload))
            .await?;
        let release: CreatedRelease = self.handle_response(response).await?;

        for asset in &request.assets {
            self.upload_asset(&release, asset).await?;
        }

        log::info!("Created release {} at {}", release.id, release.html_url);
        Ok(release)
    }

    /// Upload one file to an existing release
    pub async fn upload_asset(&self, release: &CreatedRelease, path: &std::path::Path) -> Result<UploadedAsset> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GitHubError::Validation(format!("Asset has no file name: {}", path.display())))?;
        let url = asset_upload_url(&release.upload_url, file_name)?;
        let data = Bytes::from(tokio::fs::read(path).await?);

        log::info!("Uploading {} ({} bytes)", file_name, data.len());

        let builder = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data);
        let response = self.send(builder).await?;
        self.handle_response(response).await
    }
}
