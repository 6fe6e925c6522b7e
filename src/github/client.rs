//! Minimal REST client for the release hosting API.

use crate::config::RepoSlug;
use crate::error::{GitHubError, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use url::Url;

/// User-Agent header value for API requests
const USER_AGENT_VALUE: &str = concat!("release-drafter/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the API
const ACCEPT_VALUE: &str = "application/vnd.github+json";

/// One-time initialization guard for the rustls crypto provider
static RUSTLS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Authenticated client bound to one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    repository: RepoSlug,
    account: String,
    token: String,
}

impl GitHubClient {
    /// Build a client authenticating as `account` with `token`
    pub fn new(api_base: Url, repository: RepoSlug, account: &str, token: &str) -> Result<Self> {
        RUSTLS_INITIALIZED.get_or_init(|| {
            // Another provider may already be installed by the embedding
            // process; either way one is available afterwards.
            let _ = rustls::crypto::ring::default_provider().install_default();
        });

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base,
            repository,
            account: account.to_string(),
            token: token.to_string(),
        })
    }

    /// Repository this client talks to
    pub fn repository(&self) -> &RepoSlug {
        &self.repository
    }

    /// URL of `/repos/{owner}/{repo}/{path}`
    pub(super) fn repo_url(&self, path: &str) -> Result<Url> {
        let base = self.api_base.as_str().trim_end_matches('/');
        let raw = format!(
            "{}/repos/{}/{}/{}",
            base, self.repository.owner, self.repository.name, path
        );
        Url::parse(&raw).map_err(|e| GitHubError::Network(format!("Bad URL {}: {}", raw, e)).into())
    }

    /// Request builder with credentials attached
    pub(super) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.account, Some(&self.token))
    }

    /// Send a request, mapping transport failures
    pub(super) async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Response> {
        builder
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()).into())
    }

    /// Decode a successful response or map the error status
    pub(super) async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                GitHubError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to parse response: {}", e),
                }
                .into()
            })
        } else {
            Err(Self::error_for(response, status).await.into())
        }
    }

    async fn error_for(response: Response, status: StatusCode) -> GitHubError {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if body.errors.is_empty() => body.message,
            Ok(body) => {
                let details: Vec<String> = body
                    .errors
                    .iter()
                    .map(|e| {
                        e.get("code")
                            .and_then(|c| c.as_str())
                            .map(str::to_string)
                            .unwrap_or_else(|| e.to_string())
                    })
                    .collect();
                format!("{} ({})", body.message, details.join(", "))
            }
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GitHubError::Authentication(message),
            StatusCode::NOT_FOUND => GitHubError::NotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY => GitHubError::Validation(message),
            _ => GitHubError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
