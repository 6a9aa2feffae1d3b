//! GitHub REST API client: shared request plumbing and the contents API

use crate::config::Settings;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str = concat!("failscope/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub API response for a repository content lookup
#[derive(Debug, Deserialize)]
struct GitHubContent {
    /// Raw download location; null for directories and submodules
    #[serde(default)]
    download_url: Option<String>,
}

/// Drop query string and fragment so signed URLs never reach logs or errors
pub(crate) fn redact_url(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// GitHub API client
pub struct GitHubApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) owner: String,
    pub(crate) repo: String,
    token: String,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client for one repository
    pub fn new(base_url: String, owner: String, repo: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner,
            repo,
            token,
        }
    }

    /// Create from validated settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.github_api_url.clone(),
            settings.repo.owner.clone(),
            settings.repo.repo.clone(),
            settings.github_token.clone(),
        )
    }

    /// `{base}/repos/{owner}/{repo}{suffix}`
    pub(crate) fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url, self.owner, self.repo, suffix
        )
    }

    /// Send a GET and fail on any non-success status.
    ///
    /// Credentials are attached only when `authenticated` is set.
    pub(crate) async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if authenticated {
            request = request
                .header("Authorization", format!("Bearer {}", self.token))
                .header("Accept", GITHUB_ACCEPT);
        }

        debug!(url = redact_url(url), authenticated, "GET");

        let response = request.send().await.map_err(|e| {
            Error::Transport(format!(
                "request to {} failed: {}",
                redact_url(url),
                e.without_url()
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: redact_url(url).to_string(),
            });
        }

        Ok(response)
    }

    /// GET a body as text
    pub(crate) async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<String> {
        let response = self.get(url, query, authenticated).await?;
        response.text().await.map_err(|e| {
            Error::Transport(format!(
                "failed to read body from {}: {}",
                redact_url(url),
                e.without_url()
            ))
        })
    }

    /// GET a body and decode it as JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.get_text(url, query, true).await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::DataShape(format!(
                "failed to parse response from {}: {}",
                redact_url(url),
                e
            ))
        })
    }

    /// Resolve the raw download location of a repository file
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/contents/{path}
    pub async fn content_download_url(&self, path: &str) -> Result<String> {
        let url = self.repo_url(&format!("/contents/{}", path.trim_start_matches('/')));
        let content: GitHubContent = self.get_json(&url, &[]).await?;

        content
            .download_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                Error::DataShape(format!(
                    "download_url missing from metadata for {}",
                    path
                ))
            })
    }

    /// Fetch a raw file body. No credentials are sent.
    pub async fn fetch_raw(&self, download_url: &str) -> Result<String> {
        self.get_text(download_url, &[], false).await
    }

    /// Fetch the text of a repository file via its metadata
    pub async fn fetch_file_text(&self, path: &str) -> Result<String> {
        let download_url = self.content_download_url(path).await?;
        self.fetch_raw(&download_url).await
    }
}
