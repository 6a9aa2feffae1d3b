//! Runtime settings loaded from the process environment

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default GitHub REST endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Default location of the rendered pipeline graph
pub const DEFAULT_GRAPH_PATH: &str = "pipeline_graph.svg";

/// Repository identifier in `owner/repo` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Account or organization
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo`
    pub fn parse(repository: &str) -> Result<Self> {
        let parts: Vec<&str> = repository.trim().split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(Error::Config(format!(
                "Invalid GITHUB_REPO format (expected owner/repo): {}",
                repository
            )));
        }

        Ok(Self {
            owner: parts[0].to_string(),
            repo: parts[1].to_string(),
        })
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Unvalidated settings as read from env vars or CLI flags.
///
/// Empty strings are treated the same as unset values.
#[derive(Default, Clone)]
pub struct RawSettings {
    /// `GITHUB_TOKEN`
    pub github_token: Option<String>,
    /// `GITHUB_REPO`, expected as `owner/repo`
    pub github_repo: Option<String>,
    /// `WORKFLOW_FILE`
    pub workflow_file: Option<String>,
    /// `GEMINI_API_KEY`
    pub gemini_api_key: Option<String>,
    /// `GITHUB_API_URL`
    pub github_api_url: Option<String>,
    /// `GEMINI_API_URL`
    pub gemini_api_url: Option<String>,
    /// `GEMINI_MODEL`
    pub gemini_model: Option<String>,
    /// `FAILSCOPE_GRAPH_PATH`
    pub graph_path: Option<String>,
}

impl RawSettings {
    /// Read every known variable from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read every known variable through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            github_token: lookup("GITHUB_TOKEN"),
            github_repo: lookup("GITHUB_REPO"),
            workflow_file: lookup("WORKFLOW_FILE"),
            gemini_api_key: lookup("GEMINI_API_KEY"),
            github_api_url: lookup("GITHUB_API_URL"),
            gemini_api_url: lookup("GEMINI_API_URL"),
            gemini_model: lookup("GEMINI_MODEL"),
            graph_path: lookup("FAILSCOPE_GRAPH_PATH"),
        }
    }
}

impl std::fmt::Debug for RawSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSettings")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_repo", &self.github_repo)
            .field("workflow_file", &self.workflow_file)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish_non_exhaustive()
    }
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn required(v: Option<String>, name: &str) -> Result<String> {
    clean(v).ok_or_else(|| Error::Config(format!("{} is missing in environment", name)))
}

/// Validated settings
#[derive(Clone)]
pub struct Settings {
    /// Token sent as a bearer credential to the GitHub API
    pub github_token: String,
    /// Repository whose runs are inspected
    pub repo: RepoSlug,
    /// Workflow definition path, without a leading slash
    pub workflow_file: String,
    /// Gemini API key
    pub gemini_api_key: String,
    /// GitHub API base URL, without a trailing slash
    pub github_api_url: String,
    /// Gemini API base URL, without a trailing slash
    pub gemini_api_url: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Destination of the pipeline graph artifact
    pub graph_path: PathBuf,
}

impl Settings {
    /// Validate raw settings.
    ///
    /// Required values are checked in a fixed order so the first missing one
    /// is always the one reported.
    pub fn from_raw(raw: RawSettings) -> Result<Self> {
        let github_token = required(raw.github_token, "GITHUB_TOKEN")?;
        let github_repo = required(raw.github_repo, "GITHUB_REPO")?;
        let workflow_file = required(raw.workflow_file, "WORKFLOW_FILE")?;
        let gemini_api_key = required(raw.gemini_api_key, "GEMINI_API_KEY")?;

        let repo = RepoSlug::parse(&github_repo)?;

        Ok(Self {
            github_token,
            repo,
            workflow_file: workflow_file.trim_start_matches('/').to_string(),
            gemini_api_key,
            github_api_url: clean(raw.github_api_url)
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            gemini_api_url: clean(raw.gemini_api_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            gemini_model: clean(raw.gemini_model).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            graph_path: clean(raw.graph_path)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPH_PATH)),
        })
    }

    /// Load and validate from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_raw(RawSettings::from_env())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("github_token", &"<redacted>")
            .field("repo", &self.repo)
            .field("workflow_file", &self.workflow_file)
            .field("gemini_api_key", &"<redacted>")
            .field("github_api_url", &self.github_api_url)
            .field("gemini_api_url", &self.gemini_api_url)
            .field("gemini_model", &self.gemini_model)
            .field("graph_path", &self.graph_path)
            .finish()
    }
}
