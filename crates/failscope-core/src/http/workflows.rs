//! GitHub Actions workflow runs and logs

use crate::error::{Error, Result};
use crate::http::client::GitHubApiClient;
use crate::types::FailedRun;
use serde::Deserialize;
use tracing::debug;

/// GitHub API response for workflow runs list
#[derive(Debug, Deserialize)]
struct WorkflowRunsResponse {
    #[allow(dead_code)]
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    workflow_runs: Vec<GitHubWorkflowRun>,
}

/// GitHub API workflow run object
#[derive(Debug, Deserialize)]
struct GitHubWorkflowRun {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    logs_url: String,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    head_branch: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

/// Convert GitHub API workflow run to our type
fn convert_workflow_run(run: GitHubWorkflowRun) -> FailedRun {
    // Parse ISO 8601 timestamp; unparseable values are dropped
    let created_at = run
        .created_at
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc));

    FailedRun {
        id: run.id,
        name: run.name,
        logs_url: run.logs_url,
        html_url: run.html_url,
        head_branch: run.head_branch,
        created_at,
    }
}

impl GitHubApiClient {
    /// List failed workflow runs, newest first (first page only)
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/runs?status=failure
    pub async fn list_failed_runs(&self) -> Result<Vec<FailedRun>> {
        let url = self.repo_url("/actions/runs");
        let runs_response: WorkflowRunsResponse =
            self.get_json(&url, &[("status", "failure")]).await?;

        debug!(count = runs_response.workflow_runs.len(), "failed runs listed");

        Ok(runs_response
            .workflow_runs
            .into_iter()
            .map(convert_workflow_run)
            .collect())
    }

    /// The most recent failed run
    pub async fn latest_failed_run(&self) -> Result<FailedRun> {
        self.list_failed_runs()
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NoFailedRuns)
    }

    /// Fetch the log of a run as text
    ///
    /// Endpoint: the run's `logs_url`
    pub async fn fetch_run_log(&self, run: &FailedRun) -> Result<String> {
        self.get_text(&run.logs_url, &[], true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_response_missing_list_is_empty() {
        let parsed: WorkflowRunsResponse = serde_json::from_str(r#"{"total_count":0}"#).unwrap();
        assert!(parsed.workflow_runs.is_empty());
    }

    #[test]
    fn test_run_without_logs_url_is_rejected() {
        let parsed = serde_json::from_str::<WorkflowRunsResponse>(
            r#"{"workflow_runs":[{"id":1,"name":"CI"}]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_convert_workflow_run() {
        let run = GitHubWorkflowRun {
            id: 456,
            name: Some("Test".to_string()),
            logs_url: "https://api.github.com/repos/o/r/actions/runs/456/logs".to_string(),
            html_url: Some("https://github.com/o/r/actions/runs/456".to_string()),
            head_branch: Some("feature".to_string()),
            created_at: Some("2024-01-01T12:00:00Z".to_string()),
        };

        let converted = convert_workflow_run(run);
        assert_eq!(converted.id, 456);
        assert_eq!(converted.head_branch.as_deref(), Some("feature"));
        assert_eq!(
            converted.created_at.map(|dt| dt.timestamp()),
            Some(1_704_110_400)
        );
    }

    #[test]
    fn test_convert_workflow_run_bad_timestamp() {
        let run = GitHubWorkflowRun {
            id: 7,
            name: None,
            logs_url: "l".to_string(),
            html_url: None,
            head_branch: None,
            created_at: Some("yesterday".to_string()),
        };
        assert!(convert_workflow_run(run).created_at.is_none());
    }
}
