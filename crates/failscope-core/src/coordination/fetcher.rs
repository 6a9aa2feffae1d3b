//! Fetch stage: failed run, workflow definition, run log

use crate::error::Result;
use crate::traits::ForgeOps;
use crate::types::FetchOutput;
use tracing::info;

/// Pulls everything the analysis needs from the forge
pub struct Fetcher<'a, F: ForgeOps> {
    forge: &'a F,
    workflow_file: &'a str,
}

impl<'a, F: ForgeOps> Fetcher<'a, F> {
    /// Create a fetcher reading `workflow_file` from the forge
    pub fn new(forge: &'a F, workflow_file: &'a str) -> Self {
        Self {
            forge,
            workflow_file,
        }
    }

    /// Run, workflow text, log text; in that order, stopping at the first error
    pub async fn fetch(&self) -> Result<FetchOutput> {
        let run = self.forge.latest_failed_run().await?;
        info!(run_id = run.id, name = run.name.as_deref().unwrap_or(""), "selected failed run");

        let workflow_yaml = self.forge.file_text(self.workflow_file).await?;
        info!(path = self.workflow_file, bytes = workflow_yaml.len(), "fetched workflow definition");

        let error_log = self.forge.run_log(&run).await?;
        info!(run_id = run.id, bytes = error_log.len(), "fetched run log");

        Ok(FetchOutput {
            run,
            workflow_yaml,
            error_log,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::FailedRun;
    use std::future::{ready, Future};
    use std::sync::Mutex;

    pub(crate) fn sample_run(id: u64) -> FailedRun {
        FailedRun {
            id,
            name: Some("CI".to_string()),
            logs_url: format!("https://api.github.com/repos/o/r/actions/runs/{}/logs", id),
            html_url: None,
            head_branch: Some("main".to_string()),
            created_at: None,
        }
    }

    /// In-memory forge that records the order of calls
    #[derive(Default)]
    pub(crate) struct FakeForge {
        pub runs: Vec<FailedRun>,
        pub workflow: Option<String>,
        pub log: Option<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeForge {
        pub(crate) fn healthy() -> Self {
            Self {
                runs: vec![sample_run(42), sample_run(41)],
                workflow: Some("name: CI\non: push\n".to_string()),
                log: Some("error[E0308]: mismatched types".to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl ForgeOps for FakeForge {
        fn latest_failed_run(&self) -> impl Future<Output = Result<FailedRun>> + Send {
            self.record("runs".to_string());
            ready(self.runs.first().cloned().ok_or(Error::NoFailedRuns))
        }

        fn file_text(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
            self.record(format!("file:{}", path));
            ready(self.workflow.clone().ok_or_else(|| Error::DataShape("download_url missing".into())))
        }

        fn run_log(&self, run: &FailedRun) -> impl Future<Output = Result<String>> + Send {
            self.record(format!("log:{}", run.id));
            ready(self.log.clone().ok_or(Error::Http {
                status: 410,
                url: run.logs_url.clone(),
            }))
        }
    }

    #[tokio::test]
    async fn test_fetch_uses_most_recent_run() {
        let forge = FakeForge::healthy();
        let out = Fetcher::new(&forge, ".github/workflows/ci.yml").fetch().await.unwrap();

        assert_eq!(out.run.id, 42);
        assert_eq!(out.workflow_yaml, "name: CI\non: push\n");
        assert_eq!(out.error_log, "error[E0308]: mismatched types");
        assert_eq!(
            forge.calls(),
            vec!["runs", "file:.github/workflows/ci.yml", "log:42"]
        );
    }

    #[tokio::test]
    async fn test_fetch_stops_when_no_runs() {
        let forge = FakeForge {
            runs: Vec::new(),
            ..FakeForge::healthy()
        };
        let err = Fetcher::new(&forge, "ci.yml").fetch().await.unwrap_err();

        assert!(matches!(err, Error::NoFailedRuns));
        assert_eq!(forge.calls(), vec!["runs"]);
    }

    #[tokio::test]
    async fn test_fetch_stops_on_missing_workflow() {
        let forge = FakeForge {
            workflow: None,
            ..FakeForge::healthy()
        };
        let err = Fetcher::new(&forge, "ci.yml").fetch().await.unwrap_err();

        assert!(matches!(err, Error::DataShape(_)));
        assert_eq!(forge.calls(), vec!["runs", "file:ci.yml"]);
    }
}
