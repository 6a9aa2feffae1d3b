//! Trait seams between the pipeline and the remote services it talks to
//!
//! Return-position `impl Future` keeps these static-dispatch: no boxing,
//! no `async_trait`.

use crate::error::Result;
use crate::types::FailedRun;
use std::future::Future;

/// Source of failed CI runs and their artifacts
pub trait ForgeOps {
    /// The most recent failed run
    fn latest_failed_run(&self) -> impl Future<Output = Result<FailedRun>> + Send;

    /// Text of a file in the repository
    fn file_text(&self, path: &str) -> impl Future<Output = Result<String>> + Send;

    /// Log text of a run
    fn run_log(&self, run: &FailedRun) -> impl Future<Output = Result<String>> + Send;
}

/// A text-completion model
pub trait SuggestionModel {
    /// Send `prompt` and return the model's reply verbatim
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

impl ForgeOps for crate::http::GitHubApiClient {
    fn latest_failed_run(&self) -> impl Future<Output = Result<FailedRun>> + Send {
        crate::http::GitHubApiClient::latest_failed_run(self)
    }

    fn file_text(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
        self.fetch_file_text(path)
    }

    fn run_log(&self, run: &FailedRun) -> impl Future<Output = Result<String>> + Send {
        self.fetch_run_log(run)
    }
}
