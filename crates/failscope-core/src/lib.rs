//! # failscope core
//!
//! Finds the most recent failed GitHub Actions run of a repository, pulls its
//! workflow definition and log, and asks Gemini for a root cause and a fix.
//!
//! The pipeline is a fixed two-node chain:
//! - **fetch_ci**: failed runs list, workflow file metadata and content, run log
//! - **analyze**: log plus a fixed instruction sent to the model
//!
//! Every step is awaited before the next one starts and the first error ends
//! the run.
//!
//! ## Example
//!
//! ```no_run
//! use failscope_core::{analyze_latest_failure, Settings};
//!
//! # async fn example() -> failscope_core::Result<()> {
//! let settings = Settings::from_env()?;
//! let report = analyze_latest_failure(&settings).await?;
//! println!("{}", report.state.gemini_suggestion());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod coordination;
pub mod error;
pub mod http;
pub mod llm;
pub mod output;
pub mod traits;
pub mod types;

pub use config::{RawSettings, RepoSlug, Settings};
pub use coordination::{FailurePipeline, Stage, PIPELINE};
pub use error::{Error, ErrorKind, Result};
pub use http::GitHubApiClient;
pub use llm::{GeminiClient, GeminiConfig};
pub use types::{AnalysisReport, CiState, FailedRun, FetchOutput};

/// Run the full pipeline against GitHub and Gemini
pub async fn analyze_latest_failure(settings: &Settings) -> Result<AnalysisReport> {
    let forge = GitHubApiClient::from_settings(settings);
    let model = GeminiClient::new(GeminiConfig::from(settings));

    tracing::info!(repo = %settings.repo, model = model.model(), "analyzing latest failed run");

    FailurePipeline::new(&forge, &model, &settings.workflow_file)
        .process()
        .await
}

/// Synchronous variant of `analyze_latest_failure`
///
/// This creates a single-threaded Tokio runtime and blocks on the async
/// version. Prefer the async version if you're already in an async context.
pub fn analyze_latest_failure_sync(settings: &Settings) -> Result<AnalysisReport> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(analyze_latest_failure(settings))
}
