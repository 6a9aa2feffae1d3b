//! Main pipeline coordinator

use crate::coordination::{Analyzer, Fetcher, Stage};
use crate::error::Result;
use crate::traits::{ForgeOps, SuggestionModel};
use crate::types::{AnalysisReport, CiState};
use tracing::info;

/// Runs `fetch_ci` then `analyze` over a fresh [`CiState`]
pub struct FailurePipeline<'a, F: ForgeOps, M: SuggestionModel> {
    forge: &'a F,
    model: &'a M,
    workflow_file: &'a str,
}

impl<'a, F: ForgeOps, M: SuggestionModel> FailurePipeline<'a, F, M> {
    /// Create a new pipeline
    pub fn new(forge: &'a F, model: &'a M, workflow_file: &'a str) -> Self {
        Self {
            forge,
            model,
            workflow_file,
        }
    }

    /// Main processing pipeline.
    ///
    /// Any stage error ends the run; no partial report is produced.
    pub async fn process(&self) -> Result<AnalysisReport> {
        let mut state = CiState::new();

        // Step 1: fetch run, workflow and log
        info!(stage = %Stage::FetchCi, "stage started");
        let fetched = Fetcher::new(self.forge, self.workflow_file).fetch().await?;
        state.set_workflow_yaml(fetched.workflow_yaml)?;
        state.set_error_log(fetched.error_log)?;

        // Step 2: ask the model
        info!(stage = %Stage::Analyze, "stage started");
        let suggestion = Analyzer::new(self.model).analyze(state.error_log()).await?;
        state.set_gemini_suggestion(suggestion)?;

        Ok(AnalysisReport {
            run: fetched.run,
            state,
        })
    }
}
