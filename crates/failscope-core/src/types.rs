//! Core type definitions

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The failed workflow run chosen for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRun {
    /// Run identifier
    pub id: u64,
    /// Workflow name shown in the Actions UI
    pub name: Option<String>,
    /// API URL of the run's log archive
    pub logs_url: String,
    /// Browser URL of the run
    pub html_url: Option<String>,
    /// Branch the run was triggered on
    pub head_branch: Option<String>,
    /// Creation time, if the API reported a parseable timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// What the fetch stage hands to the rest of the pipeline
#[derive(Debug, Clone)]
pub struct FetchOutput {
    /// The run the texts belong to
    pub run: FailedRun,
    /// Workflow definition text
    pub workflow_yaml: String,
    /// Run log text
    pub error_log: String,
}

/// Shared pipeline state.
///
/// Every field starts empty and can be written exactly once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CiState {
    workflow_yaml: Option<String>,
    error_log: Option<String>,
    gemini_suggestion: Option<String>,
}

/// Write `value` into `slot` unless it already holds something
#[inline]
fn write_once(slot: &mut Option<String>, field: &'static str, value: String) -> Result<()> {
    if slot.is_some() {
        return Err(Error::StateConflict(field));
    }
    *slot = Some(value);
    Ok(())
}

impl CiState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Workflow definition text ("" until fetched)
    pub fn workflow_yaml(&self) -> &str {
        self.workflow_yaml.as_deref().unwrap_or("")
    }

    /// Failure log text ("" until fetched)
    pub fn error_log(&self) -> &str {
        self.error_log.as_deref().unwrap_or("")
    }

    /// Model suggestion ("" until analyzed)
    pub fn gemini_suggestion(&self) -> &str {
        self.gemini_suggestion.as_deref().unwrap_or("")
    }

    /// Record the workflow definition
    pub fn set_workflow_yaml(&mut self, value: String) -> Result<()> {
        write_once(&mut self.workflow_yaml, "workflow_yaml", value)
    }

    /// Record the failure log
    pub fn set_error_log(&mut self, value: String) -> Result<()> {
        write_once(&mut self.error_log, "error_log", value)
    }

    /// Record the model suggestion
    pub fn set_gemini_suggestion(&mut self, value: String) -> Result<()> {
        write_once(&mut self.gemini_suggestion, "gemini_suggestion", value)
    }

    /// True once the fetch stage has populated its fields
    pub fn is_fetched(&self) -> bool {
        self.workflow_yaml.is_some() && self.error_log.is_some()
    }

    /// True once every field has been written
    pub fn is_complete(&self) -> bool {
        self.is_fetched() && self.gemini_suggestion.is_some()
    }
}

/// A completed analysis: the selected run plus the filled state
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The run that was analyzed
    pub run: FailedRun,
    /// Final pipeline state
    pub state: CiState,
}
