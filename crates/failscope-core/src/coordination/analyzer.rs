//! Analyze stage: ask the model about the failure log

use crate::error::Result;
use crate::llm::build_prompt;
use crate::traits::SuggestionModel;
use tracing::info;

/// Turns a failure log into a suggestion
pub struct Analyzer<'a, M: SuggestionModel> {
    model: &'a M,
}

impl<'a, M: SuggestionModel> Analyzer<'a, M> {
    /// Create an analyzer backed by `model`
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }

    /// Send the full log with the fixed instruction; the reply is returned untouched
    pub async fn analyze(&self, error_log: &str) -> Result<String> {
        let prompt = build_prompt(error_log);
        info!(prompt_bytes = prompt.len(), "requesting suggestion");

        let suggestion = self.model.generate(&prompt).await?;
        info!(bytes = suggestion.len(), "suggestion received");
        Ok(suggestion)
    }
}
