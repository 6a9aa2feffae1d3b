//! Prompt construction

/// Appended to every failure log before it is sent to the model
pub const INSTRUCTION_SUFFIX: &str = "\n\nSummarize root cause and suggest a fix.";

/// The full log followed by the fixed instruction. Nothing is trimmed or capped.
pub fn build_prompt(error_log: &str) -> String {
    let mut prompt = String::with_capacity(error_log.len() + INSTRUCTION_SUFFIX.len());
    prompt.push_str(error_log);
    prompt.push_str(INSTRUCTION_SUFFIX);
    prompt
}
