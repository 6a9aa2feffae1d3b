//! Console report of a finished analysis

use crate::types::AnalysisReport;
use std::io::Write;

/// Characters of workflow/log text shown in the text report
pub const SNIPPET_CHARS: usize = 200;

/// First `max_chars` characters of `text`, never splitting a character
#[inline]
pub fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Human-readable report: truncated workflow and log, full suggestion
pub fn write_text_report<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    let state = &report.state;

    writeln!(w, "\n--- Workflow Yaml Snippet ---")?;
    writeln!(w, "{} ...\n", snippet(state.workflow_yaml(), SNIPPET_CHARS))?;
    writeln!(w, "--- Error Log Snippet ---")?;
    writeln!(w, "{} ...\n", snippet(state.error_log(), SNIPPET_CHARS))?;
    writeln!(w, "💡 Gemini Suggestion:\n {}", state.gemini_suggestion())?;
    Ok(())
}

/// The whole report as one JSON object
pub fn write_json_report<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)
}
