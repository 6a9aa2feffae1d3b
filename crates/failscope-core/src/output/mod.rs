//! Report formatting and the pipeline graph artifact

pub mod graph;
pub mod report;
pub mod writer;

pub use report::{snippet, write_json_report, write_text_report, SNIPPET_CHARS};
pub use writer::OutputWriter;
