//! Generative model client and prompt construction

pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{build_prompt, INSTRUCTION_SUFFIX};
