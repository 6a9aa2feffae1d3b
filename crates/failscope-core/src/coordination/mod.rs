//! Pipeline coordination: the fixed `fetch_ci -> analyze` chain

pub mod analyzer;
pub mod fetcher;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use fetcher::Fetcher;
pub use pipeline::FailurePipeline;

/// One node of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Stage {
    /// Fetch the failed run, its workflow definition and its log
    FetchCi,
    /// Ask the model for a root cause and fix
    Analyze,
}

impl Stage {
    /// Node identifier
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FetchCi => "fetch_ci",
            Self::Analyze => "analyze",
        }
    }

    /// Human-readable label used when rendering the chain
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FetchCi => "Fetch failed CI run",
            Self::Analyze => "Analyze with Gemini",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution order. Entry is the first element, finish the last.
pub const PIPELINE: [Stage; 2] = [Stage::FetchCi, Stage::Analyze];
