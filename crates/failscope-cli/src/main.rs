#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use failscope_core::output::{write_json_report, write_text_report, OutputWriter};
use failscope_core::{AnalysisReport, ErrorKind, RawSettings, Settings};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "failscope",
    version,
    about = "Explain the most recent failed CI run with Gemini",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    analyze: AnalyzeArgs,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch the latest failed run and print the model's diagnosis (default)
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Clone)]
struct AnalyzeArgs {
    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPO")]
    repo: Option<String>,

    /// Workflow definition path inside the repository
    #[arg(long, env = "WORKFLOW_FILE")]
    workflow_file: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    github_api_url: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_API_URL")]
    gemini_api_url: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Where to write the pipeline graph (.svg, or .mmd for Mermaid)
    #[arg(long, env = "FAILSCOPE_GRAPH_PATH")]
    graph_path: Option<String>,

    /// Output format: text or json
    #[arg(long, env = "FAILSCOPE_OUTPUT_FORMAT")]
    output_format: Option<String>,
}

impl AnalyzeArgs {
    fn raw_settings(&self) -> RawSettings {
        RawSettings {
            github_token: self.token.clone(),
            github_repo: self.repo.clone(),
            workflow_file: self.workflow_file.clone(),
            gemini_api_key: self.gemini_api_key.clone(),
            github_api_url: self.github_api_url.clone(),
            gemini_api_url: self.gemini_api_url.clone(),
            gemini_model: self.model.clone(),
            graph_path: self.graph_path.clone(),
        }
    }
}

/// Output format for the CLI
#[derive(Clone, Copy)]
enum OutputFormat {
    /// Snippets and suggestion to stdout
    Text,
    /// Full report as JSON to stdout
    Json,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit.map(str::trim) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FAILSCOPE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Treat a missing `.env` as success; surface parse and I/O errors
fn allow_missing_dotenv<T>(result: dotenvy::Result<T>) -> dotenvy::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Exit status for a failed analysis
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Config => 1,
        _ => 2,
    }
}

fn main() {
    // .env values must be in place before clap reads env-backed args
    if let Err(e) = allow_missing_dotenv(dotenvy::dotenv()) {
        eprintln!("Error: failed to load .env: {e}");
        std::process::exit(1);
    }
    init_tracing();

    let cli = Cli::parse();
    let args = match cli.command {
        Some(Commands::Analyze(args)) => args,
        None => cli.analyze,
    };
    std::process::exit(run_analyze(args));
}

fn run_analyze(args: AnalyzeArgs) -> i32 {
    let output_format = OutputFormat::detect(args.output_format.as_deref());

    // Fail on missing configuration before any network call
    let settings = match Settings::from_raw(args.raw_settings()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    tracing::debug!(?settings, "configuration loaded");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {e}");
            return 2;
        }
    };

    let report = match rt.block_on(failscope_core::analyze_latest_failure(&settings)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code(e.kind());
        }
    };

    if let Err(e) = write_report(&report, output_format) {
        eprintln!("Error: failed to write report: {e}");
        return 2;
    }

    if let Err(e) = OutputWriter::write_graph(&settings.graph_path) {
        eprintln!("Error: failed to write graph: {e}");
        return 2;
    }
    let saved = format!("✅ Graph saved to {}", settings.graph_path.display());
    match output_format {
        OutputFormat::Text => println!("{saved}"),
        // Keep stdout a single JSON document
        OutputFormat::Json => eprintln!("{saved}"),
    }

    0
}

fn write_report(report: &AnalysisReport, format: OutputFormat) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    match format {
        OutputFormat::Text => write_text_report(&mut w, report)?,
        OutputFormat::Json => write_json_report(&mut w, report)?,
    }
    w.flush()
}
