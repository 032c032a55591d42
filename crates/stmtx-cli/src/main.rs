//! CLI for extracting fields from a folder of credit-card statement PDFs.

mod batch;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stmtx_core::StmtxConfig;

/// Extract card number, billing cycle, due date, total due and card variant
/// from credit-card statement PDFs
#[derive(Parser)]
#[command(name = "stmtx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder containing PDF statements
    #[arg(long)]
    input: PathBuf,

    /// Output CSV file name
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity, RUST_LOG wins when set
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref())?;
    debug!("Effective config: {}", serde_json::to_string(&config)?);

    batch::run(&cli.input, &cli.output, &config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stmtx").join("config.json"))
}

/// Explicit `--config`, else the user config file if present, else defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<StmtxConfig> {
    if let Some(path) = path {
        return StmtxConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Using config file {}", path.display());
            StmtxConfig::from_file(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        _ => Ok(StmtxConfig::default()),
    }
}
