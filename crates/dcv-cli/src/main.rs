//! DescomplicaCV CLI - Command-line interface
//!
//! Usage:
//!   dcv extract <files>... [--pretty]
//!   dcv inspect <file>
//!   dcv annotate <file>

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dcv_core::{AppConfig, ExtractionResult, LoggingConfig};
use dcv_extractor::{init_shared_model, Annotator, ResumeExtractor};
use dcv_parser::{DocumentFormat, DocumentInfo, ExtractorRegistry};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dcv")]
#[command(about = "Résumé information extraction")]
#[command(version)]
struct Cli {
    /// TOML configuration file; environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured résumé fields from documents
    Extract {
        /// Résumé files (pdf, docx, txt)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Summarize a document's extracted text
    Inspect {
        file: PathBuf,
    },
    /// Print the linguistic annotation of a document
    Annotate {
        file: PathBuf,
    },
}

/// Extraction output for one input file
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    result: ExtractionResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let registry = Arc::new(ExtractorRegistry::with_defaults());

    match cli.command {
        Commands::Extract { files, pretty } => {
            if init_shared_model(&config.model).is_err() {
                tracing::warn!("Continuing without a language model; results will be degraded");
            }
            let extractor = ResumeExtractor::shared().with_config(config.extraction.clone());

            for report in extract_files(files, registry, extractor).await {
                println!("{}", to_json(&report, pretty)?);
            }
        }
        Commands::Inspect { file } => {
            let (format, text) = read_document(&file, &registry).await?;
            let info = DocumentInfo::summarize(format, &text);
            println!("{}", to_json(&info, true)?);
        }
        Commands::Annotate { file } => {
            let model = init_shared_model(&config.model)?;
            let (_, text) = read_document(&file, &registry).await?;
            let doc = model.annotate(&text)?;
            println!("{}", to_json(&doc, true)?);
        }
    }

    Ok(())
}

/// Config file when given, else defaults; environment overrides either
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

/// Logs go to stderr; stdout carries the JSON output
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dcv={0},dcv_extractor={0},dcv_parser={0}",
            logging.level
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Extract every file concurrently, keeping input order
async fn extract_files(
    files: Vec<PathBuf>,
    registry: Arc<ExtractorRegistry>,
    extractor: ResumeExtractor,
) -> Vec<FileReport> {
    let tasks = files.into_iter().map(|path| {
        let registry = Arc::clone(&registry);
        let extractor = extractor.clone();
        async move {
            let result = extract_file(&path, registry, extractor).await;
            FileReport {
                file: path.display().to_string(),
                result,
            }
        }
    });

    futures::future::join_all(tasks).await
}

/// Failures become the result's error marker
async fn extract_file(
    path: &Path,
    registry: Arc<ExtractorRegistry>,
    extractor: ResumeExtractor,
) -> ExtractionResult {
    let format = match DocumentFormat::from_path(path) {
        Ok(format) => format,
        Err(e) => return ExtractionResult::degraded(e.to_string()),
    };

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Failed to read file");
            return ExtractionResult::degraded(format!("failed to read {}: {e}", path.display()));
        }
    };

    tracing::info!(file = %path.display(), %format, bytes = bytes.len(), "Extracting résumé");

    tokio::task::spawn_blocking(move || extractor.extract_document(&registry, &bytes, format))
        .await
        .unwrap_or_else(|e| ExtractionResult::degraded(format!("extraction task failed: {e}")))
}

async fn read_document(
    path: &Path,
    registry: &ExtractorRegistry,
) -> anyhow::Result<(DocumentFormat, String)> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let text = registry
        .extract(&bytes, format)
        .with_context(|| format!("extracting text from {}", path.display()))?;
    Ok((format, text))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
