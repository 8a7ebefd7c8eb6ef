use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docreader::{
    config::Config, normalize_whitespace, utils, DocumentReaderService, ErrorKind, ExtractError,
    ExtractionReport,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docreader")]
#[command(about = "Extract plain text from documents by declared content type")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to config/settings.toml or ~/.config/docreader/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of a single document
    #[command(name = "extract")]
    Extract {
        /// Document to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Declared content type (guessed from the extension when omitted)
        #[arg(long, short = 't')]
        content_type: Option<String>,
        /// Collapse whitespace runs into single spaces
        #[arg(long)]
        normalize: bool,
        /// Print a JSON report instead of raw text
        #[arg(long)]
        json: bool,
    },
    /// List the content types the reader can handle
    #[command(name = "types")]
    Types,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (falls back to defaults if not found)
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = Arc::new(
        DocumentReaderService::with_defaults(&config).context("Failed to register extractors")?,
    );

    match cli.command {
        Commands::Extract { file, content_type, normalize, json } => {
            let content_type = match content_type {
                Some(ct) => ct,
                None => utils::content_type_for_path(&file)
                    .map(str::to_string)
                    .or_else(|| utils::sniff_package_mimetype(&file))
                    .with_context(|| {
                        format!(
                            "Cannot guess the content type of {}, pass --content-type",
                            file.display()
                        )
                    })?,
            };

            let mut report = tokio::task::spawn_blocking({
                let service = service.clone();
                let file = file.clone();
                move || -> Result<ExtractionReport> {
                    // The handle is owned here and closed when it goes out of scope,
                    // whether or not extraction succeeded
                    let mut handle = File::open(&file)
                        .with_context(|| format!("Failed to open {}", file.display()))?;
                    service
                        .extract_report(&mut handle, &content_type)
                        .map_err(|e| {
                            let hint = hint_for(&e);
                            anyhow::Error::new(e).context(format!(
                                "Failed to extract text from {}: {}",
                                file.display(),
                                hint
                            ))
                        })
                }
            })
            .await??;

            if normalize {
                report = ExtractionReport::new(report.content_type, normalize_whitespace(&report.text));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.text);
            }
        }
        Commands::Types => {
            for content_type in service.supported_content_types() {
                let extractor = service.get_document_reader(content_type.as_str())?;
                println!("{:<60} {}", content_type, extractor.name());
            }
        }
    }

    Ok(())
}

/// User-facing explanation for each failure kind
fn hint_for(err: &ExtractError) -> &'static str {
    match err.kind() {
        ErrorKind::UnsupportedFormat => "this format is not supported",
        ErrorKind::MalformedContainer => "the file is not a valid document package (corrupt or wrong format)",
        ErrorKind::EntryNotFound => "the package lacks its text content; it is probably not this kind of document",
        ErrorKind::MalformedMarkup => "the document content is damaged and cannot be parsed",
        ErrorKind::EntryTooLarge => "the document content exceeds the configured size limit",
        ErrorKind::DuplicateContentType => "conflicting extractor registration",
        ErrorKind::Io => "the file could not be read",
    }
}
