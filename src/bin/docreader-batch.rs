use anyhow::{Context, Result};
use clap::Parser;
use docreader::{config::Config, utils, DocumentReaderService, ErrorKind, ExtractError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "docreader-batch")]
#[command(about = "Extract text from every supported document under a directory")]
#[command(version)]
struct Cli {
    /// Directory to scan
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Stop scheduling new files after the first failure
    #[arg(long)]
    fail_fast: bool,

    /// List every failed file
    #[arg(long, short)]
    verbose: bool,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One file that could not be extracted
struct Failure {
    path: PathBuf,
    kind: ErrorKind,
    message: String,
}

/// Failures collected from the worker threads. A worker panicking while
/// holding the lock must not lose the records already pushed.
#[derive(Default)]
struct FailureLog {
    failures: Mutex<Vec<Failure>>,
}

impl FailureLog {
    fn record(&self, path: &Path, err: &ExtractError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Failure {
                path: path.to_path_buf(),
                kind: err.kind(),
                message: err.to_string(),
            });
    }

    fn into_vec(self) -> Vec<Failure> {
        self.failures
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Failure counts per error kind, in a stable order
fn count_by_kind(failures: &[Failure]) -> BTreeMap<String, usize> {
    let mut by_kind = BTreeMap::new();
    for failure in failures {
        *by_kind.entry(format!("{:?}", failure.kind)).or_insert(0) += 1;
    }
    by_kind
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
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

    let service = DocumentReaderService::with_defaults(&config)
        .context("Failed to register extractors")?;

    println!("Scanning {}...", cli.dir.display());
    let mut jobs = Vec::new();
    for entry in WalkDir::new(&cli.dir) {
        match entry {
            Ok(e) => {
                if !e.path().is_file() {
                    continue;
                }
                if let Some(content_type) = utils::content_type_for_path(e.path()) {
                    if service.supports(content_type) {
                        jobs.push((e.path().to_path_buf(), content_type));
                    }
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }
    println!("Found {} supported documents", jobs.len());

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({msg})")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let fail_fast = cli.fail_fast;
    let total = jobs.len();

    // Extraction is synchronous: run it on the rayon pool, off the async runtime
    let (chars, failures) = tokio::task::spawn_blocking(move || {
        let stop = AtomicBool::new(false);
        let chars = AtomicUsize::new(0);
        let failures = FailureLog::default();

        jobs.par_iter().for_each(|(path, content_type)| {
            if stop.load(Ordering::Relaxed) {
                pb.inc(1);
                return;
            }

            let result = File::open(path)
                .map_err(ExtractError::from)
                .and_then(|mut handle| service.get_content_as_text(&mut handle, content_type));

            match result {
                Ok(text) => {
                    chars.fetch_add(text.chars().count(), Ordering::Relaxed);
                }
                Err(e) => {
                    if fail_fast {
                        stop.store(true, Ordering::Relaxed);
                    }
                    failures.record(path, &e);
                }
            }
            pb.inc(1);
        });

        pb.finish_with_message("done");
        (chars.into_inner(), failures.into_vec())
    })
    .await?;

    println!("Extracted {} characters", chars);
    if failures.is_empty() {
        println!("No failures");
        return Ok(());
    }

    println!("{} failures:", failures.len());
    for (kind, count) in &count_by_kind(&failures) {
        println!("  {:<22} {}", kind, count);
    }

    if cli.verbose {
        for failure in &failures {
            println!("  {}: {}", failure.path.display(), failure.message);
        }
    }

    anyhow::bail!("{} of {} documents failed", failures.len(), total)
}
