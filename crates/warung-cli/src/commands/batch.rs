//! Batch command - parse many OCR line files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use warung_core::{LineParser, RuleBasedParser, ScanInput, ScanResult};

use super::load_config;
use super::output::{format_rows, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g., "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write summary.csv with one line per input file
    #[arg(long)]
    summary: bool,

    /// Continue processing if a file fails
    #[arg(long)]
    continue_on_error: bool,

    /// Maximum files parsed at once (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

/// Result of processing a single file.
struct ProcessResult {
    index: usize,
    path: PathBuf,
    scan: Option<ScanResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;
    let jobs = args.jobs.unwrap_or(config.batch.max_concurrency).max(1);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| config.batch.accepts(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
            )?
            .progress_chars("=>-"),
    );

    // Each scan is an independent parser call, so files run in parallel.
    let total_files = files.len();
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path);
            (index, path, outcome, file_start.elapsed().as_millis() as u64)
        });
    }

    let mut results = Vec::with_capacity(total_files);

    while let Some(joined) = tasks.join_next().await {
        let (index, path, outcome, processing_time_ms) = joined?;

        match outcome {
            Ok(scan) => results.push(ProcessResult {
                index,
                path,
                scan: Some(scan),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        index,
                        path,
                        scan: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    results.sort_by_key(|r| r.index);

    let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
    let names = output_names(&paths);

    for (result, output_name) in results.iter().zip(&names) {
        if let (Some(scan), Some(output_dir)) = (&result.scan, &args.output_dir) {
            let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
            let content = format_rows(&scan.parsed, format, config.output.pretty_json)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.scan.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let rows: usize = results
        .iter()
        .filter_map(|r| r.scan.as_ref())
        .map(|s| s.sales().count())
        .sum();

    println!();
    println!(
        "{} Processed {} files ({} rows) in {:?}",
        style("✓").green(),
        results.len(),
        rows,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file names without the format extension.
///
/// Inputs are named by their stem; when two inputs share a stem
/// (`a.txt`, `a.json`) both keep their full file name instead.
fn output_names(paths: &[&Path]) -> Vec<String> {
    let stem = |p: &Path| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scan")
            .to_string()
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *counts.entry(stem(path)).or_default() += 1;
    }

    paths
        .iter()
        .map(|path| {
            let name = stem(path);
            if counts[&name] > 1 {
                path.file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                    .unwrap_or(name)
            } else {
                name
            }
        })
        .collect()
}

fn process_single_file(path: &Path) -> anyhow::Result<ScanResult> {
    let input = ScanInput::from_file(path)?;
    if input.is_empty() {
        warn!("{} contains no lines", path.display());
    }

    Ok(RuleBasedParser::new().parse_lines(&input.lines))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "rows",
        "date",
        "grand_total",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        if let Some(scan) = &result.scan {
            let status = if scan.sales().next().is_some() {
                "success"
            } else if scan.parsed.is_empty() {
                "empty"
            } else {
                "date_only"
            };
            let rows = scan.sales().count().to_string();
            let total = scan.grand_total().to_string();

            wtr.write_record([
                filename,
                status,
                rows.as_str(),
                scan.detected_date.as_deref().unwrap_or(""),
                total.as_str(),
                time_ms.as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                time_ms.as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
