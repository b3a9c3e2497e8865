//! Batch processing command for multiple report text files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use vicr_core::batch::{check_source, parse_document};
use vicr_core::models::config::BatchConfig;
use vicr_core::{BatchReport, DocumentOutcome, ReportParser, SourceError};

use super::format::{format_record, write_summary, OutputFormat};
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input text files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file records and results.json
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers (default: batch.jobs from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
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
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    info!("Processing {} files with {} workers", files.len(), jobs);
    let outcomes = process_files(files, &config.batch, ReportParser::from_config(&config), jobs, &pb).await;

    pb.finish_with_message("Complete");

    let report = BatchReport::new(outcomes);

    if let Some(ref output_dir) = args.output_dir {
        write_outputs(output_dir, &report, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &report.results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.results.len(),
        start.elapsed()
    );

    for outcome in report.successful() {
        println!("  {} {}", style("✓").green(), outcome.filename());
    }
    for outcome in report.failed() {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            outcome.filename(),
            outcome.error().unwrap_or_default()
        );
    }

    Ok(())
}

/// Parse every file on the blocking pool, at most `jobs` at a time.
/// Outcomes come back in input order.
async fn process_files(
    files: Vec<PathBuf>,
    batch_config: &BatchConfig,
    parser: ReportParser,
    jobs: usize,
    pb: &ProgressBar,
) -> Vec<DocumentOutcome> {
    let parser = Arc::new(parser);
    let batch_config = Arc::new(batch_config.clone());
    let names = document_names(&files);

    stream::iter(files.into_iter().zip(names).map(|(path, name)| {
        let parser = Arc::clone(&parser);
        let batch_config = Arc::clone(&batch_config);
        let pb = pb.clone();
        async move {
            let task_name = name.clone();
            let task = tokio::task::spawn_blocking(move || {
                process_file(&path, task_name, &parser, &batch_config)
            });
            let outcome = task
                .await
                .unwrap_or_else(|e| DocumentOutcome::failed(name, e));
            pb.inc(1);
            outcome
        }
    }))
    .buffered(jobs)
    .collect()
    .await
}

fn process_file(
    path: &Path,
    name: String,
    parser: &ReportParser,
    config: &BatchConfig,
) -> DocumentOutcome {
    debug!("Processing {}", path.display());

    let text = check_source(path, config).and_then(|()| {
        fs::read_to_string(path).map_err(|e| SourceError::Read(e.to_string()))
    });

    parse_document(parser, name, text)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Name each input for its outcome. Inputs sharing a file name are named by
/// their path below the deepest directory common to all inputs.
fn document_names(files: &[PathBuf]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in files {
        *counts.entry(file_name(path)).or_default() += 1;
    }
    let base = common_ancestor(files);

    files
        .iter()
        .map(|path| {
            let name = file_name(path);
            if counts[&name] == 1 {
                return name;
            }
            path.strip_prefix(&base)
                .ok()
                .map(|relative| {
                    relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .filter(|relative| !relative.is_empty())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect()
}

fn common_ancestor(files: &[PathBuf]) -> PathBuf {
    let mut parents = files.iter().filter_map(|p| p.parent());
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };
    parents.fold(first.to_path_buf(), |base, parent| {
        base.components()
            .zip(parent.components())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect()
    })
}

/// Output file stems for document names, unique within one batch and never
/// clashing with `results.json` or `summary.csv`.
fn output_stems<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used: HashSet<String> = ["results", "summary"].map(String::from).into();

    names
        .into_iter()
        .map(|name| {
            let stem = Path::new(name)
                .with_extension("")
                .to_string_lossy()
                .replace(['/', '\\'], "_");
            let stem = if stem.is_empty() { "report".to_string() } else { stem };

            let mut candidate = stem.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}_{}", stem, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Write one record file per successful document plus `results.json`.
fn write_outputs(output_dir: &Path, report: &BatchReport, format: OutputFormat) -> anyhow::Result<()> {
    let successful: Vec<_> = report.successful().collect();
    let stems = output_stems(successful.iter().map(|outcome| outcome.filename()));

    for (outcome, stem) in successful.into_iter().zip(stems) {
        let Some(record) = outcome.record() else {
            continue;
        };

        let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

        fs::write(&output_path, format_record(record, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    let results_path = output_dir.join("results.json");
    fs::write(&results_path, serde_json::to_string_pretty(report)?)?;
    println!(
        "{} Results written to {}",
        style("✓").green(),
        results_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_names_keep_unique_file_names() {
        let files = vec![PathBuf::from("in/a.txt"), PathBuf::from("in/b.txt")];
        assert_eq!(document_names(&files), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_document_names_disambiguate_shared_file_names() {
        let files = vec![
            PathBuf::from("scans/x/report.txt"),
            PathBuf::from("scans/y/report.txt"),
            PathBuf::from("scans/y/other.txt"),
        ];
        assert_eq!(
            document_names(&files),
            vec!["x/report.txt", "y/report.txt", "other.txt"]
        );
    }

    #[test]
    fn test_output_stems_are_unique() {
        let stems = output_stems(["x/report.txt", "y/report.txt", "x_report.txt", "results.txt"]);
        assert_eq!(stems, vec!["x_report", "y_report", "x_report_2", "results_2"]);
    }
}
