//! Process command - extract one vehicle record from OCR text pages.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use vicr_core::batch::join_pages;
use vicr_core::{InspectionParser, ReportParser, SourceError};

use super::format::{format_record, OutputFormat};
use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR text files, one per page, in page order ("-" reads stdin)
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let pages = args
        .pages
        .iter()
        .map(|page| read_page(page))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        return Err(SourceError::EmptyText.into());
    }

    info!("Processing {} page(s)", pages.len());

    let parser = ReportParser::from_config(&config);
    let result = parser.parse(&text);

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_page(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    debug!("Reading page {}", path.display());
    Ok(fs::read_to_string(path)?)
}
