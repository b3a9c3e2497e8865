//! Output formatting shared by the process and batch commands.

use std::path::Path;

use vicr_core::{DocumentOutcome, Field, VehicleRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-document output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a record in the requested format.
pub fn format_record(record: &VehicleRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_record_csv(record),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn record_row(record: &VehicleRecord) -> impl Iterator<Item = &str> {
    record
        .fields()
        .map(|(_, value)| value)
        .chain(std::iter::once(record.vin_warning.as_deref().unwrap_or("")))
}

fn format_record_csv(record: &VehicleRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(|f| f.as_str()).chain(["vin_warning"]))?;
    wtr.write_record(record_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_record_text(record: &VehicleRecord) -> String {
    let mut output = String::new();

    for (field, value) in record.fields() {
        output.push_str(&format!("{}: {}\n", field.as_str(), value));
    }
    if let Some(warning) = &record.vin_warning {
        output.push_str(&format!("vin_warning: {}\n", warning));
    }

    output
}

/// Write a CSV summary with one row per document outcome.
pub fn write_summary(path: &Path, outcomes: &[DocumentOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(
        ["filename", "status"]
            .into_iter()
            .chain(Field::ALL.iter().map(|f| f.as_str()))
            .chain(["vin_warning", "error"]),
    )?;

    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Success { filename, data, .. } => {
                wtr.write_record(
                    [filename.as_str(), "success"]
                        .into_iter()
                        .chain(record_row(data))
                        .chain([""]),
                )?;
            }
            DocumentOutcome::Error { filename, error } => {
                wtr.write_record(
                    [filename.as_str(), "error"]
                        .into_iter()
                        .chain(Field::ALL.iter().map(|_| ""))
                        .chain(["", error.as_str()]),
                )?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
