//! Per-document outcomes for batch processing.
//!
//! Every document in a batch yields its own outcome. A document that cannot
//! be read or parsed becomes an error outcome; it never affects its siblings.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::error::SourceError;
use crate::extract::InspectionParser;
use crate::models::config::BatchConfig;
use crate::models::record::VehicleRecord;

/// Separator placed between the OCR text of consecutive pages.
pub const PAGE_BREAK_MARKER: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Concatenate per-page OCR text into one document.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref())
        .collect::<Vec<&str>>()
        .join(PAGE_BREAK_MARKER)
}

/// Check that a source file has an accepted extension.
pub fn check_source(path: &Path, config: &BatchConfig) -> Result<(), SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    if config.accepts_extension(extension) {
        Ok(())
    } else {
        Err(SourceError::UnsupportedFormat(
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
        ))
    }
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Success {
        filename: String,
        data: VehicleRecord,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    Error {
        filename: String,
        error: String,
    },
}

impl DocumentOutcome {
    /// An error outcome for `filename`.
    pub fn failed(filename: impl Into<String>, error: impl fmt::Display) -> Self {
        Self::Error {
            filename: filename.into(),
            error: error.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Success { filename, .. } | Self::Error { filename, .. } => filename,
        }
    }

    pub fn record(&self) -> Option<&VehicleRecord> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error.as_str()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Parse one document's text, turning a source failure into an error outcome.
pub fn parse_document<P>(
    parser: &P,
    filename: impl Into<String>,
    text: Result<String, SourceError>,
) -> DocumentOutcome
where
    P: InspectionParser + ?Sized,
{
    let filename = filename.into();

    let text = match text {
        Ok(text) if text.trim().is_empty() => Err(SourceError::EmptyText),
        other => other,
    };

    match text {
        Ok(text) => {
            let result = parser.parse(&text);
            DocumentOutcome::Success {
                filename,
                data: result.record,
                warnings: result.warnings,
            }
        }
        Err(e) => {
            warn!("Failed to process {}: {}", filename, e);
            DocumentOutcome::failed(filename, e)
        }
    }
}

/// Aggregated outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Always "success": the batch itself completes even if documents fail.
    pub status: &'static str,
    pub results: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn new(results: Vec<DocumentOutcome>) -> Self {
        Self {
            status: "success",
            results,
        }
    }

    pub fn successful(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ReportParser;

    #[test]
    fn test_join_pages() {
        let joined = join_pages(&["page one", "page two"]);
        assert_eq!(joined, "page one\n\n--- PAGE BREAK ---\n\npage two");
        assert_eq!(join_pages::<&str>(&[]), "");
    }

    #[test]
    fn test_check_source() {
        let config = BatchConfig::default();
        assert!(check_source(Path::new("scans/report.txt"), &config).is_ok());
        assert!(check_source(Path::new("REPORT.TXT"), &config).is_ok());
        assert_eq!(
            check_source(Path::new("scans/report.pdf"), &config),
            Err(SourceError::UnsupportedFormat("report.pdf".to_string()))
        );
    }

    #[test]
    fn test_parse_document_isolates_failures() {
        let parser = ReportParser::new();
        let outcomes = vec![
            parse_document(&parser, "a.txt", Ok("MTA 1 Reg ABC123".to_string())),
            parse_document(&parser, "b.txt", Err(SourceError::Read("permission denied".to_string()))),
            parse_document(&parser, "c.txt", Ok("  \n ".to_string())),
            parse_document(&parser, "d.txt", Ok("MTA 2".to_string())),
        ];
        let report = BatchReport::new(outcomes);

        assert_eq!(report.successful().count(), 2);
        assert_eq!(report.failed().count(), 2);
        assert_eq!(report.results[0].record().unwrap().registration, "ABC123");
        assert_eq!(report.results[3].record().unwrap().stock_number, "2");
        assert_eq!(
            report.results[2].error(),
            Some("no text extracted from document")
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let success = DocumentOutcome::Success {
            filename: "a.txt".to_string(),
            data: VehicleRecord::default(),
            warnings: Vec::new(),
        };
        let json = serde_json::to_value(&success).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["data"]["vin"], "");
        assert!(json.get("warnings").is_none());

        let error = DocumentOutcome::failed("b.pdf", SourceError::UnsupportedFormat("b.pdf".to_string()));
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "Invalid file type: b.pdf");
    }
}
