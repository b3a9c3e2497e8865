//! Inspection report parser: runs the extraction stages in order.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::VicrConfig;
use crate::models::record::{Field, VehicleRecord};

use super::correct::correct_identifiers;
use super::normalize::normalize;
use super::rules::{extract_scalar_fields, DescriptionTokenizer, StopReason, Vocabulary};
use super::validate::{validate, RecordDraft};

/// Result of parsing one inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// The complete record.
    pub record: VehicleRecord,
    /// Fields that resolved to empty.
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Rule that ended the model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_stop: Option<StopReason>,
}

/// Trait for inspection report parsing.
pub trait InspectionParser {
    /// Parse a report from OCR text. Never fails; unmatched fields are empty.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Parse and keep only the record.
    fn parse_record(&self, text: &str) -> VehicleRecord {
        self.parse(text).record
    }
}

/// Rule-based parser for vehicle inspection reports.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    vocabulary: Vocabulary,
}

impl ReportParser {
    /// Create a parser with the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &VicrConfig) -> Self {
        Self::new().with_vocabulary(config.vocabulary())
    }

    /// Replace the keyword vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl InspectionParser for ReportParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        info!("Parsing inspection report from {} characters of text", text.len());

        let text = normalize(text);

        let scalars = extract_scalar_fields(&text);
        let description = DescriptionTokenizer::new(&self.vocabulary).tokenize(&text);
        let model_stop = description.stop_reason;

        // Identifier corrections must see extracted values, never the text.
        let mut draft = RecordDraft::from_parts(scalars, description);
        correct_identifiers(&mut draft);

        let validated = validate(draft);

        debug!(
            "Extracted {} {} (VIN {:?}), {} fields missing",
            validated.record.make,
            validated.record.model,
            validated.record.vin,
            validated.missing_fields.len()
        );

        ExtractionResult {
            record: validated.record,
            missing_fields: validated.missing_fields,
            warnings: validated.warnings,
            model_stop,
        }
    }
}

/// Parse a report with the default parser.
pub fn parse_report(text: &str) -> VehicleRecord {
    ReportParser::new().parse_record(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        CENTRAL AUTO AUCTIONS
        Inspection Report

        MTA 220902
        03/08 - 03/08 MAZDA MAZDA3 NEO SPORT BK MY08 4D SEDAN MULTI POINT F/INJ 2.0L 4CYL 5 SP MANUAL GREY

        Odometer 186,521
        Engine No LF1O525984
        VIN JM0BK1OF2OO4O593O
        Reg 279VKU
        Rego Expiry 5/10/25
    "#;

    #[test]
    fn test_parse_sample_report() {
        let result = ReportParser::new().parse(SAMPLE);
        let record = &result.record;

        assert_eq!(record.stock_number, "220902");
        assert_eq!(record.year, "03/08");
        assert_eq!(record.make, "MAZDA");
        assert_eq!(record.model, "Mazda 3");
        assert_eq!(record.body_type, "4D Sedan");
        assert_eq!(record.transmission, "Manual");
        assert_eq!(record.color, "Grey");
        assert_eq!(record.engine_no, "LF10525984");
        assert_eq!(record.vin, "JM0BK10F200405930");
        assert_eq!(record.registration, "279VKU");
        assert_eq!(record.registration_expiry, "5/10/25");
        assert_eq!(record.odometer, "186521");
        assert_eq!(record.vin_warning, None);

        assert!(result.missing_fields.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.model_stop, Some(StopReason::Badge));
    }

    #[test]
    fn test_parse_empty_text() {
        let result = ReportParser::new().parse("");
        assert_eq!(result.record, VehicleRecord::default());
        assert_eq!(result.missing_fields.len(), Field::ALL.len());
        assert_eq!(result.model_stop, None);
    }

    #[test]
    fn test_custom_vocabulary_changes_model_split() {
        let text = "01/20 - 01/20 FORD RANGER WILDTRAK DUAL CAB P/UP AUTO BLUE";

        let default = ReportParser::new().parse_record(text);
        assert_eq!(default.model, "Ranger Wildtrak Dual");

        let parser = ReportParser::new()
            .with_vocabulary(Vocabulary::default().with_badges(["WILDTRAK"]));
        let custom = parser.parse_record(text);
        assert_eq!(custom.model, "Ranger");
        assert_eq!(custom.body_type, "Dual Cab P/Up");
    }

    #[test]
    fn test_from_config() {
        let mut config = VicrConfig::default();
        config.extraction.vocabulary.extra_colors.push("TEAL".to_string());

        let parser = ReportParser::from_config(&config);
        let record = parser.parse_record("05/19 - 05/19 KIA RIO S 5D HATCH AUTO TEAL");
        assert_eq!(record.color, "Teal");
        assert_eq!(record.model, "Rio");
    }
}
