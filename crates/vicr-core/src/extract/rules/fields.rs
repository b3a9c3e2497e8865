//! Scalar field extraction (stock number, odometer, engine number, VIN,
//! registration, registration expiry).

use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use crate::models::record::Field;

use super::patterns::{ENGINE_NO, ODOMETER, REGISTRATION, REGISTRATION_EXPIRY, STOCK_NUMBER, VIN};
use super::{ExtractionMatch, FieldExtractor};

/// A named extraction rule.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    /// Field this rule fills.
    pub field: Field,
    /// Compiled pattern.
    pub regex: Regex,
    /// Capture group holding the value.
    pub group: usize,
    /// Whether the pattern ignores case.
    pub case_insensitive: bool,
}

impl FieldPattern {
    /// Compile a field pattern.
    pub fn new(
        field: Field,
        pattern: &str,
        group: usize,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()?;

        Ok(Self {
            field,
            regex,
            group,
            case_insensitive,
        })
    }
}

impl FieldPattern {
    fn to_match(&self, caps: &Captures<'_>) -> Option<ExtractionMatch<String>> {
        let full_match = caps.get(0)?;
        let value = caps.get(self.group)?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(
            ExtractionMatch::new(value.to_string(), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl FieldExtractor for FieldPattern {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.to_match(&self.regex.captures(text)?)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| self.to_match(&caps))
            .collect()
    }
}

/// Scalar fields as extracted, before OCR correction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarFields {
    pub stock_number: Option<String>,
    pub odometer: Option<String>,
    pub engine_no: Option<String>,
    pub vin: Option<String>,
    pub registration: Option<String>,
    pub registration_expiry: Option<String>,
}

/// Extract every scalar field from normalized text.
///
/// Each field is searched independently; a miss on one never affects another.
pub fn extract_scalar_fields(text: &str) -> ScalarFields {
    let value = |pattern: &FieldPattern| {
        let found = pattern.extract(text)?;
        debug!(
            "{} {:?} from {:?} at {:?}",
            pattern.field, found.value, found.source, found.position
        );
        Some(found.value)
    };

    ScalarFields {
        stock_number: value(&STOCK_NUMBER),
        odometer: value(&ODOMETER)
            .map(|reading| strip_separators(&reading))
            .filter(|reading| !reading.is_empty()),
        engine_no: value(&ENGINE_NO),
        vin: value(&VIN),
        registration: value(&REGISTRATION),
        registration_expiry: value(&REGISTRATION_EXPIRY),
    }
}

/// Remove thousands separators from an odometer reading.
pub fn strip_separators(reading: &str) -> String {
    reading
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}
