//! Common regex patterns for vehicle inspection report extraction.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::models::record::Field;

use super::fields::FieldPattern;

lazy_static! {
    // Scalar fields, searched case-insensitively across the whole text
    pub static ref STOCK_NUMBER: FieldPattern = FieldPattern::new(
        Field::StockNumber,
        r"MTA\s+(\d+)",
        1,
        true,
    ).unwrap();

    pub static ref ODOMETER: FieldPattern = FieldPattern::new(
        Field::Odometer,
        r"Odometer\s*:?\s*([0-9,\s]+)",
        1,
        true,
    ).unwrap();

    // `o"` is how OCR tends to read a smudged "Engine" label
    pub static ref ENGINE_NO: FieldPattern = FieldPattern::new(
        Field::EngineNo,
        r#"(?:Engine|o")\s*(?:No|N0)\s*:?\s*([A-Z0-9]{6,15})"#,
        1,
        true,
    ).unwrap();

    // Up to 25 characters so stray spaces/dashes inside the 17 character VIN
    // survive; the capture ends at the next registration label or end of text.
    pub static ref VIN: FieldPattern = FieldPattern::new(
        Field::Vin,
        r"VIN\s*:?\s*([A-Z0-9\s\-]{15,25}?)\s*(?:Reg(?:istration)?|\n|$)",
        1,
        true,
    ).unwrap();

    pub static ref REGISTRATION: FieldPattern = FieldPattern::new(
        Field::Registration,
        r"\bReg(?:istration)?\b\s*:?\s*([A-Z0-9]+)",
        1,
        true,
    ).unwrap();

    pub static ref REGISTRATION_EXPIRY: FieldPattern = FieldPattern::new(
        Field::RegistrationExpiry,
        r"Rego\s+Expiry\s*:?\s*(\d{1,2}/\d{1,2}/\d{2,4})",
        1,
        true,
    ).unwrap();

    // Vehicle description line: "03/08 - 03/08 MAZDA MAZDA3 NEO ..."
    pub static ref DESCRIPTION_LINE: Regex = Regex::new(
        r"(\d{2}/\d{2})\s*-\s*(\d{2}/\d{2})\s+([^\n]+)"
    ).unwrap();

    // Door count marker token ("4D", "5DR")
    pub static ref DOOR_COUNT: Regex = Regex::new(
        r"(?i)^\d+D"
    ).unwrap();

    // Letter run immediately followed by a digit run ("MAZDA3")
    pub static ref LETTER_DIGIT_BOUNDARY: Regex = Regex::new(
        r"([A-Za-z]+)(\d+)"
    ).unwrap();

    // Body type templates, in precedence order
    pub static ref BODY_TYPE_TEMPLATES: Vec<Regex> = [
        r"\d+DR\s+(?:Sedan|Hatch|Hatchback|Cabriolet|Convertible)",
        r"\d+D\s+(?:SEDAN|HATCH|WAGON|COUPE|CONVERTIBLE)",
        r"(?:Single|Dual|Double)\s+Cab(?:\s+P/Up)?",
        r"C/(?:Chassis|Chas)",
        r"\b(?:Wagon|Ute|Utility|Coupe)\b",
    ]
    .iter()
    .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build().unwrap())
    .collect();

    pub static ref WORD: Regex = Regex::new(r"\w+").unwrap();

    // Two-group slash date at the start of the year field
    pub static ref YEAR_PREFIX: Regex = Regex::new(
        r"^(\d{2})/(\d{2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$"
    ).unwrap();
}
