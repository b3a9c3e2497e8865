//! Inspection report field extraction.
//!
//! Stages run in a fixed order: normalize the text, extract scalar fields,
//! tokenize the description line, correct identifier OCR errors, validate.

pub mod correct;
pub mod normalize;
mod parser;
pub mod rules;
pub mod validate;

pub use normalize::normalize;
pub use parser::{parse_report, ExtractionResult, InspectionParser, ReportParser};
