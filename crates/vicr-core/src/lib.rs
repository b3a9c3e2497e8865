//! Core library for vehicle inspection report processing.
//!
//! This crate provides:
//! - OCR text normalization
//! - Scalar field extraction (stock number, odometer, engine number, VIN, registration)
//! - Vehicle description tokenization (year, make, model, body type, transmission, color)
//! - Fixed-shape vehicle records with non-fatal diagnostics
//! - Per-document batch outcomes

pub mod batch;
pub mod error;
pub mod extract;
pub mod models;

pub use batch::{BatchReport, DocumentOutcome};
pub use error::{Result, SourceError, VicrError};
pub use extract::rules::{StopReason, Vocabulary};
pub use extract::{parse_report, ExtractionResult, InspectionParser, ReportParser};
pub use models::config::VicrConfig;
pub use models::record::{Field, VehicleRecord};
