//! Vehicle record model.
//!
//! The field names below are the contract with downstream consumers
//! (form filling, spreadsheets); renaming any of them is a breaking change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Expected length of a Vehicle Identification Number.
pub const VIN_LENGTH: usize = 17;

/// A canonical record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StockNumber,
    Year,
    Make,
    Model,
    BodyType,
    Transmission,
    Color,
    EngineNo,
    Vin,
    Registration,
    RegistrationExpiry,
    Odometer,
}

impl Field {
    /// All fields in canonical output order.
    pub const ALL: [Field; 12] = [
        Field::StockNumber,
        Field::Year,
        Field::Make,
        Field::Model,
        Field::BodyType,
        Field::Transmission,
        Field::Color,
        Field::EngineNo,
        Field::Vin,
        Field::Registration,
        Field::RegistrationExpiry,
        Field::Odometer,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::StockNumber => "stock_number",
            Field::Year => "year",
            Field::Make => "make",
            Field::Model => "model",
            Field::BodyType => "body_type",
            Field::Transmission => "transmission",
            Field::Color => "color",
            Field::EngineNo => "engine_no",
            Field::Vin => "vin",
            Field::Registration => "registration",
            Field::RegistrationExpiry => "registration_expiry",
            Field::Odometer => "odometer",
        }
    }

    /// Human readable label, used in warnings and text output.
    pub fn label(self) -> &'static str {
        match self {
            Field::StockNumber => "stock number",
            Field::Year => "year",
            Field::Make => "make",
            Field::Model => "model",
            Field::BodyType => "body type",
            Field::Transmission => "transmission",
            Field::Color => "color",
            Field::EngineNo => "engine number",
            Field::Vin => "VIN",
            Field::Registration => "registration",
            Field::RegistrationExpiry => "registration expiry",
            Field::Odometer => "odometer",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed vehicle inspection record.
///
/// Every field is always present; unmatched fields hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Dealer stock number.
    pub stock_number: String,

    /// Build date as `MM/YY`.
    pub year: String,

    pub make: String,

    pub model: String,

    /// Body type, e.g. "4D Sedan" or "Dual Cab P/Up".
    pub body_type: String,

    /// "Manual", "Auto" or empty.
    pub transmission: String,

    pub color: String,

    /// Engine number after OCR correction.
    pub engine_no: String,

    /// VIN after OCR correction.
    pub vin: String,

    /// Registration plate.
    pub registration: String,

    /// Registration expiry in the document's D/M/Y form.
    pub registration_expiry: String,

    /// Odometer reading with separators removed.
    pub odometer: String,

    /// Set when the VIN does not have the expected length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin_warning: Option<String>,
}

impl VehicleRecord {
    /// Value of a field by key.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StockNumber => &self.stock_number,
            Field::Year => &self.year,
            Field::Make => &self.make,
            Field::Model => &self.model,
            Field::BodyType => &self.body_type,
            Field::Transmission => &self.transmission,
            Field::Color => &self.color,
            Field::EngineNo => &self.engine_no,
            Field::Vin => &self.vin,
            Field::Registration => &self.registration,
            Field::RegistrationExpiry => &self.registration_expiry,
            Field::Odometer => &self.odometer,
        }
    }

    /// Iterate over `(field, value)` pairs in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |&field| (field, self.get(field)))
    }

    /// Fields that resolved to an empty value.
    pub fn missing_fields(&self) -> Vec<Field> {
        self.fields()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect()
    }
}
