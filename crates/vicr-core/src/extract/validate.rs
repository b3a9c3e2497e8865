//! Record validation: fixed shape plus non-fatal diagnostics.

use chrono::NaiveDate;

use crate::models::record::{Field, VehicleRecord, VIN_LENGTH};

use super::rules::patterns::{DATE_DMY, YEAR_PREFIX};
use super::rules::{DescriptionFields, ScalarFields};

/// All fields as optional values, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub stock_number: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub body_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub engine_no: Option<String>,
    pub vin: Option<String>,
    pub registration: Option<String>,
    pub registration_expiry: Option<String>,
    pub odometer: Option<String>,
}

impl RecordDraft {
    /// Combine the outputs of scalar extraction and description tokenization.
    pub fn from_parts(scalars: ScalarFields, description: DescriptionFields) -> Self {
        let present = |value: String| Some(value).filter(|v| !v.is_empty());

        Self {
            stock_number: scalars.stock_number,
            year: present(description.year),
            make: present(description.make),
            model: present(description.model),
            body_type: present(description.body_type),
            transmission: present(description.transmission),
            color: present(description.color),
            engine_no: scalars.engine_no,
            vin: scalars.vin,
            registration: scalars.registration,
            registration_expiry: scalars.registration_expiry,
            odometer: scalars.odometer,
        }
    }
}

/// Outcome of validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub record: VehicleRecord,
    pub missing_fields: Vec<Field>,
    pub warnings: Vec<String>,
}

/// Turn a draft into a complete record. Never fails.
pub fn validate(draft: RecordDraft) -> Validated {
    let mut record = VehicleRecord {
        stock_number: draft.stock_number.unwrap_or_default(),
        year: draft.year.unwrap_or_default(),
        make: draft.make.unwrap_or_default(),
        model: draft.model.unwrap_or_default(),
        body_type: draft.body_type.unwrap_or_default(),
        transmission: draft.transmission.unwrap_or_default(),
        color: draft.color.unwrap_or_default(),
        engine_no: draft.engine_no.unwrap_or_default(),
        vin: draft.vin.unwrap_or_default(),
        registration: draft.registration.unwrap_or_default(),
        registration_expiry: draft.registration_expiry.unwrap_or_default(),
        odometer: draft.odometer.unwrap_or_default(),
        vin_warning: None,
    };

    record.vin_warning = vin_length_warning(&record.vin);
    record.year = format_year(&record.year);

    let missing_fields = record.missing_fields();
    let mut warnings: Vec<String> = missing_fields
        .iter()
        .map(|field| format!("Could not extract {}", field.label()))
        .collect();

    if let Some(warning) = &record.vin_warning {
        warnings.push(warning.clone());
    }

    if !record.registration_expiry.is_empty()
        && parse_expiry(&record.registration_expiry).is_none()
    {
        warnings.push(format!(
            "Registration expiry {} is not a valid date",
            record.registration_expiry
        ));
    }

    Validated {
        record,
        missing_fields,
        warnings,
    }
}

/// Warning for a VIN whose length is not 17. An absent VIN gets none.
pub fn vin_length_warning(vin: &str) -> Option<String> {
    let length = vin.chars().count();
    if vin.is_empty() || length == VIN_LENGTH {
        return None;
    }
    Some(format!(
        "VIN should be {} characters, got {}",
        VIN_LENGTH, length
    ))
}

/// Normalize a year that starts with a two-group slash date to `NN/NN`.
pub fn format_year(year: &str) -> String {
    match YEAR_PREFIX.captures(year) {
        Some(caps) => format!("{}/{}", &caps[1], &caps[2]),
        None => year.to_string(),
    }
}

/// Parse a D/M/Y registration expiry into a calendar date.
pub fn parse_expiry(expiry: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(expiry.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3]);

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}
