// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level rules applied before any record is written.
//!
//! Each `validate_*_fields` function checks required text, length limits,
//! email shape and decimal precision, and returns a copy with every decimal
//! rescaled to its stored precision. Checks that need the database
//! (uniqueness, foreign keys, dependents) live in the persistence layer.

use rust_decimal::Decimal;

use crate::decimal::DecimalSpec;
use crate::error::DomainError;
use crate::timestamp::check_year;
use crate::types::{
    CenterFields, DonorFields, EmployeeFields, IntakeFields, MaterialFields, ProcessingFields,
    SaleFields,
};

fn check_length(field: &'static str, value: &str, max_length: usize) -> Result<(), DomainError> {
    let length: usize = value.chars().count();
    if length > max_length {
        return Err(DomainError::FieldTooLong {
            field,
            max_length,
            length,
        });
    }
    Ok(())
}

/// Rule: required text must be non-blank and within `max_length` characters.
fn require_text(field: &'static str, value: &str, max_length: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::RequiredField { field });
    }
    check_length(field, value, max_length)
}

/// Rule: unbounded required text must be non-blank.
fn require_long_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::RequiredField { field });
    }
    Ok(())
}

/// Validates the shape of an optional email address.
///
/// Empty values are accepted. Non-empty values must contain exactly one `@`
/// with a non-empty local part and a domain containing an inner dot.
///
/// # Errors
///
/// Returns `DomainError::FieldTooLong` or `DomainError::InvalidEmail`.
pub fn validate_email(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Ok(());
    }
    check_length(field, value, 100)?;

    let invalid = || DomainError::InvalidEmail {
        field,
        value: value.to_string(),
    };

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.find('.') {
        Some(pos) if pos > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates material fields.
///
/// # Errors
///
/// Returns an error if:
/// - `name`, `category`, `unit_of_measure` or `identification_code` is blank or too long
/// - `recommended_drop_off` is too long
/// - `price_per_kg` is negative or does not fit 5 digits with 2 decimals
pub fn validate_material_fields(fields: &MaterialFields) -> Result<MaterialFields, DomainError> {
    require_text("name", &fields.name, 100)?;
    require_text("category", &fields.category, 50)?;
    require_text("unit_of_measure", &fields.unit_of_measure, 20)?;
    require_text("identification_code", &fields.identification_code, 50)?;
    check_length("recommended_drop_off", &fields.recommended_drop_off, 100)?;

    let price_per_kg: Decimal = DecimalSpec::PRICE.apply("price_per_kg", fields.price_per_kg)?;

    Ok(MaterialFields {
        price_per_kg,
        ..fields.clone()
    })
}

/// Validates collection center fields.
///
/// Latitude and longitude are independently optional.
///
/// # Errors
///
/// Returns an error if:
/// - `name`, `address` or `opening_hours` is blank, or a text field is too long
/// - `email` is malformed
/// - `capacity_tonnes` is negative or exceeds its precision
/// - a coordinate has more than 6 decimals or 4 integer digits
pub fn validate_center_fields(fields: &CenterFields) -> Result<CenterFields, DomainError> {
    require_text("name", &fields.name, 255)?;
    require_text("address", &fields.address, 255)?;
    require_long_text("opening_hours", &fields.opening_hours)?;
    check_length("phone", &fields.phone, 20)?;
    validate_email("email", &fields.email)?;

    let capacity_tonnes: Decimal =
        DecimalSpec::AMOUNT.apply("capacity_tonnes", fields.capacity_tonnes)?;
    let latitude: Option<Decimal> =
        DecimalSpec::COORDINATE.apply_optional("latitude", fields.latitude)?;
    let longitude: Option<Decimal> =
        DecimalSpec::COORDINATE.apply_optional("longitude", fields.longitude)?;

    Ok(CenterFields {
        capacity_tonnes,
        latitude,
        longitude,
        ..fields.clone()
    })
}

/// Validates donor fields.
///
/// # Errors
///
/// Returns an error if `name` or `donor_type` is blank, a text field is too
/// long, or `email` is malformed.
pub fn validate_donor_fields(fields: &DonorFields) -> Result<DonorFields, DomainError> {
    require_text("name", &fields.name, 255)?;
    require_text("donor_type", &fields.donor_type, 50)?;
    check_length("phone", &fields.phone, 20)?;
    validate_email("email", &fields.email)?;
    check_length("address", &fields.address, 255)?;
    check_length("tax_id", &fields.tax_id, 20)?;

    Ok(fields.clone())
}

/// Validates employee fields.
///
/// # Errors
///
/// Returns an error if:
/// - A required name, `national_id`, `role` or `shift` is blank
/// - A text field is too long or `email` is malformed
/// - The year of `hire_date` is outside `1..=9999`
pub fn validate_employee_fields(fields: &EmployeeFields) -> Result<EmployeeFields, DomainError> {
    require_text("first_name", &fields.first_name, 100)?;
    require_text("last_name", &fields.last_name, 100)?;
    require_text("national_id", &fields.national_id, 20)?;
    require_text("role", &fields.role, 50)?;
    require_text("shift", &fields.shift, 50)?;
    check_length("phone", &fields.phone, 20)?;
    validate_email("email", &fields.email)?;
    check_year("hire_date", fields.hire_date)?;

    Ok(fields.clone())
}

/// Validates intake fields. Referenced ids are checked by the store.
///
/// # Errors
///
/// Returns an error if `material_condition` is blank or too long, or
/// `quantity_kg` is negative or exceeds its precision.
pub fn validate_intake_fields(fields: &IntakeFields) -> Result<IntakeFields, DomainError> {
    require_text("material_condition", &fields.material_condition, 50)?;
    let quantity_kg: Decimal = DecimalSpec::AMOUNT.apply("quantity_kg", fields.quantity_kg)?;

    Ok(IntakeFields {
        quantity_kg,
        ..fields.clone()
    })
}

/// Validates processing fields. Referenced ids are checked by the store.
///
/// # Errors
///
/// Returns an error if:
/// - `process_type` is blank or too long
/// - The year of `started_at` or `ended_at` is outside `1..=9999`
/// - `ended_at` is before `started_at`
/// - `resulting_quantity_kg` or `processing_cost` is negative or exceeds its precision
pub fn validate_processing_fields(
    fields: &ProcessingFields,
) -> Result<ProcessingFields, DomainError> {
    require_text("process_type", &fields.process_type, 100)?;
    check_year("started_at", fields.started_at.date())?;

    if let Some(ended_at) = fields.ended_at {
        check_year("ended_at", ended_at.date())?;
        if ended_at < fields.started_at {
            return Err(DomainError::EndBeforeStart {
                started_at: fields.started_at,
                ended_at,
            });
        }
    }

    let resulting_quantity_kg: Decimal =
        DecimalSpec::AMOUNT.apply("resulting_quantity_kg", fields.resulting_quantity_kg)?;
    let processing_cost: Decimal =
        DecimalSpec::AMOUNT.apply("processing_cost", fields.processing_cost)?;

    Ok(ProcessingFields {
        resulting_quantity_kg,
        processing_cost,
        ..fields.clone()
    })
}

/// Validates sale fields. The material and seller are checked by the store;
/// `buyer_id` is never checked.
///
/// `total_amount` is validated for precision only. It is not compared with
/// `quantity_sold_kg * unit_price`.
///
/// # Errors
///
/// Returns an error if `payment_method` is blank or too long, or an amount is
/// negative or exceeds its precision.
pub fn validate_sale_fields(fields: &SaleFields) -> Result<SaleFields, DomainError> {
    require_text("payment_method", &fields.payment_method, 50)?;

    let quantity_sold_kg: Decimal =
        DecimalSpec::AMOUNT.apply("quantity_sold_kg", fields.quantity_sold_kg)?;
    let unit_price: Decimal = DecimalSpec::PRICE.apply("unit_price", fields.unit_price)?;
    let total_amount: Decimal = DecimalSpec::AMOUNT.apply("total_amount", fields.total_amount)?;

    Ok(SaleFields {
        quantity_sold_kg,
        unit_price,
        total_amount,
        ..fields.clone()
    })
}
