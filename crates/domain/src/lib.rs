// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the recycling center records system.
//!
//! This crate defines the seven record types, the caller-supplied field sets
//! used to create and update them, the field rules checked before any write,
//! and the explicit [`SchemaRegistry`] describing how the records relate.
//! It performs no I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod decimal;
mod error;
mod registry;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use decimal::DecimalSpec;
pub use error::DomainError;
pub use registry::{EntityKind, EntitySchema, Relation, SchemaRegistry};
pub use timestamp::{
    MAX_YEAR, MIN_YEAR, check_year, format_date, format_timestamp, now_utc, parse_date,
    parse_timestamp,
};
pub use types::{
    ANONYMOUS_DONOR_LABEL, CenterFields, CollectionCenter, Donor, DonorFields, EmployeeFields,
    IntakeFields, MaterialFields, MaterialIntake, MaterialProcessing, MaterialSale,
    ProcessingFields, RecyclableMaterial, RecyclingEmployee, SaleFields,
};
pub use validation::{
    validate_center_fields, validate_donor_fields, validate_email, validate_employee_fields,
    validate_intake_fields, validate_material_fields, validate_processing_fields,
    validate_sale_fields,
};

// Re-exported so callers can build field sets without depending on these directly.
pub use rust_decimal::Decimal;
pub use time::{Date, PrimitiveDateTime};
