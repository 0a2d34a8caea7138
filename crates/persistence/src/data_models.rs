// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mirroring the stored tables, and listing filters.
//!
//! Decimals are stored as whole minor units (`*_cents`, `*_centi_kg`,
//! `*_centi_tonnes`, `*_micro`), flags as `0`/`1` integers and dates as text.
//! The conversions between those stored forms and the domain types live here.

use diesel::prelude::*;
use recycling_center_domain::{
    CollectionCenter, Decimal, DecimalSpec, Donor, MaterialIntake, MaterialProcessing,
    MaterialSale, RecyclableMaterial, RecyclingEmployee, parse_date, parse_timestamp,
};
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{
    collection_centers, donors, material_intakes, material_processings, material_sales,
    recyclable_materials, recycling_employees,
};
use crate::error::PersistenceError;

/// Converts a validated decimal into its stored minor units.
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if the value does not fit an `i64`.
pub fn to_minor_units(
    spec: DecimalSpec,
    field: &str,
    value: Decimal,
) -> Result<i64, PersistenceError> {
    spec.to_minor_units(value).ok_or_else(|| {
        PersistenceError::SerializationError(format!("{field} value {value} cannot be stored"))
    })
}

/// Optional variant of [`to_minor_units`].
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if the value does not fit an `i64`.
pub fn to_optional_minor_units(
    spec: DecimalSpec,
    field: &str,
    value: Option<Decimal>,
) -> Result<Option<i64>, PersistenceError> {
    value.map(|v| to_minor_units(spec, field, v)).transpose()
}

fn date_from_text(value: &str) -> Result<recycling_center_domain::Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn timestamp_from_text(
    value: &str,
) -> Result<recycling_center_domain::PrimitiveDateTime, PersistenceError> {
    parse_timestamp(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Diesel Queryable struct for material rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = recyclable_materials)]
pub struct MaterialRow {
    pub material_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_per_kg_cents: i64,
    pub unit_of_measure: String,
    pub is_toxic: i32,
    pub recommended_drop_off: String,
    pub identification_code: String,
}

impl MaterialRow {
    #[must_use]
    pub fn into_domain(self) -> RecyclableMaterial {
        RecyclableMaterial {
            material_id: self.material_id,
            name: self.name,
            description: self.description,
            category: self.category,
            price_per_kg: DecimalSpec::PRICE.from_minor_units(self.price_per_kg_cents),
            unit_of_measure: self.unit_of_measure,
            is_toxic: self.is_toxic != 0,
            recommended_drop_off: self.recommended_drop_off,
            identification_code: self.identification_code,
        }
    }
}

/// Diesel Queryable struct for collection center rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = collection_centers)]
pub struct CenterRow {
    pub center_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub opening_hours: String,
    pub capacity_centi_tonnes: i64,
    pub latitude_micro: Option<i64>,
    pub longitude_micro: Option<i64>,
}

impl CenterRow {
    #[must_use]
    pub fn into_domain(self) -> CollectionCenter {
        CollectionCenter {
            center_id: self.center_id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            opening_hours: self.opening_hours,
            capacity_tonnes: DecimalSpec::AMOUNT.from_minor_units(self.capacity_centi_tonnes),
            latitude: self
                .latitude_micro
                .map(|v| DecimalSpec::COORDINATE.from_minor_units(v)),
            longitude: self
                .longitude_micro
                .map(|v| DecimalSpec::COORDINATE.from_minor_units(v)),
        }
    }
}

/// Diesel Queryable struct for donor rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = donors)]
pub struct DonorRow {
    pub donor_id: i64,
    pub name: String,
    pub donor_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    pub registration_date: String,
    pub is_anonymous: i32,
}

impl DonorRow {
    /// # Errors
    ///
    /// Returns an error if the stored registration date cannot be parsed.
    pub fn into_domain(self) -> Result<Donor, PersistenceError> {
        Ok(Donor {
            donor_id: self.donor_id,
            name: self.name,
            donor_type: self.donor_type,
            phone: self.phone,
            email: self.email,
            address: self.address,
            tax_id: self.tax_id,
            registration_date: date_from_text(&self.registration_date)?,
            is_anonymous: self.is_anonymous != 0,
        })
    }
}

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = recycling_employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub hire_date: String,
    pub role: String,
    pub shift: String,
    pub phone: String,
    pub email: String,
    pub certifications: String,
}

impl EmployeeRow {
    /// # Errors
    ///
    /// Returns an error if the stored hire date cannot be parsed.
    pub fn into_domain(self) -> Result<RecyclingEmployee, PersistenceError> {
        Ok(RecyclingEmployee {
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            national_id: self.national_id,
            hire_date: date_from_text(&self.hire_date)?,
            role: self.role,
            shift: self.shift,
            phone: self.phone,
            email: self.email,
            certifications: self.certifications,
        })
    }
}

/// Diesel Queryable struct for intake rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = material_intakes)]
pub struct IntakeRow {
    pub intake_id: i64,
    pub material_id: i64,
    pub center_id: i64,
    pub donor_id: i64,
    pub receiver_id: i64,
    pub received_at: String,
    pub quantity_centi_kg: i64,
    pub material_condition: String,
    pub notes: String,
}

impl IntakeRow {
    /// # Errors
    ///
    /// Returns an error if the stored timestamp cannot be parsed.
    pub fn into_domain(self) -> Result<MaterialIntake, PersistenceError> {
        Ok(MaterialIntake {
            intake_id: self.intake_id,
            material_id: self.material_id,
            center_id: self.center_id,
            donor_id: self.donor_id,
            receiver_id: self.receiver_id,
            received_at: timestamp_from_text(&self.received_at)?,
            quantity_kg: DecimalSpec::AMOUNT.from_minor_units(self.quantity_centi_kg),
            material_condition: self.material_condition,
            notes: self.notes,
        })
    }
}

/// Diesel Queryable struct for processing rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = material_processings)]
pub struct ProcessingRow {
    pub processing_id: i64,
    pub intake_id: i64,
    pub employee_id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub process_type: String,
    pub resulting_quantity_centi_kg: i64,
    pub byproducts: String,
    pub processing_cost_cents: i64,
}

impl ProcessingRow {
    /// # Errors
    ///
    /// Returns an error if a stored timestamp cannot be parsed.
    pub fn into_domain(self) -> Result<MaterialProcessing, PersistenceError> {
        Ok(MaterialProcessing {
            processing_id: self.processing_id,
            intake_id: self.intake_id,
            employee_id: self.employee_id,
            started_at: timestamp_from_text(&self.started_at)?,
            ended_at: self
                .ended_at
                .as_deref()
                .map(timestamp_from_text)
                .transpose()?,
            process_type: self.process_type,
            resulting_quantity_kg: DecimalSpec::AMOUNT
                .from_minor_units(self.resulting_quantity_centi_kg),
            byproducts: self.byproducts,
            processing_cost: DecimalSpec::AMOUNT.from_minor_units(self.processing_cost_cents),
        })
    }
}

/// Diesel Queryable struct for sale rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = material_sales)]
pub struct SaleRow {
    pub sale_id: i64,
    pub material_id: i64,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub sold_at: String,
    pub quantity_sold_centi_kg: i64,
    pub unit_price_cents: i64,
    pub total_amount_cents: i64,
    pub payment_method: String,
}

impl SaleRow {
    /// # Errors
    ///
    /// Returns an error if the stored timestamp cannot be parsed.
    pub fn into_domain(self) -> Result<MaterialSale, PersistenceError> {
        Ok(MaterialSale {
            sale_id: self.sale_id,
            material_id: self.material_id,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
            sold_at: timestamp_from_text(&self.sold_at)?,
            quantity_sold_kg: DecimalSpec::AMOUNT.from_minor_units(self.quantity_sold_centi_kg),
            unit_price: DecimalSpec::PRICE.from_minor_units(self.unit_price_cents),
            total_amount: DecimalSpec::AMOUNT.from_minor_units(self.total_amount_cents),
            payment_method: self.payment_method,
        })
    }
}

/// Narrows `list_intakes`. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeFilter {
    pub material_id: Option<i64>,
    pub center_id: Option<i64>,
    pub donor_id: Option<i64>,
    pub receiver_id: Option<i64>,
}

/// Narrows `list_processings`. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFilter {
    pub intake_id: Option<i64>,
    pub employee_id: Option<i64>,
}

/// Narrows `list_sales`. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFilter {
    pub material_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub buyer_id: Option<i64>,
}
