// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::timestamp::format_timestamp;

/// Label shown for donors who asked not to be named.
pub const ANONYMOUS_DONOR_LABEL: &str = "Anonymous Donor";

/// A material the center accepts and sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecyclableMaterial {
    /// The identifier assigned by the database.
    pub material_id: i64,
    pub name: String,
    pub description: String,
    /// Material family, e.g. plastic or glass.
    pub category: String,
    pub price_per_kg: Decimal,
    pub unit_of_measure: String,
    pub is_toxic: bool,
    pub recommended_drop_off: String,
    /// Unique across all materials.
    pub identification_code: String,
}

impl std::fmt::Display for RecyclableMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Caller-supplied fields for creating or updating a material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_per_kg: Decimal,
    pub unit_of_measure: String,
    pub is_toxic: bool,
    pub recommended_drop_off: String,
    pub identification_code: String,
}

/// A physical site where materials are dropped off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCenter {
    /// The identifier assigned by the database.
    pub center_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub opening_hours: String,
    pub capacity_tonnes: Decimal,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl std::fmt::Display for CollectionCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Caller-supplied fields for creating or updating a collection center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterFields {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub opening_hours: String,
    pub capacity_tonnes: Decimal,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

/// A person or organisation that hands in material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// The identifier assigned by the database.
    pub donor_id: i64,
    pub name: String,
    pub donor_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Tax or national identification number.
    pub tax_id: String,
    /// Set by the store when the donor is created; never updated.
    pub registration_date: Date,
    pub is_anonymous: bool,
}

impl std::fmt::Display for Donor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_anonymous {
            write!(f, "{ANONYMOUS_DONOR_LABEL}")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Caller-supplied fields for creating or updating a donor.
///
/// The registration date is not part of this type: the store assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorFields {
    pub name: String,
    pub donor_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    pub is_anonymous: bool,
}

/// A staff member who receives, processes or sells material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecyclingEmployee {
    /// The identifier assigned by the database.
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all employees.
    pub national_id: String,
    pub hire_date: Date,
    pub role: String,
    pub shift: String,
    pub phone: String,
    pub email: String,
    pub certifications: String,
}

impl RecyclingEmployee {
    /// Returns the employee's first and last name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Display for RecyclingEmployee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.role)
    }
}

/// Caller-supplied fields for creating or updating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub hire_date: Date,
    pub role: String,
    pub shift: String,
    pub phone: String,
    pub email: String,
    pub certifications: String,
}

/// Material physically received from a donor at a center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialIntake {
    /// The identifier assigned by the database.
    pub intake_id: i64,
    pub material_id: i64,
    pub center_id: i64,
    pub donor_id: i64,
    /// The employee who received the material.
    pub receiver_id: i64,
    /// Set by the store when the intake is recorded; never updated.
    pub received_at: PrimitiveDateTime,
    pub quantity_kg: Decimal,
    pub material_condition: String,
    pub notes: String,
}

impl std::fmt::Display for MaterialIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Minutes precision: drop the trailing ":SS".
        let received: String =
            format_timestamp(self.received_at).map_err(|_| std::fmt::Error)?;
        let received: &str = received.get(..16).unwrap_or(&received);
        write!(f, "Intake {} - {received}", self.intake_id)
    }
}

/// Caller-supplied fields for creating or updating an intake.
///
/// The receipt timestamp is not part of this type: the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeFields {
    pub material_id: i64,
    pub center_id: i64,
    pub donor_id: i64,
    pub receiver_id: i64,
    pub quantity_kg: Decimal,
    pub material_condition: String,
    pub notes: String,
}

/// A transformation applied to previously received material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialProcessing {
    /// The identifier assigned by the database.
    pub processing_id: i64,
    pub intake_id: i64,
    /// The employee who ran the process.
    pub employee_id: i64,
    pub started_at: PrimitiveDateTime,
    /// `None` while the process is still running.
    pub ended_at: Option<PrimitiveDateTime>,
    pub process_type: String,
    pub resulting_quantity_kg: Decimal,
    pub byproducts: String,
    pub processing_cost: Decimal,
}

impl std::fmt::Display for MaterialProcessing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processing {} - Intake: {}",
            self.processing_id, self.intake_id
        )
    }
}

/// Caller-supplied fields for creating or updating a processing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFields {
    pub intake_id: i64,
    pub employee_id: i64,
    pub started_at: PrimitiveDateTime,
    pub ended_at: Option<PrimitiveDateTime>,
    pub process_type: String,
    pub resulting_quantity_kg: Decimal,
    pub byproducts: String,
    pub processing_cost: Decimal,
}

/// Material sold to an external buyer.
///
/// `total_amount` is stored exactly as supplied. It is expected to equal
/// `quantity_sold_kg * unit_price`, but nothing enforces that; use
/// [`MaterialSale::is_total_consistent`] to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSale {
    /// The identifier assigned by the database.
    pub sale_id: i64,
    pub material_id: i64,
    /// The employee who made the sale.
    pub seller_id: i64,
    /// Opaque buyer number. There is no customer table to check it against.
    pub buyer_id: i64,
    /// Set by the store when the sale is recorded; never updated.
    pub sold_at: PrimitiveDateTime,
    pub quantity_sold_kg: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub payment_method: String,
}

impl MaterialSale {
    /// Returns `quantity_sold_kg * unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.quantity_sold_kg * self.unit_price
    }

    /// Returns whether the stored total matches quantity times unit price.
    #[must_use]
    pub fn is_total_consistent(&self) -> bool {
        self.line_total() == self.total_amount
    }

    /// Builds the display label. The material name comes from a separate
    /// lookup because the sale only holds the material's id.
    #[must_use]
    pub fn label(&self, material_name: &str) -> String {
        format!(
            "Sale {} - {material_name} - Total: {}",
            self.sale_id, self.total_amount
        )
    }
}

/// Caller-supplied fields for creating or updating a sale.
///
/// The sale timestamp is not part of this type: the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFields {
    pub material_id: i64,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub quantity_sold_kg: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub payment_method: String,
}

impl SaleFields {
    /// Returns `quantity_sold_kg * unit_price`, for callers that want to
    /// fill in `total_amount` themselves.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.quantity_sold_kg * self.unit_price
    }
}
