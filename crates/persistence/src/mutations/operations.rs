// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Intake, processing and sale mutations.
//!
//! Every referenced record is checked inside the write transaction, so a
//! missing material, center, donor, employee or intake is reported as
//! `MissingReference` naming the offending field rather than as a raw
//! foreign-key failure. `buyer_id` on sales is stored as given.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{
    DecimalSpec, EntityKind, IntakeFields, ProcessingFields, Relation, SaleFields,
    format_timestamp, now_utc, validate_intake_fields, validate_processing_fields,
    validate_sale_fields,
};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::to_minor_units;
use crate::diesel_schema::{material_intakes, material_processings, material_sales};
use crate::error::PersistenceError;
use crate::mutations::{ensure_exists, ensure_reference};

/// Checks every foreign key of an intake.
fn ensure_intake_references<C: PersistenceBackend>(
    conn: &mut C,
    fields: &IntakeFields,
) -> Result<(), PersistenceError> {
    ensure_reference(conn, Relation::IntakeMaterial, fields.material_id)?;
    ensure_reference(conn, Relation::IntakeCenter, fields.center_id)?;
    ensure_reference(conn, Relation::IntakeDonor, fields.donor_id)?;
    ensure_reference(conn, Relation::IntakeReceiver, fields.receiver_id)
}

/// Checks every foreign key of a processing record.
fn ensure_processing_references<C: PersistenceBackend>(
    conn: &mut C,
    fields: &ProcessingFields,
) -> Result<(), PersistenceError> {
    ensure_reference(conn, Relation::ProcessingIntake, fields.intake_id)?;
    ensure_reference(conn, Relation::ProcessingEmployee, fields.employee_id)
}

/// Checks every foreign key of a sale.
fn ensure_sale_references<C: PersistenceBackend>(
    conn: &mut C,
    fields: &SaleFields,
) -> Result<(), PersistenceError> {
    ensure_reference(conn, Relation::SaleMaterial, fields.material_id)?;
    ensure_reference(conn, Relation::SaleSeller, fields.seller_id)
}

backend_fn! {
/// Records an intake. `received_at` is set to the current UTC time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The intake fields
///
/// # Returns
///
/// The generated `intake_id`.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - A referenced material, center, donor or receiver does not exist
/// - The database write fails
pub fn create_intake(conn: &mut _, fields: &IntakeFields) -> Result<i64, PersistenceError> {
    let fields: IntakeFields = validate_intake_fields(fields)?;
    let quantity_centi_kg: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "quantity_kg", fields.quantity_kg)?;
    let received_at: String = format_timestamp(now_utc())?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_intake_references(conn, &fields)?;

        diesel::insert_into(material_intakes::table)
            .values((
                material_intakes::material_id.eq(fields.material_id),
                material_intakes::center_id.eq(fields.center_id),
                material_intakes::donor_id.eq(fields.donor_id),
                material_intakes::receiver_id.eq(fields.receiver_id),
                material_intakes::received_at.eq(&received_at),
                material_intakes::quantity_centi_kg.eq(quantity_centi_kg),
                material_intakes::material_condition.eq(&fields.material_condition),
                material_intakes::notes.eq(&fields.notes),
            ))
            .execute(conn)?;

        let intake_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            intake_id,
            material_id = fields.material_id,
            center_id = fields.center_id,
            %received_at,
            "Recorded intake"
        );

        Ok(intake_id)
    })
}
}

backend_fn! {
/// Replaces the caller-supplied fields of an existing intake.
///
/// `received_at` is never changed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `intake_id` - The intake to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The intake does not exist
/// - A referenced material, center, donor or receiver does not exist
/// - The database write fails
pub fn update_intake(
    conn: &mut _,
    intake_id: i64,
    fields: &IntakeFields,
) -> Result<(), PersistenceError> {
    let fields: IntakeFields = validate_intake_fields(fields)?;
    let quantity_centi_kg: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "quantity_kg", fields.quantity_kg)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::MaterialIntake, intake_id)?;
        ensure_intake_references(conn, &fields)?;

        diesel::update(material_intakes::table)
            .filter(material_intakes::intake_id.eq(intake_id))
            .set((
                material_intakes::material_id.eq(fields.material_id),
                material_intakes::center_id.eq(fields.center_id),
                material_intakes::donor_id.eq(fields.donor_id),
                material_intakes::receiver_id.eq(fields.receiver_id),
                material_intakes::quantity_centi_kg.eq(quantity_centi_kg),
                material_intakes::material_condition.eq(&fields.material_condition),
                material_intakes::notes.eq(&fields.notes),
            ))
            .execute(conn)?;

        info!(intake_id, "Updated intake");

        Ok(())
    })
}
}

backend_fn! {
/// Records a processing step performed on an intake.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The processing fields
///
/// # Returns
///
/// The generated `processing_id`.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation, including an end before the start
/// - The referenced intake or employee does not exist
/// - The database write fails
pub fn create_processing(
    conn: &mut _,
    fields: &ProcessingFields,
) -> Result<i64, PersistenceError> {
    let fields: ProcessingFields = validate_processing_fields(fields)?;
    let started_at: String = format_timestamp(fields.started_at)?;
    let ended_at: Option<String> = fields.ended_at.map(format_timestamp).transpose()?;
    let resulting_quantity_centi_kg: i64 = to_minor_units(
        DecimalSpec::AMOUNT,
        "resulting_quantity_kg",
        fields.resulting_quantity_kg,
    )?;
    let processing_cost_cents: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "processing_cost", fields.processing_cost)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_processing_references(conn, &fields)?;

        diesel::insert_into(material_processings::table)
            .values((
                material_processings::intake_id.eq(fields.intake_id),
                material_processings::employee_id.eq(fields.employee_id),
                material_processings::started_at.eq(&started_at),
                material_processings::ended_at.eq(&ended_at),
                material_processings::process_type.eq(&fields.process_type),
                material_processings::resulting_quantity_centi_kg.eq(resulting_quantity_centi_kg),
                material_processings::byproducts.eq(&fields.byproducts),
                material_processings::processing_cost_cents.eq(processing_cost_cents),
            ))
            .execute(conn)?;

        let processing_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            processing_id,
            intake_id = fields.intake_id,
            process_type = %fields.process_type,
            "Recorded processing"
        );

        Ok(processing_id)
    })
}
}

backend_fn! {
/// Replaces every field of an existing processing record.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `processing_id` - The processing record to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation, including an end before the start
/// - The processing record does not exist
/// - The referenced intake or employee does not exist
/// - The database write fails
pub fn update_processing(
    conn: &mut _,
    processing_id: i64,
    fields: &ProcessingFields,
) -> Result<(), PersistenceError> {
    let fields: ProcessingFields = validate_processing_fields(fields)?;
    let started_at: String = format_timestamp(fields.started_at)?;
    let ended_at: Option<String> = fields.ended_at.map(format_timestamp).transpose()?;
    let resulting_quantity_centi_kg: i64 = to_minor_units(
        DecimalSpec::AMOUNT,
        "resulting_quantity_kg",
        fields.resulting_quantity_kg,
    )?;
    let processing_cost_cents: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "processing_cost", fields.processing_cost)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::MaterialProcessing, processing_id)?;
        ensure_processing_references(conn, &fields)?;

        diesel::update(material_processings::table)
            .filter(material_processings::processing_id.eq(processing_id))
            .set((
                material_processings::intake_id.eq(fields.intake_id),
                material_processings::employee_id.eq(fields.employee_id),
                material_processings::started_at.eq(&started_at),
                material_processings::ended_at.eq(&ended_at),
                material_processings::process_type.eq(&fields.process_type),
                material_processings::resulting_quantity_centi_kg.eq(resulting_quantity_centi_kg),
                material_processings::byproducts.eq(&fields.byproducts),
                material_processings::processing_cost_cents.eq(processing_cost_cents),
            ))
            .execute(conn)?;

        info!(processing_id, "Updated processing");

        Ok(())
    })
}
}

backend_fn! {
/// Records a sale. `sold_at` is set to the current UTC time.
///
/// `total_amount` is stored exactly as supplied.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The sale fields
///
/// # Returns
///
/// The generated `sale_id`.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The referenced material or seller does not exist
/// - The database write fails
pub fn create_sale(conn: &mut _, fields: &SaleFields) -> Result<i64, PersistenceError> {
    let fields: SaleFields = validate_sale_fields(fields)?;
    let quantity_sold_centi_kg: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "quantity_sold_kg", fields.quantity_sold_kg)?;
    let unit_price_cents: i64 =
        to_minor_units(DecimalSpec::PRICE, "unit_price", fields.unit_price)?;
    let total_amount_cents: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "total_amount", fields.total_amount)?;
    let sold_at: String = format_timestamp(now_utc())?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_sale_references(conn, &fields)?;

        diesel::insert_into(material_sales::table)
            .values((
                material_sales::material_id.eq(fields.material_id),
                material_sales::seller_id.eq(fields.seller_id),
                material_sales::buyer_id.eq(fields.buyer_id),
                material_sales::sold_at.eq(&sold_at),
                material_sales::quantity_sold_centi_kg.eq(quantity_sold_centi_kg),
                material_sales::unit_price_cents.eq(unit_price_cents),
                material_sales::total_amount_cents.eq(total_amount_cents),
                material_sales::payment_method.eq(&fields.payment_method),
            ))
            .execute(conn)?;

        let sale_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            sale_id,
            material_id = fields.material_id,
            buyer_id = fields.buyer_id,
            "Recorded sale"
        );

        Ok(sale_id)
    })
}
}

backend_fn! {
/// Replaces the caller-supplied fields of an existing sale.
///
/// `sold_at` is never changed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `sale_id` - The sale to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The sale does not exist
/// - The referenced material or seller does not exist
/// - The database write fails
pub fn update_sale(
    conn: &mut _,
    sale_id: i64,
    fields: &SaleFields,
) -> Result<(), PersistenceError> {
    let fields: SaleFields = validate_sale_fields(fields)?;
    let quantity_sold_centi_kg: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "quantity_sold_kg", fields.quantity_sold_kg)?;
    let unit_price_cents: i64 =
        to_minor_units(DecimalSpec::PRICE, "unit_price", fields.unit_price)?;
    let total_amount_cents: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "total_amount", fields.total_amount)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::MaterialSale, sale_id)?;
        ensure_sale_references(conn, &fields)?;

        diesel::update(material_sales::table)
            .filter(material_sales::sale_id.eq(sale_id))
            .set((
                material_sales::material_id.eq(fields.material_id),
                material_sales::seller_id.eq(fields.seller_id),
                material_sales::buyer_id.eq(fields.buyer_id),
                material_sales::quantity_sold_centi_kg.eq(quantity_sold_centi_kg),
                material_sales::unit_price_cents.eq(unit_price_cents),
                material_sales::total_amount_cents.eq(total_amount_cents),
                material_sales::payment_method.eq(&fields.payment_method),
            ))
            .execute(conn)?;

        info!(sale_id, "Updated sale");

        Ok(())
    })
}
}
