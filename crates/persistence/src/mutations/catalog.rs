// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material and collection center mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{
    CenterFields, DecimalSpec, EntityKind, MaterialFields, validate_center_fields,
    validate_material_fields,
};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{to_minor_units, to_optional_minor_units};
use crate::diesel_schema::{collection_centers, recyclable_materials};
use crate::error::PersistenceError;
use crate::mutations::{ensure_exists, ensure_unique};

backend_fn! {
/// Creates a material.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The material fields
///
/// # Returns
///
/// The generated `material_id`.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The identification code is already in use
/// - The database write fails
pub fn create_material(conn: &mut _, fields: &MaterialFields) -> Result<i64, PersistenceError> {
    let fields: MaterialFields = validate_material_fields(fields)?;
    let price_per_kg_cents: i64 =
        to_minor_units(DecimalSpec::PRICE, "price_per_kg", fields.price_per_kg)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_unique(
            conn,
            EntityKind::RecyclableMaterial,
            "identification_code",
            &fields.identification_code,
            None,
        )?;

        diesel::insert_into(recyclable_materials::table)
            .values((
                recyclable_materials::name.eq(&fields.name),
                recyclable_materials::description.eq(&fields.description),
                recyclable_materials::category.eq(&fields.category),
                recyclable_materials::price_per_kg_cents.eq(price_per_kg_cents),
                recyclable_materials::unit_of_measure.eq(&fields.unit_of_measure),
                recyclable_materials::is_toxic.eq(i32::from(fields.is_toxic)),
                recyclable_materials::recommended_drop_off.eq(&fields.recommended_drop_off),
                recyclable_materials::identification_code.eq(&fields.identification_code),
            ))
            .execute(conn)?;

        let material_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            material_id,
            identification_code = %fields.identification_code,
            "Created material"
        );

        Ok(material_id)
    })
}
}

backend_fn! {
/// Replaces every field of an existing material.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `material_id` - The material to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The material does not exist
/// - Another material already uses the identification code
/// - The database write fails
pub fn update_material(
    conn: &mut _,
    material_id: i64,
    fields: &MaterialFields,
) -> Result<(), PersistenceError> {
    let fields: MaterialFields = validate_material_fields(fields)?;
    let price_per_kg_cents: i64 =
        to_minor_units(DecimalSpec::PRICE, "price_per_kg", fields.price_per_kg)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::RecyclableMaterial, material_id)?;
        ensure_unique(
            conn,
            EntityKind::RecyclableMaterial,
            "identification_code",
            &fields.identification_code,
            Some(material_id),
        )?;

        diesel::update(recyclable_materials::table)
            .filter(recyclable_materials::material_id.eq(material_id))
            .set((
                recyclable_materials::name.eq(&fields.name),
                recyclable_materials::description.eq(&fields.description),
                recyclable_materials::category.eq(&fields.category),
                recyclable_materials::price_per_kg_cents.eq(price_per_kg_cents),
                recyclable_materials::unit_of_measure.eq(&fields.unit_of_measure),
                recyclable_materials::is_toxic.eq(i32::from(fields.is_toxic)),
                recyclable_materials::recommended_drop_off.eq(&fields.recommended_drop_off),
                recyclable_materials::identification_code.eq(&fields.identification_code),
            ))
            .execute(conn)?;

        info!(material_id, "Updated material");

        Ok(())
    })
}
}

backend_fn! {
/// Creates a collection center.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The center fields
///
/// # Returns
///
/// The generated `center_id`.
///
/// # Errors
///
/// Returns an error if a field fails validation or the database write fails.
pub fn create_center(conn: &mut _, fields: &CenterFields) -> Result<i64, PersistenceError> {
    let fields: CenterFields = validate_center_fields(fields)?;
    let capacity_centi_tonnes: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "capacity_tonnes", fields.capacity_tonnes)?;
    let latitude_micro: Option<i64> =
        to_optional_minor_units(DecimalSpec::COORDINATE, "latitude", fields.latitude)?;
    let longitude_micro: Option<i64> =
        to_optional_minor_units(DecimalSpec::COORDINATE, "longitude", fields.longitude)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(collection_centers::table)
            .values((
                collection_centers::name.eq(&fields.name),
                collection_centers::address.eq(&fields.address),
                collection_centers::phone.eq(&fields.phone),
                collection_centers::email.eq(&fields.email),
                collection_centers::opening_hours.eq(&fields.opening_hours),
                collection_centers::capacity_centi_tonnes.eq(capacity_centi_tonnes),
                collection_centers::latitude_micro.eq(latitude_micro),
                collection_centers::longitude_micro.eq(longitude_micro),
            ))
            .execute(conn)?;

        let center_id: i64 = conn.get_last_insert_rowid()?;

        info!(center_id, name = %fields.name, "Created collection center");

        Ok(center_id)
    })
}
}

backend_fn! {
/// Replaces every field of an existing collection center.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `center_id` - The center to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if a field fails validation, the center does not exist,
/// or the database write fails.
pub fn update_center(
    conn: &mut _,
    center_id: i64,
    fields: &CenterFields,
) -> Result<(), PersistenceError> {
    let fields: CenterFields = validate_center_fields(fields)?;
    let capacity_centi_tonnes: i64 =
        to_minor_units(DecimalSpec::AMOUNT, "capacity_tonnes", fields.capacity_tonnes)?;
    let latitude_micro: Option<i64> =
        to_optional_minor_units(DecimalSpec::COORDINATE, "latitude", fields.latitude)?;
    let longitude_micro: Option<i64> =
        to_optional_minor_units(DecimalSpec::COORDINATE, "longitude", fields.longitude)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::CollectionCenter, center_id)?;

        diesel::update(collection_centers::table)
            .filter(collection_centers::center_id.eq(center_id))
            .set((
                collection_centers::name.eq(&fields.name),
                collection_centers::address.eq(&fields.address),
                collection_centers::phone.eq(&fields.phone),
                collection_centers::email.eq(&fields.email),
                collection_centers::opening_hours.eq(&fields.opening_hours),
                collection_centers::capacity_centi_tonnes.eq(capacity_centi_tonnes),
                collection_centers::latitude_micro.eq(latitude_micro),
                collection_centers::longitude_micro.eq(longitude_micro),
            ))
            .execute(conn)?;

        info!(center_id, "Updated collection center");

        Ok(())
    })
}
}
