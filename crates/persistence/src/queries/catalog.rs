// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Material and collection center queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{CollectionCenter, EntityKind, RecyclableMaterial};
use tracing::debug;

use crate::data_models::{CenterRow, MaterialRow};
use crate::diesel_schema::{collection_centers, recyclable_materials};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a material by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `material_id` - The material ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such material exists, or an
/// error if the query fails.
pub fn get_material(
    conn: &mut _,
    material_id: i64,
) -> Result<RecyclableMaterial, PersistenceError> {
    debug!(material_id, "Looking up material");

    let row: Option<MaterialRow> = recyclable_materials::table
        .filter(recyclable_materials::material_id.eq(material_id))
        .select(MaterialRow::as_select())
        .first(conn)
        .optional()?;

    row.map(MaterialRow::into_domain)
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::RecyclableMaterial,
            id: material_id,
        })
}
}

backend_fn! {
/// Lists all materials ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_materials(conn: &mut _) -> Result<Vec<RecyclableMaterial>, PersistenceError> {
    let rows: Vec<MaterialRow> = recyclable_materials::table
        .order(recyclable_materials::material_id.asc())
        .select(MaterialRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MaterialRow::into_domain).collect())
}
}

backend_fn! {
/// Retrieves a collection center by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `center_id` - The center ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such center exists, or an
/// error if the query fails.
pub fn get_center(conn: &mut _, center_id: i64) -> Result<CollectionCenter, PersistenceError> {
    debug!(center_id, "Looking up collection center");

    let row: Option<CenterRow> = collection_centers::table
        .filter(collection_centers::center_id.eq(center_id))
        .select(CenterRow::as_select())
        .first(conn)
        .optional()?;

    row.map(CenterRow::into_domain)
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::CollectionCenter,
            id: center_id,
        })
}
}

backend_fn! {
/// Lists all collection centers ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_centers(conn: &mut _) -> Result<Vec<CollectionCenter>, PersistenceError> {
    let rows: Vec<CenterRow> = collection_centers::table
        .order(collection_centers::center_id.asc())
        .select(CenterRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CenterRow::into_domain).collect())
}
}
