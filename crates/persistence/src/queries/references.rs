// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Existence, reference and row-count queries.
//!
//! These back the delete protection and foreign-key pre-checks, and the
//! per-table counts reported by the CLI. They are reached from mutation
//! bodies through `PersistenceBackend`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use recycling_center_domain::{EntityKind, Relation};
use tracing::debug;

use crate::diesel_schema::{
    collection_centers, donors, material_intakes, material_processings, material_sales,
    recyclable_materials, recycling_employees,
};
use crate::error::PersistenceError;

backend_fn! {
/// Checks whether a row of `kind` with the given primary key exists.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - The entity kind
/// * `id` - The primary key value
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn row_exists(conn: &mut _, kind: EntityKind, id: i64) -> Result<bool, PersistenceError> {
    let count: i64 = match kind {
        EntityKind::RecyclableMaterial => recyclable_materials::table
            .filter(recyclable_materials::material_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::CollectionCenter => collection_centers::table
            .filter(collection_centers::center_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::Donor => donors::table
            .filter(donors::donor_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::RecyclingEmployee => recycling_employees::table
            .filter(recycling_employees::employee_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::MaterialIntake => material_intakes::table
            .filter(material_intakes::intake_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::MaterialProcessing => material_processings::table
            .filter(material_processings::processing_id.eq(id))
            .count()
            .get_result(conn)?,
        EntityKind::MaterialSale => material_sales::table
            .filter(material_sales::sale_id.eq(id))
            .count()
            .get_result(conn)?,
    };

    Ok(count > 0)
}
}

backend_fn! {
/// Counts the rows on the source side of `relation` whose foreign key is `id`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `relation` - The relation to follow backwards
/// * `id` - The primary key of the referenced row
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_references(
    conn: &mut _,
    relation: Relation,
    id: i64,
) -> Result<i64, PersistenceError> {
    let count: i64 = match relation {
        Relation::IntakeMaterial => material_intakes::table
            .filter(material_intakes::material_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::IntakeCenter => material_intakes::table
            .filter(material_intakes::center_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::IntakeDonor => material_intakes::table
            .filter(material_intakes::donor_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::IntakeReceiver => material_intakes::table
            .filter(material_intakes::receiver_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::ProcessingIntake => material_processings::table
            .filter(material_processings::intake_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::ProcessingEmployee => material_processings::table
            .filter(material_processings::employee_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::SaleMaterial => material_sales::table
            .filter(material_sales::material_id.eq(id))
            .count()
            .get_result(conn)?,
        Relation::SaleSeller => material_sales::table
            .filter(material_sales::seller_id.eq(id))
            .count()
            .get_result(conn)?,
    };

    debug!(%relation, id, count, "Counted referencing rows");

    Ok(count)
}
}

backend_fn! {
/// Counts all rows stored for `kind`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - The entity kind
///
/// # Errors
///
/// Returns an error if the query fails or the count cannot be converted.
pub fn count_rows(conn: &mut _, kind: EntityKind) -> Result<usize, PersistenceError> {
    let count: i64 = match kind {
        EntityKind::RecyclableMaterial => recyclable_materials::table.count().get_result(conn)?,
        EntityKind::CollectionCenter => collection_centers::table.count().get_result(conn)?,
        EntityKind::Donor => donors::table.count().get_result(conn)?,
        EntityKind::RecyclingEmployee => recycling_employees::table.count().get_result(conn)?,
        EntityKind::MaterialIntake => material_intakes::table.count().get_result(conn)?,
        EntityKind::MaterialProcessing => material_processings::table.count().get_result(conn)?,
        EntityKind::MaterialSale => material_sales::table.count().get_result(conn)?,
    };

    count
        .to_usize()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}
}

backend_fn! {
/// Checks if a unique column already holds `value`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - The entity kind
/// * `field` - The unique column name
/// * `value` - The candidate value
/// * `exclude_id` - Optional row ID to exclude from the check (for updates)
///
/// # Errors
///
/// Returns an error if the query fails or `field` is not a unique column of `kind`.
pub fn unique_value_exists(
    conn: &mut _,
    kind: EntityKind,
    field: &str,
    value: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let count: i64 = match (kind, field) {
        (EntityKind::RecyclableMaterial, "identification_code") => {
            let mut query = recyclable_materials::table
                .filter(recyclable_materials::identification_code.eq(value))
                .into_boxed();

            if let Some(id) = exclude_id {
                query = query.filter(recyclable_materials::material_id.ne(id));
            }

            query.count().get_result::<i64>(conn)?
        }
        (EntityKind::RecyclingEmployee, "national_id") => {
            let mut query = recycling_employees::table
                .filter(recycling_employees::national_id.eq(value))
                .into_boxed();

            if let Some(id) = exclude_id {
                query = query.filter(recycling_employees::employee_id.ne(id));
            }

            query.count().get_result::<i64>(conn)?
        }
        _ => {
            return Err(PersistenceError::QueryFailed(format!(
                "{kind} has no unique column '{field}'"
            )));
        }
    };

    Ok(count > 0)
}
}
