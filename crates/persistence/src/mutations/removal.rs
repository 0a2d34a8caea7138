// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Protected deletes.
//!
//! Nothing cascades. A row is removed only when no row on the source side of
//! any dependent relation still points at it.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{EntityKind, Relation};
use tracing::info;

use crate::diesel_schema::{
    collection_centers, donors, material_intakes, material_processings, material_sales,
    recyclable_materials, recycling_employees,
};
use crate::error::PersistenceError;
use crate::mutations::{ensure_exists, ensure_unreferenced};

backend_fn! {
/// Deletes a row of `kind` unless other rows reference it.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - The entity kind
/// * `id` - The primary key of the row to delete
/// * `dependents` - The relations whose source rows block the delete
///
/// # Errors
///
/// Returns an error if:
/// - The row does not exist
/// - Any dependent row references it
/// - The database write fails
pub fn delete_record(
    conn: &mut _,
    kind: EntityKind,
    id: i64,
    dependents: &[Relation],
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, kind, id)?;
        ensure_unreferenced(conn, kind, id, dependents)?;

        let rows_affected: usize = match kind {
            EntityKind::RecyclableMaterial => diesel::delete(
                recyclable_materials::table.filter(recyclable_materials::material_id.eq(id)),
            )
            .execute(conn)?,
            EntityKind::CollectionCenter => diesel::delete(
                collection_centers::table.filter(collection_centers::center_id.eq(id)),
            )
            .execute(conn)?,
            EntityKind::Donor => {
                diesel::delete(donors::table.filter(donors::donor_id.eq(id))).execute(conn)?
            }
            EntityKind::RecyclingEmployee => diesel::delete(
                recycling_employees::table.filter(recycling_employees::employee_id.eq(id)),
            )
            .execute(conn)?,
            EntityKind::MaterialIntake => diesel::delete(
                material_intakes::table.filter(material_intakes::intake_id.eq(id)),
            )
            .execute(conn)?,
            EntityKind::MaterialProcessing => diesel::delete(
                material_processings::table.filter(material_processings::processing_id.eq(id)),
            )
            .execute(conn)?,
            EntityKind::MaterialSale => {
                diesel::delete(material_sales::table.filter(material_sales::sale_id.eq(id)))
                    .execute(conn)?
            }
        };

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound { entity: kind, id });
        }

        info!(%kind, id, "Deleted record");

        Ok(())
    })
}
}
