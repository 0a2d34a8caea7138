// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Intake, processing and sale queries.
//!
//! Listings accept a filter whose unset fields match everything, which
//! covers the reverse lookups from a material, center, donor, employee or
//! intake to the operations that reference it.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{EntityKind, MaterialIntake, MaterialProcessing, MaterialSale};
use tracing::debug;

use crate::data_models::{
    IntakeFilter, IntakeRow, ProcessingFilter, ProcessingRow, SaleFilter, SaleRow,
};
use crate::diesel_schema::{
    material_intakes, material_processings, material_sales, recyclable_materials,
};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an intake by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `intake_id` - The intake ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such intake exists, or an
/// error if the query fails or the stored timestamp is malformed.
pub fn get_intake(conn: &mut _, intake_id: i64) -> Result<MaterialIntake, PersistenceError> {
    debug!(intake_id, "Looking up intake");

    let row: IntakeRow = material_intakes::table
        .filter(material_intakes::intake_id.eq(intake_id))
        .select(IntakeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::MaterialIntake,
            id: intake_id,
        })?;

    row.into_domain()
}
}

backend_fn! {
/// Lists intakes matching `filter`, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_intakes(
    conn: &mut _,
    filter: IntakeFilter,
) -> Result<Vec<MaterialIntake>, PersistenceError> {
    let mut query = material_intakes::table
        .select(IntakeRow::as_select())
        .into_boxed();

    if let Some(id) = filter.material_id {
        query = query.filter(material_intakes::material_id.eq(id));
    }
    if let Some(id) = filter.center_id {
        query = query.filter(material_intakes::center_id.eq(id));
    }
    if let Some(id) = filter.donor_id {
        query = query.filter(material_intakes::donor_id.eq(id));
    }
    if let Some(id) = filter.receiver_id {
        query = query.filter(material_intakes::receiver_id.eq(id));
    }

    let rows: Vec<IntakeRow> = query
        .order(material_intakes::intake_id.asc())
        .load(conn)?;

    rows.into_iter().map(IntakeRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves a processing record by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `processing_id` - The processing ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such record exists, or an
/// error if the query fails or a stored timestamp is malformed.
pub fn get_processing(
    conn: &mut _,
    processing_id: i64,
) -> Result<MaterialProcessing, PersistenceError> {
    debug!(processing_id, "Looking up processing");

    let row: ProcessingRow = material_processings::table
        .filter(material_processings::processing_id.eq(processing_id))
        .select(ProcessingRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::MaterialProcessing,
            id: processing_id,
        })?;

    row.into_domain()
}
}

backend_fn! {
/// Lists processing records matching `filter`, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_processings(
    conn: &mut _,
    filter: ProcessingFilter,
) -> Result<Vec<MaterialProcessing>, PersistenceError> {
    let mut query = material_processings::table
        .select(ProcessingRow::as_select())
        .into_boxed();

    if let Some(id) = filter.intake_id {
        query = query.filter(material_processings::intake_id.eq(id));
    }
    if let Some(id) = filter.employee_id {
        query = query.filter(material_processings::employee_id.eq(id));
    }

    let rows: Vec<ProcessingRow> = query
        .order(material_processings::processing_id.asc())
        .load(conn)?;

    rows.into_iter().map(ProcessingRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves a sale by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `sale_id` - The sale ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such sale exists, or an error
/// if the query fails or the stored timestamp is malformed.
pub fn get_sale(conn: &mut _, sale_id: i64) -> Result<MaterialSale, PersistenceError> {
    debug!(sale_id, "Looking up sale");

    let row: SaleRow = material_sales::table
        .filter(material_sales::sale_id.eq(sale_id))
        .select(SaleRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::MaterialSale,
            id: sale_id,
        })?;

    row.into_domain()
}
}

backend_fn! {
/// Lists sales matching `filter`, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_sales(
    conn: &mut _,
    filter: SaleFilter,
) -> Result<Vec<MaterialSale>, PersistenceError> {
    let mut query = material_sales::table
        .select(SaleRow::as_select())
        .into_boxed();

    if let Some(id) = filter.material_id {
        query = query.filter(material_sales::material_id.eq(id));
    }
    if let Some(id) = filter.seller_id {
        query = query.filter(material_sales::seller_id.eq(id));
    }
    if let Some(id) = filter.buyer_id {
        query = query.filter(material_sales::buyer_id.eq(id));
    }

    let rows: Vec<SaleRow> = query
        .order(material_sales::sale_id.asc())
        .load(conn)?;

    rows.into_iter().map(SaleRow::into_domain).collect()
}
}

backend_fn! {
/// Builds the display label of a sale, joining its material for the name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `sale_id` - The sale ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such sale exists, or an error
/// if the query fails.
pub fn sale_label(conn: &mut _, sale_id: i64) -> Result<String, PersistenceError> {
    let (row, material_name): (SaleRow, String) = material_sales::table
        .inner_join(
            recyclable_materials::table
                .on(material_sales::material_id.eq(recyclable_materials::material_id)),
        )
        .filter(material_sales::sale_id.eq(sale_id))
        .select((SaleRow::as_select(), recyclable_materials::name))
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::MaterialSale,
            id: sale_id,
        })?;

    Ok(row.into_domain()?.label(&material_name))
}
}
