// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donor and employee queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{Donor, EntityKind, RecyclingEmployee};
use tracing::debug;

use crate::data_models::{DonorRow, EmployeeRow};
use crate::diesel_schema::{donors, recycling_employees};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a donor by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `donor_id` - The donor ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such donor exists, or an error
/// if the query fails or the stored date is malformed.
pub fn get_donor(conn: &mut _, donor_id: i64) -> Result<Donor, PersistenceError> {
    debug!(donor_id, "Looking up donor");

    let row: DonorRow = donors::table
        .filter(donors::donor_id.eq(donor_id))
        .select(DonorRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::Donor,
            id: donor_id,
        })?;

    row.into_domain()
}
}

backend_fn! {
/// Lists all donors ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_donors(conn: &mut _) -> Result<Vec<Donor>, PersistenceError> {
    let rows: Vec<DonorRow> = donors::table
        .order(donors::donor_id.asc())
        .select(DonorRow::as_select())
        .load(conn)?;

    rows.into_iter().map(DonorRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves an employee by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such employee exists, or an
/// error if the query fails or the stored date is malformed.
pub fn get_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<RecyclingEmployee, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    let row: EmployeeRow = recycling_employees::table
        .filter(recycling_employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: EntityKind::RecyclingEmployee,
            id: employee_id,
        })?;

    row.into_domain()
}
}

backend_fn! {
/// Lists all employees ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_employees(conn: &mut _) -> Result<Vec<RecyclingEmployee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = recycling_employees::table
        .order(recycling_employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(EmployeeRow::into_domain).collect()
}
}
