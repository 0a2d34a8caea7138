// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donor and employee mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use recycling_center_domain::{
    DonorFields, EmployeeFields, EntityKind, format_date, now_utc, validate_donor_fields,
    validate_employee_fields,
};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{donors, recycling_employees};
use crate::error::PersistenceError;
use crate::mutations::{ensure_exists, ensure_unique};

backend_fn! {
/// Creates a donor. The registration date is set to today (UTC).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The donor fields
///
/// # Returns
///
/// The generated `donor_id`.
///
/// # Errors
///
/// Returns an error if a field fails validation or the database write fails.
pub fn create_donor(conn: &mut _, fields: &DonorFields) -> Result<i64, PersistenceError> {
    let fields: DonorFields = validate_donor_fields(fields)?;
    let registration_date: String = format_date(now_utc().date())?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(donors::table)
            .values((
                donors::name.eq(&fields.name),
                donors::donor_type.eq(&fields.donor_type),
                donors::phone.eq(&fields.phone),
                donors::email.eq(&fields.email),
                donors::address.eq(&fields.address),
                donors::tax_id.eq(&fields.tax_id),
                donors::registration_date.eq(&registration_date),
                donors::is_anonymous.eq(i32::from(fields.is_anonymous)),
            ))
            .execute(conn)?;

        let donor_id: i64 = conn.get_last_insert_rowid()?;

        info!(donor_id, %registration_date, "Created donor");

        Ok(donor_id)
    })
}
}

backend_fn! {
/// Replaces the caller-supplied fields of an existing donor.
///
/// The registration date is never changed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `donor_id` - The donor to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if a field fails validation, the donor does not exist,
/// or the database write fails.
pub fn update_donor(
    conn: &mut _,
    donor_id: i64,
    fields: &DonorFields,
) -> Result<(), PersistenceError> {
    let fields: DonorFields = validate_donor_fields(fields)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::Donor, donor_id)?;

        diesel::update(donors::table)
            .filter(donors::donor_id.eq(donor_id))
            .set((
                donors::name.eq(&fields.name),
                donors::donor_type.eq(&fields.donor_type),
                donors::phone.eq(&fields.phone),
                donors::email.eq(&fields.email),
                donors::address.eq(&fields.address),
                donors::tax_id.eq(&fields.tax_id),
                donors::is_anonymous.eq(i32::from(fields.is_anonymous)),
            ))
            .execute(conn)?;

        info!(donor_id, "Updated donor");

        Ok(())
    })
}
}

backend_fn! {
/// Creates an employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The employee fields
///
/// # Returns
///
/// The generated `employee_id`.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The national ID is already in use
/// - The database write fails
pub fn create_employee(conn: &mut _, fields: &EmployeeFields) -> Result<i64, PersistenceError> {
    let fields: EmployeeFields = validate_employee_fields(fields)?;
    let hire_date: String = format_date(fields.hire_date)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_unique(
            conn,
            EntityKind::RecyclingEmployee,
            "national_id",
            &fields.national_id,
            None,
        )?;

        diesel::insert_into(recycling_employees::table)
            .values((
                recycling_employees::first_name.eq(&fields.first_name),
                recycling_employees::last_name.eq(&fields.last_name),
                recycling_employees::national_id.eq(&fields.national_id),
                recycling_employees::hire_date.eq(&hire_date),
                recycling_employees::role.eq(&fields.role),
                recycling_employees::shift.eq(&fields.shift),
                recycling_employees::phone.eq(&fields.phone),
                recycling_employees::email.eq(&fields.email),
                recycling_employees::certifications.eq(&fields.certifications),
            ))
            .execute(conn)?;

        let employee_id: i64 = conn.get_last_insert_rowid()?;

        info!(employee_id, role = %fields.role, "Created employee");

        Ok(employee_id)
    })
}
}

backend_fn! {
/// Replaces every field of an existing employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee to update
/// * `fields` - The new field values
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The employee does not exist
/// - Another employee already uses the national ID
/// - The database write fails
pub fn update_employee(
    conn: &mut _,
    employee_id: i64,
    fields: &EmployeeFields,
) -> Result<(), PersistenceError> {
    let fields: EmployeeFields = validate_employee_fields(fields)?;
    let hire_date: String = format_date(fields.hire_date)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        ensure_exists(conn, EntityKind::RecyclingEmployee, employee_id)?;
        ensure_unique(
            conn,
            EntityKind::RecyclingEmployee,
            "national_id",
            &fields.national_id,
            Some(employee_id),
        )?;

        diesel::update(recycling_employees::table)
            .filter(recycling_employees::employee_id.eq(employee_id))
            .set((
                recycling_employees::first_name.eq(&fields.first_name),
                recycling_employees::last_name.eq(&fields.last_name),
                recycling_employees::national_id.eq(&fields.national_id),
                recycling_employees::hire_date.eq(&hire_date),
                recycling_employees::role.eq(&fields.role),
                recycling_employees::shift.eq(&fields.shift),
                recycling_employees::phone.eq(&fields.phone),
                recycling_employees::email.eq(&fields.email),
                recycling_employees::certifications.eq(&fields.certifications),
            ))
            .execute(conn)?;

        info!(employee_id, "Updated employee");

        Ok(())
    })
}
}
