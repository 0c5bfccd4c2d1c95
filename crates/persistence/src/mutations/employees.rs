// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{Employee, EmployeeId, EmployeeType};
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{encode_skills, format_optional_timestamp, format_timestamp};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts an employee or replaces the existing record.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let skills: String = encode_skills(&employee.detailed_skills)?;
    let updated_at: Option<String> = format_optional_timestamp(employee.updated_at)?;

    diesel::insert_into(employees::table)
        .values((
            employees::employee_id.eq(employee.employee_id.value()),
            employees::employee_name.eq(&employee.employee_name),
            employees::designation.eq(employee.designation.as_deref()),
            employees::city.eq(employee.city.as_deref()),
            employees::band.eq(employee.band.as_deref()),
            employees::employee_type.eq(employee.employee_type.as_str()),
            employees::detailed_skills.eq(&skills),
            employees::updated_at.eq(updated_at.as_deref()),
        ))
        .on_conflict(employees::employee_id)
        .do_update()
        .set((
            employees::employee_name.eq(&employee.employee_name),
            employees::designation.eq(employee.designation.as_deref()),
            employees::city.eq(employee.city.as_deref()),
            employees::band.eq(employee.band.as_deref()),
            employees::employee_type.eq(employee.employee_type.as_str()),
            employees::detailed_skills.eq(&skills),
            employees::updated_at.eq(updated_at.as_deref()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Sets an employee's classification.
///
/// Returns `Ok(false)` if the employee does not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_employee_type(
    conn: &mut SqliteConnection,
    id: EmployeeId,
    employee_type: EmployeeType,
    updated_at: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::update(employees::table.filter(employees::employee_id.eq(id.value())))
        .set((
            employees::employee_type.eq(employee_type.as_str()),
            employees::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if rows == 1 {
        info!(employee_id = id.value(), employee_type = %employee_type, "Employee reclassified");
    }
    Ok(rows == 1)
}
