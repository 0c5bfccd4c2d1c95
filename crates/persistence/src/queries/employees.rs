// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{Employee, EmployeeId};

use crate::data_models::EmployeeRow;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn find_employee(
    conn: &mut SqliteConnection,
    id: EmployeeId,
) -> Result<Option<Employee>, PersistenceError> {
    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::employee_id.eq(id.value()))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Employee::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
