// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_audit::AuditEntry;
use talent_domain::ApplicationId;

use crate::data_models::format_timestamp;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Appends an audit entry.
///
/// # Errors
///
/// Returns an error if the details cannot be encoded or the insert fails.
pub fn append_audit_entry(
    conn: &mut SqliteConnection,
    entry: &AuditEntry,
) -> Result<(), PersistenceError> {
    let details: String = serde_json::to_string(&entry.details)?;
    diesel::insert_into(audit_log::table)
        .values((
            audit_log::action.eq(&entry.action),
            audit_log::application_id.eq(entry.application_id.map(ApplicationId::value)),
            audit_log::performed_by.eq(&entry.performed_by),
            audit_log::performed_by_role.eq(&entry.performed_by_role),
            audit_log::details.eq(&details),
            audit_log::timestamp.eq(format_timestamp(entry.timestamp)?),
        ))
        .execute(conn)?;
    Ok(())
}
