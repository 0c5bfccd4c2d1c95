// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_audit::{AuditQuery, AuditRecord};

use crate::data_models::AuditRow;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Reads recent audit entries, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn recent_audit_entries(
    conn: &mut SqliteConnection,
    query: &AuditQuery,
) -> Result<Vec<AuditRecord>, PersistenceError> {
    let limit: i64 = i64::try_from(query.limit).unwrap_or(i64::MAX);
    let mut boxed = audit_log::table.into_boxed();
    if let Some(application_id) = query.application_id {
        boxed = boxed.filter(audit_log::application_id.eq(application_id.value()));
    }

    let rows: Vec<AuditRow> = boxed
        .order(audit_log::audit_id.desc())
        .limit(limit)
        .select(AuditRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AuditRecord::try_from).collect()
}
