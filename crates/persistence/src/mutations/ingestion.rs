// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion queue mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{EmployeeId, ResourceRequestDraft};
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::ingestion_queue;
use crate::error::PersistenceError;

/// Appends a draft to the queue and returns its ticket id.
///
/// # Errors
///
/// Returns an error if the draft cannot be encoded or the insert fails.
pub fn enqueue_resource_request(
    conn: &mut SqliteConnection,
    draft: &ResourceRequestDraft,
    submitted_by: EmployeeId,
    queued_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let payload: String = serde_json::to_string(draft)?;
    let queued_at: String = format_timestamp(queued_at)?;

    conn.immediate_transaction(|conn| {
        diesel::insert_into(ingestion_queue::table)
            .values((
                ingestion_queue::resource_request_id.eq(draft.resource_request_id.as_str()),
                ingestion_queue::payload.eq(&payload),
                ingestion_queue::submitted_by.eq(submitted_by.value()),
                ingestion_queue::queued_at.eq(&queued_at),
            ))
            .execute(conn)?;
        let ticket_id: i64 = conn.get_last_insert_rowid()?;
        debug!(ticket_id, resource_request_id = %draft.resource_request_id, "Enqueued resource request");
        Ok(ticket_id)
    })
}

/// Marks a ticket processed.
///
/// # Errors
///
/// Returns `NotFound` if the ticket does not exist.
pub fn mark_ticket_processed(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    processed_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(
        ingestion_queue::table.filter(ingestion_queue::ticket_id.eq(ticket_id)),
    )
    .set(ingestion_queue::processed_at.eq(format_timestamp(processed_at)?))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("Ingestion ticket {ticket_id}")));
    }
    Ok(())
}
