// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion queue queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_workflow::IngestionTicket;

use crate::data_models::TicketRow;
use crate::diesel_schema::ingestion_queue;
use crate::error::PersistenceError;

/// Lists unprocessed tickets, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a payload cannot be
/// decoded.
pub fn pending_tickets(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<IngestionTicket>, PersistenceError> {
    let limit: i64 = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows: Vec<TicketRow> = ingestion_queue::table
        .filter(ingestion_queue::processed_at.is_null())
        .order(ingestion_queue::ticket_id.asc())
        .limit(limit)
        .select(TicketRow::as_select())
        .load(conn)?;

    rows.into_iter().map(IngestionTicket::try_from).collect()
}
