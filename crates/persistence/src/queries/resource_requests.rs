// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{Ownership, ResourceRequest, ResourceRequestId};

use crate::data_models::ResourceRequestRow;
use crate::diesel_schema::resource_requests;
use crate::error::PersistenceError;

/// Retrieves a resource request by business key.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the resource request is not found.
pub fn find_resource_request(
    conn: &mut SqliteConnection,
    id: &ResourceRequestId,
) -> Result<Option<ResourceRequest>, PersistenceError> {
    let result: Result<ResourceRequestRow, diesel::result::Error> = resource_requests::table
        .filter(resource_requests::resource_request_id.eq(id.as_str()))
        .select(ResourceRequestRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ResourceRequest::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the resource requests owned through one column, ordered by key.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn resource_requests_owned_by(
    conn: &mut SqliteConnection,
    owner: Ownership,
) -> Result<Vec<ResourceRequest>, PersistenceError> {
    let rows: Vec<ResourceRequestRow> = match owner {
        Ownership::HiringManager(id) => resource_requests::table
            .filter(resource_requests::hm_id.eq(id.value()))
            .order(resource_requests::resource_request_id.asc())
            .select(ResourceRequestRow::as_select())
            .load(conn)?,
        Ownership::WorkforceManager(id) => resource_requests::table
            .filter(resource_requests::wfm_id.eq(id.value()))
            .order(resource_requests::resource_request_id.asc())
            .select(ResourceRequestRow::as_select())
            .load(conn)?,
    };
    rows.into_iter().map(ResourceRequest::try_from).collect()
}

/// Lists every resource request id, ordered by key.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored key is blank.
pub fn resource_request_ids(
    conn: &mut SqliteConnection,
) -> Result<Vec<ResourceRequestId>, PersistenceError> {
    let ids: Vec<String> = resource_requests::table
        .select(resource_requests::resource_request_id)
        .order(resource_requests::resource_request_id.asc())
        .load(conn)?;
    ids.iter()
        .map(|id| {
            ResourceRequestId::new(id)
                .map_err(|e| PersistenceError::invalid_row("resource_requests", e))
        })
        .collect()
}
