// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource request mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{
    EmployeeId, PipelineCounters, ResourceRequest, ResourceRequestChange, ResourceRequestId,
};
use talent_workflow::ModifyOutcome;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{encode_counter, encode_skills, format_optional_timestamp, format_timestamp};
use crate::diesel_schema::resource_requests;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a resource request.
///
/// # Errors
///
/// Returns `UniqueViolation` if the business key already exists.
pub fn insert_resource_request(
    conn: &mut SqliteConnection,
    rr: &ResourceRequest,
) -> Result<(), PersistenceError> {
    let counters: &PipelineCounters = &rr.counters;
    diesel::insert_into(resource_requests::table)
        .values((
            resource_requests::resource_request_id.eq(rr.resource_request_id.as_str()),
            resource_requests::project_name.eq(&rr.project_name),
            resource_requests::ust_role.eq(&rr.ust_role),
            resource_requests::city.eq(&rr.city),
            resource_requests::country.eq(&rr.country),
            resource_requests::job_grade.eq(&rr.job_grade),
            resource_requests::account_name.eq(&rr.account_name),
            resource_requests::job_description.eq(rr.job_description.as_deref()),
            resource_requests::priority.eq(rr.priority.as_str()),
            resource_requests::hm_id.eq(rr.hm_id.value()),
            resource_requests::wfm_id.eq(rr.wfm_id.value()),
            resource_requests::flag.eq(i32::from(rr.flag)),
            resource_requests::mandatory_skills.eq(encode_skills(&rr.mandatory_skills)?),
            resource_requests::optional_skills.eq(encode_skills(&rr.optional_skills)?),
            resource_requests::resources_in_propose.eq(encode_counter(counters.resources_in_propose)?),
            resource_requests::resources_in_internal_interview
                .eq(encode_counter(counters.resources_in_internal_interview)?),
            resource_requests::resources_in_customer_interview
                .eq(encode_counter(counters.resources_in_customer_interview)?),
            resource_requests::resources_in_hm_check
                .eq(encode_counter(counters.resources_in_hm_check)?),
            resource_requests::resources_in_allocated
                .eq(encode_counter(counters.resources_in_allocated)?),
            resource_requests::resources_in_reject.eq(encode_counter(counters.resources_in_reject)?),
            resource_requests::resources_in_not_allocated
                .eq(encode_counter(counters.resources_in_not_allocated)?),
            resource_requests::resources_in_accept.eq(encode_counter(counters.resources_in_accept)?),
            resource_requests::last_updated.eq(format_optional_timestamp(rr.last_updated)?),
            resource_requests::last_updated_by.eq(rr.last_updated_by.as_deref()),
        ))
        .execute(conn)?;

    info!(resource_request_id = %rr.resource_request_id, "Inserted resource request");
    Ok(())
}

/// Overwrites every pipeline counter and the stats metadata.
///
/// Returns `Ok(false)` if the resource request does not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn write_pipeline_counters(
    conn: &mut SqliteConnection,
    id: &ResourceRequestId,
    counters: &PipelineCounters,
    updated_at: OffsetDateTime,
    updated_by: &str,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::update(
        resource_requests::table.filter(resource_requests::resource_request_id.eq(id.as_str())),
    )
    .set((
        resource_requests::resources_in_propose.eq(encode_counter(counters.resources_in_propose)?),
        resource_requests::resources_in_internal_interview
            .eq(encode_counter(counters.resources_in_internal_interview)?),
        resource_requests::resources_in_customer_interview
            .eq(encode_counter(counters.resources_in_customer_interview)?),
        resource_requests::resources_in_hm_check.eq(encode_counter(counters.resources_in_hm_check)?),
        resource_requests::resources_in_allocated
            .eq(encode_counter(counters.resources_in_allocated)?),
        resource_requests::resources_in_reject.eq(encode_counter(counters.resources_in_reject)?),
        resource_requests::resources_in_not_allocated
            .eq(encode_counter(counters.resources_in_not_allocated)?),
        resource_requests::resources_in_accept.eq(encode_counter(counters.resources_in_accept)?),
        resource_requests::last_updated.eq(format_timestamp(updated_at)?),
        resource_requests::last_updated_by.eq(updated_by),
    ))
    .execute(conn)?;

    debug!(resource_request_id = %id, rows, "Wrote pipeline counters");
    Ok(rows == 1)
}

/// Reads, checks ownership, applies and writes an HM change in one
/// transaction.
///
/// Only the descriptive columns are written. Counters and the business
/// key are never touched here.
///
/// # Errors
///
/// Returns an error if the read or the write fails.
pub fn modify_owned_resource_request(
    conn: &mut SqliteConnection,
    id: &ResourceRequestId,
    owner: EmployeeId,
    change: &ResourceRequestChange,
) -> Result<ModifyOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: Option<ResourceRequest> =
            queries::resource_requests::find_resource_request(conn, id)?;
        let outcome: ModifyOutcome = ModifyOutcome::evaluate(current, owner, change);
        let ModifyOutcome::Applied(rr) = &outcome else {
            return Ok(outcome);
        };

        diesel::update(
            resource_requests::table.filter(resource_requests::resource_request_id.eq(id.as_str())),
        )
        .set((
            resource_requests::project_name.eq(&rr.project_name),
            resource_requests::ust_role.eq(&rr.ust_role),
            resource_requests::city.eq(&rr.city),
            resource_requests::country.eq(&rr.country),
            resource_requests::job_grade.eq(&rr.job_grade),
            resource_requests::account_name.eq(&rr.account_name),
            resource_requests::job_description.eq(rr.job_description.as_deref()),
            resource_requests::priority.eq(rr.priority.as_str()),
            resource_requests::hm_id.eq(rr.hm_id.value()),
            resource_requests::wfm_id.eq(rr.wfm_id.value()),
            resource_requests::flag.eq(i32::from(rr.flag)),
            resource_requests::mandatory_skills.eq(encode_skills(&rr.mandatory_skills)?),
            resource_requests::optional_skills.eq(encode_skills(&rr.optional_skills)?),
        ))
        .execute(conn)?;

        Ok(outcome)
    })
}
