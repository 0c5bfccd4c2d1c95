// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application queries.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use talent_domain::{
    Application, ApplicationId, ApplicationStatus, EmployeeId, InterviewType, Ownership,
    ResourceRequestId,
};
use talent_workflow::{ApplicationQuery, PageRequest, Paged};
use tracing::debug;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::{applications, employees, resource_requests};
use crate::error::PersistenceError;

const INACTIVE_STATUSES: [&str; 2] = ["Withdrawn", "Rejected"];

fn to_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>, PersistenceError> {
    rows.into_iter().map(Application::try_from).collect()
}

fn to_count(raw: i64) -> Result<u32, PersistenceError> {
    u32::try_from(raw)
        .map_err(|_| PersistenceError::invalid_row("applications", format!("count {raw}")))
}

/// Retrieves an application by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the application is not found.
pub fn find_application(
    conn: &mut SqliteConnection,
    id: ApplicationId,
) -> Result<Option<Application>, PersistenceError> {
    let row: Option<ApplicationRow> = applications::table
        .filter(applications::application_id.eq(id.value()))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Application::try_from).transpose()
}

/// Retrieves the employee's application to the job that is neither
/// withdrawn nor rejected.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_active_application(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    job_rr_id: &ResourceRequestId,
) -> Result<Option<Application>, PersistenceError> {
    let row: Option<ApplicationRow> = applications::table
        .filter(applications::employee_id.eq(employee_id.value()))
        .filter(applications::job_rr_id.eq(job_rr_id.as_str()))
        .filter(applications::status.ne_all(INACTIVE_STATUSES))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Application::try_from).transpose()
}

/// Retrieves the employee's allocated application, on any job.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_allocated_application(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Option<Application>, PersistenceError> {
    let row: Option<ApplicationRow> = applications::table
        .filter(applications::employee_id.eq(employee_id.value()))
        .filter(applications::status.eq(ApplicationStatus::Allocated.as_str()))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Application::try_from).transpose()
}

/// Counts a job's applications grouped by status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is unknown.
pub fn count_by_status(
    conn: &mut SqliteConnection,
    job_rr_id: &ResourceRequestId,
) -> Result<Vec<(ApplicationStatus, u32)>, PersistenceError> {
    let rows: Vec<(String, i64)> = applications::table
        .filter(applications::job_rr_id.eq(job_rr_id.as_str()))
        .group_by(applications::status)
        .select((applications::status, count_star()))
        .load(conn)?;

    rows.into_iter()
        .map(|(status, count)| {
            let status: ApplicationStatus = status
                .parse::<ApplicationStatus>()
                .map_err(|e| PersistenceError::invalid_row("applications", e))?;
            Ok((status, to_count(count)?))
        })
        .collect()
}

/// Counts a job's `Interview` applications grouped by interview type.
///
/// # Errors
///
/// Returns an error if the query fails or a stored interview type is unknown.
pub fn count_interviews_by_type(
    conn: &mut SqliteConnection,
    job_rr_id: &ResourceRequestId,
) -> Result<Vec<(Option<InterviewType>, u32)>, PersistenceError> {
    let rows: Vec<(Option<String>, i64)> = applications::table
        .filter(applications::job_rr_id.eq(job_rr_id.as_str()))
        .filter(applications::status.eq(ApplicationStatus::Interview.as_str()))
        .group_by(applications::interview_type)
        .select((applications::interview_type, count_star()))
        .load(conn)?;

    rows.into_iter()
        .map(|(interview_type, count)| {
            let interview_type: Option<InterviewType> = interview_type
                .as_deref()
                .map(str::parse::<InterviewType>)
                .transpose()
                .map_err(|e| PersistenceError::invalid_row("applications", e))?;
            Ok((interview_type, to_count(count)?))
        })
        .collect()
}

/// Lists a job's applications in one status, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn applications_for_job(
    conn: &mut SqliteConnection,
    job_rr_id: &ResourceRequestId,
    status: ApplicationStatus,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::job_rr_id.eq(job_rr_id.as_str()))
        .filter(applications::status.eq(status.as_str()))
        .order(applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;
    to_applications(rows)
}

/// Builds the filtered application query shared by the page and the total.
fn filtered<'a>(query: &'a ApplicationQuery) -> applications::BoxedQuery<'a, Sqlite> {
    let mut boxed = applications::table.into_boxed();

    if let Some(owner) = query.owner {
        boxed = match owner {
            Ownership::HiringManager(id) => boxed.filter(
                applications::job_rr_id.eq_any(
                    resource_requests::table
                        .filter(resource_requests::hm_id.eq(id.value()))
                        .select(resource_requests::resource_request_id),
                ),
            ),
            Ownership::WorkforceManager(id) => boxed.filter(
                applications::job_rr_id.eq_any(
                    resource_requests::table
                        .filter(resource_requests::wfm_id.eq(id.value()))
                        .select(resource_requests::resource_request_id),
                ),
            ),
        };
    }
    if let Some(job_rr_id) = &query.job_rr_id {
        boxed = boxed.filter(applications::job_rr_id.eq(job_rr_id.as_str()));
    }
    if !query.statuses.is_empty() {
        let statuses: Vec<&'static str> = query
            .statuses
            .iter()
            .map(ApplicationStatus::as_str)
            .collect();
        boxed = boxed.filter(applications::status.eq_any(statuses));
    }
    if let Some(employee_type) = query.employee_type {
        boxed = boxed.filter(
            applications::employee_id.eq_any(
                employees::table
                    .filter(employees::employee_type.eq(employee_type.as_str()))
                    .select(employees::employee_id),
            ),
        );
    }
    boxed
}

/// Lists applications matching the query, most recently updated first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn query_applications(
    conn: &mut SqliteConnection,
    query: &ApplicationQuery,
    page: PageRequest,
) -> Result<Paged<Application>, PersistenceError> {
    let total: i64 = filtered(query).count().get_result(conn)?;

    let offset: i64 = i64::try_from(page.offset)
        .map_err(|_| PersistenceError::QueryFailed(format!("offset {} too large", page.offset)))?;
    let rows: Vec<ApplicationRow> = filtered(query)
        .order((
            applications::updated_at.desc(),
            applications::application_id.desc(),
        ))
        .offset(offset)
        .limit(i64::from(page.limit))
        .select(ApplicationRow::as_select())
        .load(conn)?;

    debug!(total, returned = rows.len(), "Queried applications");
    Ok(Paged {
        items: to_applications(rows)?,
        total: u64::try_from(total).unwrap_or_default(),
    })
}
