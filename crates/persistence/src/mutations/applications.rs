// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use talent_domain::{
    Application, ApplicationChange, ApplicationId, ApplicationStatus, EmployeeId, InterviewType,
    NewApplication, TransitionStamps,
};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{format_optional_timestamp, format_timestamp};
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a draft application and returns it with its assigned id.
///
/// # Errors
///
/// Returns `UniqueViolation` if the employee already has an active
/// application to the job.
pub fn insert_application(
    conn: &mut SqliteConnection,
    new: &NewApplication,
) -> Result<Application, PersistenceError> {
    let created_at: String = format_timestamp(new.created_at)?;

    conn.immediate_transaction(|conn| {
        diesel::insert_into(applications::table)
            .values((
                applications::employee_id.eq(new.employee_id.value()),
                applications::job_rr_id.eq(new.job_rr_id.as_str()),
                applications::status.eq(ApplicationStatus::Draft.as_str()),
                applications::created_at.eq(&created_at),
                applications::updated_at.eq(&created_at),
            ))
            .execute(conn)?;

        let id: ApplicationId = ApplicationId::new(conn.get_last_insert_rowid()?);
        info!(
            application_id = id.value(),
            employee_id = new.employee_id.value(),
            job_rr_id = %new.job_rr_id,
            "Inserted application"
        );

        queries::applications::find_application(conn, id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Application {id} vanished after insert"))
        })
    })
}

/// Applies a transition only if the stored status still matches.
///
/// Returns `Ok(false)` when the application is missing or has moved on.
///
/// # Errors
///
/// Returns `UniqueViolation` if the new status collides with a partial
/// unique index (a second allocation for the employee).
pub fn compare_and_set(
    conn: &mut SqliteConnection,
    id: ApplicationId,
    change: &ApplicationChange,
) -> Result<bool, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let Some(mut application) = queries::applications::find_application(conn, id)? else {
            debug!(application_id = id.value(), "Compare-and-set on missing application");
            return Ok(false);
        };
        if application.status != change.expected_status {
            debug!(
                application_id = id.value(),
                expected = %change.expected_status,
                actual = %application.status,
                "Compare-and-set lost the race"
            );
            return Ok(false);
        }

        change.apply_to(&mut application);
        let stamps: &TransitionStamps = &application.stamps;

        let rows: usize = diesel::update(
            applications::table
                .filter(applications::application_id.eq(id.value()))
                .filter(applications::status.eq(change.expected_status.as_str())),
        )
        .set((
            applications::status.eq(application.status.as_str()),
            applications::interview_type.eq(application.interview_type.as_ref().map(InterviewType::as_str)),
            applications::shortlisted_by.eq(stamps.shortlisted_by.map(EmployeeId::value)),
            applications::shortlisted_at.eq(format_optional_timestamp(stamps.shortlisted_at)?),
            applications::interview_scheduled_by
                .eq(stamps.interview_scheduled_by.map(EmployeeId::value)),
            applications::interview_scheduled_at
                .eq(format_optional_timestamp(stamps.interview_scheduled_at)?),
            applications::selected_by.eq(stamps.selected_by.map(EmployeeId::value)),
            applications::selected_at.eq(format_optional_timestamp(stamps.selected_at)?),
            applications::rejected_by.eq(stamps.rejected_by.map(EmployeeId::value)),
            applications::rejected_at.eq(format_optional_timestamp(stamps.rejected_at)?),
            applications::rejection_reason.eq(stamps.rejection_reason.as_deref()),
            applications::allocated_by.eq(stamps.allocated_by.map(EmployeeId::value)),
            applications::allocated_at.eq(format_optional_timestamp(stamps.allocated_at)?),
            applications::submitted_at.eq(format_optional_timestamp(application.submitted_at)?),
            applications::updated_at.eq(format_timestamp(application.updated_at)?),
        ))
        .execute(conn)?;

        Ok(rows == 1)
    })
}
