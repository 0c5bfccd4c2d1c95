// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and ownership checks.
//!
//! Role checks answer whether a role may attempt an action at all and fail
//! with `Unauthorized`. Ownership checks answer whether a manager may act
//! on a particular job and fail with `Forbidden`.

use crate::command::{BulkAction, Command};
use crate::error::WorkflowError;
use talent_domain::{Actor, ResourceRequest, Role};

/// Checks that the actor's role may issue the command.
///
/// Applicant commands (`Submit`, `Withdraw`) are open to every role; the
/// applicant identity check happens against the application itself.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` if the role may not issue the command.
pub fn authorize_command(actor: &Actor, command: &Command) -> Result<(), WorkflowError> {
    let allowed: bool = match command {
        Command::Submit | Command::Withdraw => true,
        Command::Shortlist => matches!(actor.role, Role::TpManager | Role::Wfm | Role::Admin),
        Command::ToInterview { .. } | Command::Select | Command::Reject { .. } => {
            matches!(actor.role, Role::Wfm | Role::Admin)
        }
        Command::Allocate => matches!(actor.role, Role::Hm | Role::Admin),
    };

    if allowed {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized(command.name(), actor.role))
    }
}

/// Bulk actions each role may run.
#[must_use]
pub const fn bulk_actions_for(role: Role) -> &'static [BulkAction] {
    match role {
        Role::TpManager => &[BulkAction::Shortlist],
        Role::Wfm => &[BulkAction::Shortlist, BulkAction::Select, BulkAction::Reject],
        Role::Hm => &[BulkAction::Allocate],
        Role::Admin => &BulkAction::ALL,
        Role::Tp | Role::NonTp => &[],
    }
}

/// Checks the static bulk role table.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` if the role may not run the action in bulk.
pub fn authorize_bulk(actor: &Actor, action: BulkAction) -> Result<(), WorkflowError> {
    if bulk_actions_for(actor.role).contains(&action) {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized(
            &format!("bulk {action}"),
            actor.role,
        ))
    }
}

/// Returns true if the actor owns the job through the column matching
/// their role.
///
/// Admin is treated as owning every job. TP Managers are not scoped by
/// job ownership. Applicant roles own nothing.
#[must_use]
pub fn owns_job(actor: &Actor, job: &ResourceRequest) -> bool {
    match actor.role {
        Role::Wfm => job.wfm_id == actor.employee_id,
        Role::Hm => job.hm_id == actor.employee_id,
        Role::Admin | Role::TpManager => true,
        Role::Tp | Role::NonTp => false,
    }
}

/// Checks job ownership for a manager action.
///
/// # Errors
///
/// Returns `WorkflowError::Forbidden` if the actor does not own the job.
pub fn ensure_job_owner(
    actor: &Actor,
    job: &ResourceRequest,
    action: &str,
) -> Result<(), WorkflowError> {
    if owns_job(actor, job) {
        return Ok(());
    }
    let reason: &str = match actor.role {
        Role::Hm => "you are not the Hiring Manager for this job",
        Role::Wfm => "you don't manage this job",
        _ => "you do not own this job",
    };
    Err(WorkflowError::forbidden(action, reason))
}

/// Checks that the actor may read a job's candidate data (skill matches).
///
/// # Errors
///
/// * `WorkflowError::Unauthorized` for roles other than WFM, HM and Admin
/// * `WorkflowError::Forbidden` if a WFM or HM does not own the job
pub fn authorize_job_view(actor: &Actor, job: &ResourceRequest) -> Result<(), WorkflowError> {
    authorize_job_view_role(actor)?;
    ensure_job_owner(actor, job, "view skill matches")
}

/// Role half of [`authorize_job_view`], usable before the job is loaded.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for roles other than WFM, HM and Admin.
pub fn authorize_job_view_role(actor: &Actor) -> Result<(), WorkflowError> {
    if matches!(actor.role, Role::Wfm | Role::Hm | Role::Admin) {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized("view skill matches", actor.role))
    }
}

/// Checks that the actor is an Admin.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for every other role.
pub fn authorize_admin(actor: &Actor, action: &str) -> Result<(), WorkflowError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized(action, actor.role))
    }
}

/// Checks that the actor holds one of the manager roles.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for applicant roles.
pub fn authorize_manager(actor: &Actor, action: &str) -> Result<(), WorkflowError> {
    if actor.role.is_manager() {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized(action, actor.role))
    }
}

/// Checks that the actor is a Hiring Manager.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for every other role.
pub fn authorize_hiring_manager(actor: &Actor, action: &str) -> Result<(), WorkflowError> {
    if actor.role == Role::Hm {
        Ok(())
    } else {
        Err(WorkflowError::unauthorized(action, actor.role))
    }
}
