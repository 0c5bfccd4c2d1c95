// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::{authorize_command, ensure_job_owner};
use crate::command::Command;
use crate::error::WorkflowError;
use crate::state::TransitionResult;
use serde_json::{Map, Value, json};
use talent_audit::AuditEntry;
use talent_domain::{
    Actor, Application, ApplicationChange, ApplicationStatus, Employee, EmployeeType,
    ResourceRequest, Role, TransitionStamp,
};
use time::OffsetDateTime;

/// Everything `apply` needs to know about the world.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub application: &'a Application,
    /// The job the application targets.
    pub job: &'a ResourceRequest,
    /// The applicant, if the employee record resolves.
    pub employee: Option<&'a Employee>,
    /// Whether the applicant already holds an `Allocated` application on
    /// another job.
    pub allocated_elsewhere: bool,
}

/// Applies a command to an application, producing a new state.
///
/// This function is pure: it performs no I/O. Checks run in a fixed order
/// so that the most fundamental refusal wins: role, ownership, business
/// blocks, lifecycle precondition, then exclusivity.
///
/// # Arguments
///
/// * `ctx` - The application, its job and applicant
/// * `command` - The command to apply
/// * `actor` - The principal issuing the command
/// * `now` - Timestamp for the transition stamp and audit entry
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the change to commit and its audit entry
/// * `Err(WorkflowError)` if the command is refused
///
/// # Errors
///
/// * `Unauthorized` if the role may not issue the command
/// * `NotFound` if shortlisting and the employee does not resolve
/// * `Forbidden` for ownership, applicant identity, employee type and
///   business-rule refusals
/// * `PreconditionFailed` if the lifecycle has no edge from the current status
/// * `Conflict` if allocating an employee who is allocated elsewhere
#[allow(clippy::too_many_lines)]
pub fn apply(
    ctx: &TransitionContext<'_>,
    command: Command,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, WorkflowError> {
    authorize_command(actor, &command)?;

    let application: &Application = ctx.application;
    let mut details: Map<String, Value> = Map::new();
    details.insert(String::from("job_rr_id"), json!(application.job_rr_id.as_str()));
    details.insert(
        String::from("employee_id"),
        json!(application.employee_id.value()),
    );

    let (action, message, stamp, flips_employee_type): (&str, String, TransitionStamp, bool) =
        match command {
            Command::Submit => {
                ensure_applicant(actor, application, "submit")?;
                ensure_edge(application.status, ApplicationStatus::Submitted, "submit")?;
                (
                    "submit_application",
                    String::from("Application submitted"),
                    TransitionStamp::Submitted { at: now },
                    false,
                )
            }
            Command::Withdraw => {
                ensure_applicant(actor, application, "withdraw")?;
                ensure_edge(application.status, ApplicationStatus::Withdrawn, "withdraw")?;
                details.insert(
                    String::from("previous_status"),
                    json!(application.status.as_str()),
                );
                (
                    "withdraw_application",
                    String::from("Application withdrawn"),
                    TransitionStamp::Withdrawn { at: now },
                    false,
                )
            }
            Command::Shortlist => {
                let employee: &Employee = ctx
                    .employee
                    .ok_or_else(|| WorkflowError::not_found("Employee", application.employee_id))?;
                let (action, message): (&str, String) = shortlist_action(ctx, actor, employee)?;
                ensure_edge(application.status, ApplicationStatus::Shortlisted, "shortlist")?;
                (
                    action,
                    message,
                    TransitionStamp::Shortlisted {
                        by: actor.employee_id,
                        at: now,
                    },
                    false,
                )
            }
            Command::ToInterview { interview_type } => {
                ensure_job_owner(actor, ctx.job, "schedule interview")?;
                ensure_edge(
                    application.status,
                    ApplicationStatus::Interview,
                    "schedule interview",
                )?;
                details.insert(
                    String::from("interview_type"),
                    json!(interview_type.as_str()),
                );
                details.insert(
                    String::from("previous_status"),
                    json!(application.status.as_str()),
                );
                (
                    "move_to_interview",
                    format!("Moved to {} Interview", interview_type.label()),
                    TransitionStamp::InterviewScheduled {
                        by: actor.employee_id,
                        at: now,
                        interview_type,
                    },
                    false,
                )
            }
            Command::Select => {
                ensure_job_owner(actor, ctx.job, "select")?;
                ensure_edge(application.status, ApplicationStatus::Selected, "select")?;
                (
                    "select_candidate",
                    String::from("Candidate Selected"),
                    TransitionStamp::Selected {
                        by: actor.employee_id,
                        at: now,
                    },
                    false,
                )
            }
            Command::Reject { reason } => {
                ensure_job_owner(actor, ctx.job, "reject")?;
                match application.status {
                    ApplicationStatus::Allocated => {
                        return Err(WorkflowError::forbidden(
                            "reject",
                            "candidate is already allocated",
                        ));
                    }
                    ApplicationStatus::Selected => {
                        return Err(WorkflowError::forbidden(
                            "reject",
                            "candidate is selected. Contact HM to deallocate first",
                        ));
                    }
                    _ => {}
                }
                ensure_edge(application.status, ApplicationStatus::Rejected, "reject")?;
                details.insert(String::from("reason"), json!(reason.as_deref()));
                (
                    "reject_candidate",
                    String::from("Candidate Rejected"),
                    TransitionStamp::Rejected {
                        by: actor.employee_id,
                        at: now,
                        reason,
                    },
                    false,
                )
            }
            Command::Allocate => {
                ensure_job_owner(actor, ctx.job, "allocate")?;
                ensure_edge(application.status, ApplicationStatus::Allocated, "allocate")?;
                if ctx.allocated_elsewhere {
                    return Err(WorkflowError::Conflict {
                        reason: format!(
                            "employee {} is already allocated to another resource request",
                            application.employee_id
                        ),
                    });
                }
                (
                    "allocate_candidate",
                    String::from("Allocated Successfully"),
                    TransitionStamp::Allocated {
                        by: actor.employee_id,
                        at: now,
                    },
                    true,
                )
            }
        };

    Ok(TransitionResult {
        change: ApplicationChange::new(application.status, stamp),
        audit_entry: AuditEntry::by_actor(action, Some(application.id), actor, details, now),
        message,
        flips_employee_type,
    })
}

/// Chooses the shortlist audit action for the actor and employee type.
fn shortlist_action(
    ctx: &TransitionContext<'_>,
    actor: &Actor,
    employee: &Employee,
) -> Result<(&'static str, String), WorkflowError> {
    match actor.role {
        Role::TpManager => {
            if employee.employee_type != EmployeeType::Tp {
                return Err(WorkflowError::forbidden(
                    "shortlist",
                    "TP Manager can only shortlist TP employees",
                ));
            }
            Ok(("shortlist_tp", String::from("Shortlisted by TP Manager")))
        }
        Role::Wfm => {
            ensure_job_owner(actor, ctx.job, "shortlist")?;
            if employee.employee_type != EmployeeType::NonTp {
                return Err(WorkflowError::forbidden(
                    "shortlist",
                    "WFM can only shortlist Non TP employees",
                ));
            }
            Ok(("shortlist_non_tp", String::from("Shortlisted by WFM")))
        }
        Role::Admin => {
            let action: &'static str = match employee.employee_type {
                EmployeeType::Tp => "shortlist_tp",
                EmployeeType::NonTp => "shortlist_non_tp",
            };
            Ok((action, String::from("Shortlisted by Admin")))
        }
        Role::Hm | Role::Tp | Role::NonTp => {
            Err(WorkflowError::unauthorized("shortlist", actor.role))
        }
    }
}

fn ensure_applicant(
    actor: &Actor,
    application: &Application,
    action: &str,
) -> Result<(), WorkflowError> {
    if actor.employee_id == application.employee_id {
        Ok(())
    } else {
        Err(WorkflowError::forbidden(
            action,
            "only the applicant may change their own application",
        ))
    }
}

fn ensure_edge(
    current: ApplicationStatus,
    target: ApplicationStatus,
    action: &str,
) -> Result<(), WorkflowError> {
    current
        .validate_transition(target)
        .map_err(|_| WorkflowError::PreconditionFailed {
            action: action.to_string(),
            reason: format!("application is {current}, expected a status that can move to {target}"),
        })
}
