// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The workflow engine: single-application transitions, the side effects
//! that follow a committed transition, and stats recomputation.
//!
//! Bulk, listing, skill-match and resource request operations live in
//! sibling modules as further `impl` blocks on [`WorkflowEngine`].

use crate::apply::{TransitionContext, apply};
use crate::command::Command;
use crate::config::{STATS_UPDATED_BY, WorkflowConfig};
use crate::error::WorkflowError;
use crate::repository::WorkflowStore;
use crate::state::{TransitionOutcome, TransitionResult};
use serde_json::{Map, Value, json};
use talent_audit::{AuditEntry, AuditLog, BestEffortAuditLog};
use talent_domain::{
    Actor, Application, ApplicationId, ApplicationStatus, Employee, EmployeeType, InterviewType,
    NewApplication, PipelineCounters, PipelineTally, ResourceRequest, ResourceRequestId,
};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

/// Orchestrates every workflow operation over an injected store and
/// audit sink.
#[derive(Debug)]
pub struct WorkflowEngine<S, A> {
    pub(crate) store: S,
    pub(crate) audit: BestEffortAuditLog<A>,
    pub(crate) config: WorkflowConfig,
}

impl<S: WorkflowStore, A: AuditLog> WorkflowEngine<S, A> {
    /// Creates an engine.
    ///
    /// # Arguments
    ///
    /// * `store` - The repositories backing the engine
    /// * `audit` - The audit sink; writes to it are best-effort
    /// * `config` - Engine limits
    #[must_use]
    pub const fn new(store: S, audit: A, config: WorkflowConfig) -> Self {
        Self {
            store,
            audit: BestEffortAuditLog::new(audit),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn audit_log(&self) -> &A {
        self.audit.inner()
    }

    /// Number of audit entries dropped because the sink failed.
    #[must_use]
    pub const fn audit_failures(&self) -> u64 {
        self.audit.failure_count()
    }

    #[must_use]
    pub fn into_parts(self) -> (S, A) {
        (self.store, self.audit.into_inner())
    }

    /// Shortlists a submitted application.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn shortlist(
        &mut self,
        id: ApplicationId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Shortlist, actor)
    }

    /// Moves an application to (or reschedules) an interview.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn to_interview(
        &mut self,
        id: ApplicationId,
        interview_type: InterviewType,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::ToInterview { interview_type }, actor)
    }

    /// Selects an interviewed candidate.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn select(
        &mut self,
        id: ApplicationId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Select, actor)
    }

    /// Rejects a candidate.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn reject(
        &mut self,
        id: ApplicationId,
        reason: Option<String>,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Reject { reason }, actor)
    }

    /// Allocates a selected candidate and flips their classification.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn allocate(
        &mut self,
        id: ApplicationId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Allocate, actor)
    }

    /// Submits the actor's own draft.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn submit(
        &mut self,
        id: ApplicationId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Submit, actor)
    }

    /// Withdraws the actor's own draft or submitted application.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::transition`].
    pub fn withdraw(
        &mut self,
        id: ApplicationId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.transition(id, Command::Withdraw, actor)
    }

    /// Creates a draft application from the actor to an open job.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the job does not exist or is closed
    /// * `Conflict` if the actor already has an active application to the job
    pub fn create_application(
        &mut self,
        job_rr_id: &ResourceRequestId,
        actor: &Actor,
    ) -> Result<Application, WorkflowError> {
        let job: ResourceRequest = self.load_job(job_rr_id)?;
        if !job.flag {
            return Err(WorkflowError::not_found("Open resource request", job_rr_id));
        }

        if let Some(existing) = self
            .store
            .find_active_application(actor.employee_id, job_rr_id)?
        {
            return Err(WorkflowError::Conflict {
                reason: format!(
                    "application {} for this job is already {}",
                    existing.id, existing.status
                ),
            });
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let application: Application = self.store.insert_application(&NewApplication {
            employee_id: actor.employee_id,
            job_rr_id: job_rr_id.clone(),
            created_at: now,
        })?;

        let mut details: Map<String, Value> = Map::new();
        details.insert(String::from("job_rr_id"), json!(job_rr_id.as_str()));
        details.insert(String::from("employee_id"), json!(actor.employee_id.value()));
        self.audit.record(&AuditEntry::by_actor(
            "create_application",
            Some(application.id),
            actor,
            details,
            now,
        ));

        info!(
            application_id = application.id.value(),
            employee_id = actor.employee_id.value(),
            job_rr_id = %job_rr_id,
            "Created draft application"
        );
        Ok(application)
    }

    /// Runs one command against one application.
    ///
    /// The sequence is: role check, load application and job, validate the
    /// command against current state, compare-and-set, audit, recompute the
    /// job's counters, then (on allocation) flip the employee type. Side
    /// effects after the compare-and-set never undo the transition; their
    /// failures are reported as warnings on the outcome.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` if the role may not issue the command
    /// * `NotFound` if the application, its job or (for shortlisting) the
    ///   employee does not exist
    /// * `Forbidden` on ownership and business-rule refusals
    /// * `PreconditionFailed` if the status does not permit the command, or
    ///   changed between read and write
    /// * `Conflict` if allocation would give the employee two allocations
    /// * `Store` on backend failures
    pub fn transition(
        &mut self,
        id: ApplicationId,
        command: Command,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        crate::authorization::authorize_command(actor, &command).inspect_err(|err| {
            warn!(application_id = id.value(), error = %err, "Transition denied");
        })?;

        let application: Application = self
            .store
            .find_application(id)?
            .ok_or_else(|| WorkflowError::not_found("Application", id))?;
        let job: ResourceRequest = self.load_job(&application.job_rr_id)?;
        let employee: Option<Employee> = self.store.find_employee(application.employee_id)?;
        let allocated_elsewhere: bool = if matches!(command, Command::Allocate) {
            self.store
                .find_allocated_application(application.employee_id)?
                .is_some_and(|allocated| allocated.id != id)
        } else {
            false
        };

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let ctx: TransitionContext<'_> = TransitionContext {
            application: &application,
            job: &job,
            employee: employee.as_ref(),
            allocated_elsewhere,
        };
        let result: TransitionResult = apply(&ctx, command, actor, now).inspect_err(|err| {
            warn!(
                application_id = id.value(),
                role = %actor.role,
                error = %err,
                "Transition refused"
            );
        })?;

        debug!(
            application_id = id.value(),
            expected = %result.change.expected_status,
            "Committing transition"
        );
        if !self.store.compare_and_set(id, &result.change)? {
            return Err(WorkflowError::PreconditionFailed {
                action: result.audit_entry.action,
                reason: format!(
                    "application is no longer {}",
                    result.change.expected_status
                ),
            });
        }

        self.audit.record(&result.audit_entry);

        let mut updated: Application = application.clone();
        result.change.apply_to(&mut updated);

        let mut warnings: Vec<String> = Vec::new();
        let counters: Option<PipelineCounters> = match self.recompute_stats(&job.resource_request_id)
        {
            Ok(counters) => Some(counters),
            Err(err) => {
                error!(
                    job_rr_id = %job.resource_request_id,
                    error = %err,
                    "Stats recomputation failed after transition"
                );
                warnings.push(format!("stats recomputation failed: {err}"));
                None
            }
        };

        if result.flips_employee_type {
            warnings.extend(self.flip_employee_type(&updated, employee.as_ref(), now));
        }

        info!(
            application_id = id.value(),
            action = %result.audit_entry.action,
            from = %application.status,
            to = %updated.status,
            performed_by = actor.employee_id.value(),
            "Application transitioned"
        );

        Ok(TransitionOutcome {
            application: updated,
            previous_status: application.status,
            action: result.audit_entry.action,
            message: result.message,
            counters,
            warnings,
        })
    }

    /// Flips an allocated employee to `Non TP` and audits the change.
    ///
    /// Returns a warning if the flip could not be written.
    fn flip_employee_type(
        &mut self,
        application: &Application,
        employee: Option<&Employee>,
        now: OffsetDateTime,
    ) -> Option<String> {
        let employee_id = application.employee_id;
        let mut details: Map<String, Value> = Map::new();
        details.insert(String::from("employee_id"), json!(employee_id.value()));

        let Some(employee) = employee else {
            details.insert(String::from("error"), json!("employee record not found"));
            self.audit.record(&AuditEntry::by_system(
                "employee_type_change_failed",
                Some(application.id),
                details,
                now,
            ));
            warn!(
                employee_id = employee_id.value(),
                "Allocated employee not found; classification unchanged"
            );
            return None;
        };

        if employee.employee_type == EmployeeType::NonTp {
            return None;
        }

        match self
            .store
            .set_employee_type(employee_id, EmployeeType::NonTp, now)
        {
            Ok(true) => {
                details.insert(String::from("from"), json!(employee.employee_type.as_str()));
                details.insert(String::from("to"), json!(EmployeeType::NonTp.as_str()));
                details.insert(String::from("reason"), json!("Allocated to project"));
                self.audit.record(&AuditEntry::by_system(
                    "employee_type_changed",
                    Some(application.id),
                    details,
                    now,
                ));
                None
            }
            Ok(false) => {
                details.insert(String::from("error"), json!("employee record not found"));
                self.audit.record(&AuditEntry::by_system(
                    "employee_type_change_failed",
                    Some(application.id),
                    details,
                    now,
                ));
                None
            }
            Err(err) => {
                details.insert(String::from("error"), json!(err.to_string()));
                self.audit.record(&AuditEntry::by_system(
                    "employee_type_change_failed",
                    Some(application.id),
                    details,
                    now,
                ));
                error!(
                    employee_id = employee_id.value(),
                    error = %err,
                    "Employee classification flip failed"
                );
                Some(format!("employee type change failed: {err}"))
            }
        }
    }

    /// Recomputes and overwrites a job's pipeline counters from a full
    /// aggregation of its applications.
    ///
    /// Idempotent: running it twice without intervening transitions writes
    /// the same counters.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the job does not exist
    /// * `Store` on backend failures
    pub fn recompute_stats(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<PipelineCounters, WorkflowError> {
        let status_counts: Vec<(ApplicationStatus, u32)> = self.store.count_by_status(job_rr_id)?;
        let interview_counts: Vec<(Option<InterviewType>, u32)> =
            self.store.count_interviews_by_type(job_rr_id)?;
        let counters: PipelineCounters =
            PipelineCounters::from_tally(&PipelineTally::from_groups(
                &status_counts,
                &interview_counts,
            ));

        let written: bool = self.store.write_pipeline_counters(
            job_rr_id,
            &counters,
            OffsetDateTime::now_utc(),
            STATS_UPDATED_BY,
        )?;
        if !written {
            return Err(WorkflowError::not_found("Resource request", job_rr_id));
        }

        debug!(job_rr_id = %job_rr_id, ?counters, "Pipeline counters recomputed");
        Ok(counters)
    }

    /// Admin-initiated recomputation of one job's counters.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` unless the actor is an Admin
    /// * see [`WorkflowEngine::recompute_stats`]
    pub fn rebuild_stats(
        &mut self,
        job_rr_id: &ResourceRequestId,
        actor: &Actor,
    ) -> Result<PipelineCounters, WorkflowError> {
        crate::authorization::authorize_admin(actor, "rebuild stats")?;
        let counters: PipelineCounters = self.recompute_stats(job_rr_id)?;
        info!(job_rr_id = %job_rr_id, performed_by = actor.employee_id.value(), "Stats rebuilt");
        Ok(counters)
    }

    /// Recomputes counters for every job.
    ///
    /// This is the recovery path for counters left stale by a failed
    /// post-transition recomputation.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the job list cannot be read or any write fails.
    pub fn rebuild_all_stats(
        &mut self,
    ) -> Result<Vec<(ResourceRequestId, PipelineCounters)>, WorkflowError> {
        let ids: Vec<ResourceRequestId> = self.store.resource_request_ids()?;
        let mut rebuilt: Vec<(ResourceRequestId, PipelineCounters)> =
            Vec::with_capacity(ids.len());
        for id in ids {
            let counters: PipelineCounters = self.recompute_stats(&id)?;
            rebuilt.push((id, counters));
        }
        info!(jobs = rebuilt.len(), "Rebuilt pipeline counters for all jobs");
        Ok(rebuilt)
    }

    pub(crate) fn load_job(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<ResourceRequest, WorkflowError> {
        self.store
            .find_resource_request(job_rr_id)?
            .ok_or_else(|| WorkflowError::not_found("Resource request", job_rr_id))
    }
}
