// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every handler resolves the caller's identity, translates the request
//! into typed values, runs the engine operation and converts the result
//! into a response DTO. Workflow errors never cross this boundary
//! untranslated.

use serde_json::Value;
use std::sync::atomic::AtomicBool;
use talent_audit::{AuditLog, AuditRecord};
use talent_domain::{
    Actor, Application, ApplicationId, InterviewType, PipelineCounters, ResourceRequest,
    ResourceRequestDraft, ResourceRequestId, ResourceRequestUpdate,
};
use talent_workflow::{
    ApplicationPage, BulkAction, BulkOutcome, QueuedResourceRequest, SkillMatchReport,
    TransitionOutcome, WorkflowEngine, WorkflowStore,
};
use tracing::info;

use crate::auth::{IdentityContext, resolve_actor};
use crate::error::{ApiError, translate_domain_error, translate_workflow_error};
use crate::request_response::{
    ApplicationPageResponse, ApplicationResponse, AuditEntryResponse, AuditListRequest,
    BulkTransitionRequest, BulkTransitionResponse, CreateResourceRequestResponse,
    InterviewRequest, ListApplicationsRequest, PageParams, PatchFieldRequest, RejectRequest,
    ResourceRequestResponse, SkillMatchRequest, SkillMatchResponse, StatsResponse,
    TransitionResponse,
};

fn parse_application_id(raw: &str) -> Result<ApplicationId, ApiError> {
    ApplicationId::parse(raw).map_err(translate_domain_error)
}

fn parse_resource_request_id(raw: &str) -> Result<ResourceRequestId, ApiError> {
    ResourceRequestId::new(raw).map_err(translate_domain_error)
}

/// Shortlists a submitted application.
///
/// # Errors
///
/// Returns an error if the caller cannot be resolved, the id is malformed,
/// or the engine refuses the transition.
pub fn shortlist<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine
        .shortlist(id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Moves a shortlisted application to an interview.
///
/// # Errors
///
/// Returns an error if the interview type is unknown or the engine refuses
/// the transition.
pub fn to_interview<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
    request: &InterviewRequest,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let interview_type: InterviewType = request
        .interview_type
        .parse::<InterviewType>()
        .map_err(translate_domain_error)?;
    let outcome: TransitionOutcome = engine
        .to_interview(id, interview_type, &actor)
        .map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Selects an application.
///
/// # Errors
///
/// Returns an error if the engine refuses the transition.
pub fn select<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine.select(id, &actor).map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Rejects an application with an optional reason.
///
/// # Errors
///
/// Returns an error if the engine refuses the transition.
pub fn reject<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
    request: RejectRequest,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine
        .reject(id, request.reason, &actor)
        .map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Allocates a selected application.
///
/// # Errors
///
/// Returns an error if the engine refuses the transition.
pub fn allocate<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine
        .allocate(id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Creates a draft application for the calling employee.
///
/// # Errors
///
/// Returns an error if the job is unknown or closed, or the employee
/// already has an active application for it.
pub fn create_application<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    job_rr_id: &str,
) -> Result<ApplicationResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let job_rr_id: ResourceRequestId = parse_resource_request_id(job_rr_id)?;
    let application: Application = engine
        .create_application(&job_rr_id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(ApplicationResponse::from(&application))
}

/// Submits the caller's draft application.
///
/// # Errors
///
/// Returns an error if the engine refuses the transition.
pub fn submit_application<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine.submit(id, &actor).map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Withdraws the caller's application.
///
/// # Errors
///
/// Returns an error if the engine refuses the transition.
pub fn withdraw_application<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    application_id: &str,
) -> Result<TransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ApplicationId = parse_application_id(application_id)?;
    let outcome: TransitionOutcome = engine
        .withdraw(id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(TransitionResponse::from(outcome))
}

/// Runs one action over many applications.
///
/// Per-id failures are reported in the response, not as an error.
///
/// # Arguments
///
/// * `engine` - The workflow engine
/// * `identity` - The caller's identity
/// * `request` - The action and ids
/// * `cancel` - Optional flag that stops the batch between ids
///
/// # Errors
///
/// Returns an error if the action is unknown, the batch is empty or too
/// large, or the role may not run the action in bulk.
pub fn bulk_transition<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    request: &BulkTransitionRequest,
    cancel: Option<&AtomicBool>,
) -> Result<BulkTransitionResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let action: BulkAction = request
        .action
        .parse::<BulkAction>()
        .map_err(translate_domain_error)?;
    let ids: Vec<String> = request.id_texts();
    let outcome: BulkOutcome = engine
        .bulk_transition(action, &ids, &actor, cancel)
        .map_err(translate_workflow_error)?;

    info!(
        action = action.as_str(),
        total = outcome.total(),
        successful = outcome.successful(),
        failed = outcome.failed(),
        "Bulk transition finished"
    );
    Ok(BulkTransitionResponse::from(outcome))
}

/// Lists the caller's work queue.
///
/// # Errors
///
/// Returns an error if the role has no queue or the page is invalid.
pub fn list_applications_for_manager<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    request: PageParams,
) -> Result<ApplicationPageResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let page: ApplicationPage = engine
        .list_applications_for_manager(&actor, request.page, request.limit)
        .map_err(translate_workflow_error)?;
    Ok(ApplicationPageResponse::from(page))
}

/// Lists applications filtered by job and status.
///
/// # Errors
///
/// Returns an error for applicant roles, an unknown status or an invalid
/// page.
pub fn list_applications<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    request: &ListApplicationsRequest,
) -> Result<ApplicationPageResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let page: ApplicationPage = engine
        .list_applications(
            &actor,
            request.job_rr_id.as_deref(),
            request.status.as_deref(),
            request.page.page,
            request.page.limit,
        )
        .map_err(translate_workflow_error)?;
    Ok(ApplicationPageResponse::from(page))
}

/// Queues a new resource request for ingestion.
///
/// # Errors
///
/// Returns an error unless the caller is the HM named in the payload and
/// the payload is valid.
pub fn create_resource_request<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    draft: &ResourceRequestDraft,
) -> Result<CreateResourceRequestResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let queued: QueuedResourceRequest = engine
        .create_resource_request(draft, &actor)
        .map_err(translate_workflow_error)?;
    Ok(CreateResourceRequestResponse::from(queued))
}

/// Merges the supplied fields into a resource request.
///
/// # Errors
///
/// Returns an error unless the caller is the owning HM and every field
/// is valid.
pub fn update_resource_request<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    resource_request_id: &str,
    update: ResourceRequestUpdate,
) -> Result<ResourceRequestResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ResourceRequestId = parse_resource_request_id(resource_request_id)?;
    let rr: ResourceRequest = engine
        .update_resource_request(&id, update, &actor)
        .map_err(translate_workflow_error)?;
    Ok(ResourceRequestResponse::from(rr))
}

/// Overwrites one field of a resource request.
///
/// # Errors
///
/// Returns an error unless the caller is the owning HM, the key names an
/// editable field and the value has the right shape.
pub fn patch_resource_request_field<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    resource_request_id: &str,
    request: &PatchFieldRequest,
) -> Result<ResourceRequestResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ResourceRequestId = parse_resource_request_id(resource_request_id)?;
    let value: &Value = &request.value;
    let rr: ResourceRequest = engine
        .patch_resource_request_field(&id, &request.key, value, &actor)
        .map_err(translate_workflow_error)?;
    Ok(ResourceRequestResponse::from(rr))
}

/// Soft deletes a resource request.
///
/// # Errors
///
/// Returns an error unless the caller is the owning HM.
pub fn delete_resource_request<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    resource_request_id: &str,
) -> Result<ResourceRequestResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let id: ResourceRequestId = parse_resource_request_id(resource_request_id)?;
    let rr: ResourceRequest = engine
        .delete_resource_request(&id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(ResourceRequestResponse::from(rr))
}

/// Lists the resource requests the caller owns.
///
/// # Errors
///
/// Returns an error for roles other than WFM and HM.
pub fn list_owned_resource_requests<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
) -> Result<Vec<ResourceRequestResponse>, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let owned: Vec<ResourceRequest> = engine
        .list_owned_resource_requests(&actor)
        .map_err(translate_workflow_error)?;
    Ok(owned.into_iter().map(ResourceRequestResponse::from).collect())
}

/// Scores a job's submitted candidates against its mandatory skills.
///
/// # Errors
///
/// Returns an error if the role may not view the job, the threshold is
/// out of range or the job does not exist.
pub fn skill_matches<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    job_rr_id: &str,
    request: SkillMatchRequest,
) -> Result<SkillMatchResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let job_rr_id: ResourceRequestId = parse_resource_request_id(job_rr_id)?;
    let report: SkillMatchReport = engine
        .skill_matches(&job_rr_id, request.min_match, &actor)
        .map_err(translate_workflow_error)?;
    Ok(SkillMatchResponse::from(report))
}

/// Recomputes one job's pipeline counters.
///
/// # Errors
///
/// Returns an error unless the caller is an Admin and the job exists.
pub fn rebuild_stats<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    job_rr_id: &str,
) -> Result<StatsResponse, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let job_rr_id: ResourceRequestId = parse_resource_request_id(job_rr_id)?;
    let counters: PipelineCounters = engine
        .rebuild_stats(&job_rr_id, &actor)
        .map_err(translate_workflow_error)?;
    Ok(StatsResponse {
        job_rr_id: job_rr_id.to_string(),
        counters,
    })
}

/// Reads recent audit entries, newest first.
///
/// # Errors
///
/// Returns an error unless the caller is an Admin.
pub fn list_audit_entries<S: WorkflowStore, A: AuditLog>(
    engine: &mut WorkflowEngine<S, A>,
    identity: &IdentityContext,
    request: AuditListRequest,
) -> Result<Vec<AuditEntryResponse>, ApiError> {
    let actor: Actor = resolve_actor(identity)?;
    let application_id: Option<ApplicationId> = request.application_id.map(ApplicationId::new);
    let records: Vec<AuditRecord> = engine
        .list_audit_entries(&actor, application_id, request.limit)
        .map_err(translate_workflow_error)?;
    Ok(records.into_iter().map(AuditEntryResponse::from).collect())
}
