// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the talent placement workflow.
//!
//! Callers supply an [`IdentityContext`] and plain request DTOs. Handlers
//! resolve the caller into a typed actor, run the workflow engine and
//! return serializable responses or an [`ApiError`] with a stable status
//! code.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{IdentityContext, resolve_actor};
pub use error::{ApiError, translate_domain_error, translate_workflow_error};
pub use handlers::{
    allocate, bulk_transition, create_application, create_resource_request,
    delete_resource_request, list_applications, list_applications_for_manager,
    list_audit_entries, list_owned_resource_requests, patch_resource_request_field,
    rebuild_stats, reject, select, shortlist, skill_matches, submit_application, to_interview,
    update_resource_request, withdraw_application,
};
pub use request_response::{
    ApplicationPageResponse, ApplicationResponse, AuditEntryResponse, AuditListRequest,
    BulkItemResponse, BulkTransitionRequest, BulkTransitionResponse,
    CandidateMatchResponse, CreateResourceRequestResponse, InterviewRequest,
    ListApplicationsRequest, PageParams, PatchFieldRequest, RejectRequest,
    ResourceRequestResponse, SkillMatchRequest, SkillMatchResponse, StatsResponse,
    TransitionResponse,
};
