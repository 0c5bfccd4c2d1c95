// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use talent_audit::AuditRecord;
use talent_domain::{Application, ApplicationId, PipelineCounters, ResourceRequest};
use talent_workflow::{
    ApplicationPage, BulkItemOutcome, BulkItemStatus, BulkOutcome, CandidateMatch,
    QueuedResourceRequest, SkillMatchReport, TransitionOutcome,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

/// API request to move an application to an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRequest {
    /// `internal` or `customer`.
    pub interview_type: String,
}

/// API request to reject an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectRequest {
    /// Optional free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to run one action over many applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTransitionRequest {
    /// `shortlist`, `select`, `reject` or `allocate`.
    pub action: String,
    /// Application ids, as JSON numbers or strings.
    pub application_ids: Vec<Value>,
}

impl BulkTransitionRequest {
    /// Returns the ids as text, exactly as the caller sent them.
    #[must_use]
    pub fn id_texts(&self) -> Vec<String> {
        self.application_ids
            .iter()
            .map(|id| match id {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Page parameters for listing endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// API request to list applications by job and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListApplicationsRequest {
    #[serde(default)]
    pub job_rr_id: Option<String>,
    /// Status text, matched case-insensitively.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, flatten)]
    pub page: PageParams,
}

/// API request to overwrite one resource request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFieldRequest {
    pub key: String,
    pub value: Value,
}

/// API request for a skill-match report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchRequest {
    /// Lower bound on match percentage (0..=100).
    #[serde(default)]
    pub min_match: Option<f64>,
}

/// API request for audit entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditListRequest {
    #[serde(default)]
    pub application_id: Option<i64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// An application as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub application_id: i64,
    pub employee_id: i64,
    pub job_rr_id: String,
    pub status: String,
    pub interview_type: Option<String>,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            application_id: application.id.value(),
            employee_id: application.employee_id.value(),
            job_rr_id: application.job_rr_id.to_string(),
            status: application.status.as_str().to_string(),
            interview_type: application
                .interview_type
                .as_ref()
                .map(|t| t.as_str().to_string()),
            rejection_reason: application.stamps.rejection_reason.clone(),
            submitted_at: application.submitted_at.map(rfc3339),
            created_at: rfc3339(application.created_at),
            updated_at: rfc3339(application.updated_at),
        }
    }
}

/// API response for a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub application: ApplicationResponse,
    pub previous_status: String,
    pub new_status: String,
    /// The audit action recorded.
    pub action: String,
    pub message: String,
    /// Recomputed job counters; absent if recomputation failed.
    pub counters: Option<PipelineCounters>,
    pub warnings: Vec<String>,
}

impl From<TransitionOutcome> for TransitionResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        Self {
            new_status: outcome.application.status.as_str().to_string(),
            application: ApplicationResponse::from(&outcome.application),
            previous_status: outcome.previous_status.as_str().to_string(),
            action: outcome.action,
            message: outcome.message,
            counters: outcome.counters,
            warnings: outcome.warnings,
        }
    }
}

/// Per-id bulk result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemResponse {
    pub application_id: String,
    /// `success`, `failed` or `skipped`.
    pub status: String,
    pub message: Option<String>,
    /// Error kind for failed items (e.g. `forbidden`).
    pub error_kind: Option<String>,
}

impl From<BulkItemOutcome> for BulkItemResponse {
    fn from(item: BulkItemOutcome) -> Self {
        let (status, message, error_kind): (&str, Option<String>, Option<String>) =
            match item.status {
                BulkItemStatus::Succeeded { message } => ("success", Some(message), None),
                BulkItemStatus::Failed { kind, error } => {
                    ("failed", Some(error), Some(kind.as_str().to_string()))
                }
                BulkItemStatus::Skipped => ("skipped", None, None),
            };
        Self {
            application_id: item.application_id,
            status: status.to_string(),
            message,
            error_kind,
        }
    }
}

/// API response for a bulk transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTransitionResponse {
    pub action: String,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<BulkItemResponse>,
}

impl From<BulkOutcome> for BulkTransitionResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            action: outcome.action.as_str().to_string(),
            total: outcome.total(),
            successful: outcome.successful(),
            failed: outcome.failed(),
            skipped: outcome.skipped(),
            results: outcome
                .results
                .into_iter()
                .map(BulkItemResponse::from)
                .collect(),
        }
    }
}

/// One page of applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPageResponse {
    pub items: Vec<ApplicationResponse>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl From<ApplicationPage> for ApplicationPageResponse {
    fn from(page: ApplicationPage) -> Self {
        Self {
            items: page.items.iter().map(ApplicationResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            pages: page.pages,
        }
    }
}

/// API response for a queued resource request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResourceRequestResponse {
    pub ticket_id: i64,
    pub resource_request_id: String,
    pub message: String,
}

impl From<QueuedResourceRequest> for CreateResourceRequestResponse {
    fn from(queued: QueuedResourceRequest) -> Self {
        Self {
            ticket_id: queued.ticket_id,
            message: format!(
                "Resource request {} queued for ingestion",
                queued.resource_request_id
            ),
            resource_request_id: queued.resource_request_id.to_string(),
        }
    }
}

/// A resource request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequestResponse {
    pub resource_request_id: String,
    pub project_name: String,
    pub ust_role: String,
    pub city: String,
    pub country: String,
    pub job_grade: String,
    pub account_name: String,
    pub job_description: Option<String>,
    pub priority: String,
    pub hm_id: i64,
    pub wfm_id: i64,
    pub flag: bool,
    pub mandatory_skills: Vec<String>,
    pub optional_skills: Vec<String>,
    #[serde(flatten)]
    pub counters: PipelineCounters,
    pub last_updated: Option<String>,
    pub last_updated_by: Option<String>,
}

impl From<ResourceRequest> for ResourceRequestResponse {
    fn from(rr: ResourceRequest) -> Self {
        Self {
            resource_request_id: rr.resource_request_id.to_string(),
            project_name: rr.project_name,
            ust_role: rr.ust_role,
            city: rr.city,
            country: rr.country,
            job_grade: rr.job_grade,
            account_name: rr.account_name,
            job_description: rr.job_description,
            priority: rr.priority.as_str().to_string(),
            hm_id: rr.hm_id.value(),
            wfm_id: rr.wfm_id.value(),
            flag: rr.flag,
            mandatory_skills: rr.mandatory_skills,
            optional_skills: rr.optional_skills,
            counters: rr.counters,
            last_updated: rr.last_updated.map(rfc3339),
            last_updated_by: rr.last_updated_by,
        }
    }
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatchResponse {
    pub application_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub total_required_skills: usize,
    pub skills_matched_count: usize,
}

impl From<CandidateMatch> for CandidateMatchResponse {
    fn from(candidate: CandidateMatch) -> Self {
        Self {
            application_id: candidate.application_id.value(),
            employee_id: candidate.employee_id.value(),
            employee_name: candidate.employee_name,
            designation: candidate.designation,
            location: candidate.location,
            match_percentage: candidate.match_percentage,
            matched_skills: candidate.matched_skills,
            missing_skills: candidate.missing_skills,
            total_required_skills: candidate.total_required_skills,
            skills_matched_count: candidate.skills_matched_count,
        }
    }
}

/// API response for a skill-match report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchResponse {
    pub job_rr_id: String,
    pub job_title: String,
    pub total_applications: usize,
    pub candidates_returned: usize,
    pub required_skills: Vec<String>,
    pub min_match: Option<f64>,
    pub candidates: Vec<CandidateMatchResponse>,
}

impl From<SkillMatchReport> for SkillMatchResponse {
    fn from(report: SkillMatchReport) -> Self {
        Self {
            job_rr_id: report.job_rr_id.to_string(),
            job_title: report.job_title,
            total_applications: report.total_applications,
            candidates_returned: report.candidates_returned,
            required_skills: report.required_skills,
            min_match: report.min_match,
            candidates: report
                .candidates
                .into_iter()
                .map(CandidateMatchResponse::from)
                .collect(),
        }
    }
}

/// API response for recomputed job counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub job_rr_id: String,
    #[serde(flatten)]
    pub counters: PipelineCounters,
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntryResponse {
    pub audit_id: i64,
    pub action: String,
    pub application_id: Option<i64>,
    pub performed_by: String,
    pub performed_by_role: String,
    pub details: Map<String, Value>,
    pub timestamp: String,
}

impl From<AuditRecord> for AuditEntryResponse {
    fn from(record: AuditRecord) -> Self {
        Self {
            audit_id: record.audit_id,
            action: record.entry.action,
            application_id: record.entry.application_id.map(ApplicationId::value),
            performed_by: record.entry.performed_by,
            performed_by_role: record.entry.performed_by_role,
            details: record.entry.details,
            timestamp: rfc3339(record.entry.timestamp),
        }
    }
}
