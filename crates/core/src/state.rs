// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::BulkAction;
use crate::error::ErrorKind;
use talent_audit::AuditEntry;
use talent_domain::{
    Application, ApplicationChange, ApplicationId, ApplicationStatus, EmployeeId,
    PipelineCounters, ResourceRequestId,
};

/// The validated result of applying a command to an application.
///
/// Nothing has been written yet; the engine commits `change` as a
/// compare-and-set and then records `audit_entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The mutation to commit.
    pub change: ApplicationChange,
    /// The audit entry recording this transition.
    pub audit_entry: AuditEntry,
    /// Caller-facing summary of the transition.
    pub message: String,
    /// Whether the employee's classification flips to `Non TP` on commit.
    pub flips_employee_type: bool,
}

/// A committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The application after the transition.
    pub application: Application,
    pub previous_status: ApplicationStatus,
    /// The audit action name.
    pub action: String,
    pub message: String,
    /// Recomputed counters, or `None` if recomputation failed.
    pub counters: Option<PipelineCounters>,
    /// Problems in post-commit side effects. The transition itself stands.
    pub warnings: Vec<String>,
}

/// Per-id result of a bulk transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkItemStatus {
    Succeeded {
        message: String,
    },
    Failed {
        kind: ErrorKind,
        error: String,
    },
    /// Not attempted because the batch was cancelled.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemOutcome {
    /// The id exactly as supplied by the caller.
    pub application_id: String,
    pub status: BulkItemStatus,
}

/// Result of a bulk transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    pub action: BulkAction,
    pub results: Vec<BulkItemOutcome>,
}

impl BulkOutcome {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn successful(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, BulkItemStatus::Succeeded { .. }))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, BulkItemStatus::Failed { .. }))
            .count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, BulkItemStatus::Skipped))
            .count()
    }
}

/// One page of an application listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationPage {
    pub items: Vec<Application>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    /// `ceil(total / limit)`.
    pub pages: u64,
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMatch {
    pub application_id: ApplicationId,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub designation: Option<String>,
    pub location: Option<String>,
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub total_required_skills: usize,
    pub skills_matched_count: usize,
}

/// Skill-match report for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchReport {
    pub job_rr_id: ResourceRequestId,
    pub job_title: String,
    /// Number of `Submitted` applications considered.
    pub total_applications: usize,
    pub candidates_returned: usize,
    /// Normalized required skills, sorted.
    pub required_skills: Vec<String>,
    pub min_match: Option<f64>,
    /// Candidates, best match first.
    pub candidates: Vec<CandidateMatch>,
}

/// Acknowledgement of a queued resource request creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedResourceRequest {
    pub ticket_id: i64,
    pub resource_request_id: ResourceRequestId,
}

/// Result of draining the ingestion queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionReport {
    pub promoted: Vec<ResourceRequestId>,
    /// Tickets whose business key already existed in the store.
    pub duplicates: Vec<ResourceRequestId>,
}
