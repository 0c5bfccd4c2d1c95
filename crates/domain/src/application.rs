// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application_status::ApplicationStatus;
use crate::types::{ApplicationId, EmployeeId, InterviewType, ResourceRequestId};
use time::OffsetDateTime;

/// Who moved an application through each manager stage, and when.
///
/// Each pair is populated by the transition that sets the matching status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionStamps {
    pub shortlisted_by: Option<EmployeeId>,
    pub shortlisted_at: Option<OffsetDateTime>,
    pub interview_scheduled_by: Option<EmployeeId>,
    pub interview_scheduled_at: Option<OffsetDateTime>,
    pub selected_by: Option<EmployeeId>,
    pub selected_at: Option<OffsetDateTime>,
    pub rejected_by: Option<EmployeeId>,
    pub rejected_at: Option<OffsetDateTime>,
    pub rejection_reason: Option<String>,
    pub allocated_by: Option<EmployeeId>,
    pub allocated_at: Option<OffsetDateTime>,
}

/// An employee's application to a resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub employee_id: EmployeeId,
    pub job_rr_id: ResourceRequestId,
    pub status: ApplicationStatus,
    pub interview_type: Option<InterviewType>,
    pub stamps: TransitionStamps,
    pub submitted_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A draft application awaiting an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub employee_id: EmployeeId,
    pub job_rr_id: ResourceRequestId,
    pub created_at: OffsetDateTime,
}

/// Stamp written alongside a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionStamp {
    Submitted {
        at: OffsetDateTime,
    },
    Shortlisted {
        by: EmployeeId,
        at: OffsetDateTime,
    },
    InterviewScheduled {
        by: EmployeeId,
        at: OffsetDateTime,
        interview_type: InterviewType,
    },
    Selected {
        by: EmployeeId,
        at: OffsetDateTime,
    },
    Rejected {
        by: EmployeeId,
        at: OffsetDateTime,
        reason: Option<String>,
    },
    Allocated {
        by: EmployeeId,
        at: OffsetDateTime,
    },
    Withdrawn {
        at: OffsetDateTime,
    },
}

impl TransitionStamp {
    /// The status this stamp accompanies.
    #[must_use]
    pub const fn target_status(&self) -> ApplicationStatus {
        match self {
            Self::Submitted { .. } => ApplicationStatus::Submitted,
            Self::Shortlisted { .. } => ApplicationStatus::Shortlisted,
            Self::InterviewScheduled { .. } => ApplicationStatus::Interview,
            Self::Selected { .. } => ApplicationStatus::Selected,
            Self::Rejected { .. } => ApplicationStatus::Rejected,
            Self::Allocated { .. } => ApplicationStatus::Allocated,
            Self::Withdrawn { .. } => ApplicationStatus::Withdrawn,
        }
    }

    #[must_use]
    pub const fn at(&self) -> OffsetDateTime {
        match self {
            Self::Submitted { at }
            | Self::Shortlisted { at, .. }
            | Self::InterviewScheduled { at, .. }
            | Self::Selected { at, .. }
            | Self::Rejected { at, .. }
            | Self::Allocated { at, .. }
            | Self::Withdrawn { at } => *at,
        }
    }
}

/// The typed mutation produced by a validated transition.
///
/// Stores apply it as a compare-and-set against `expected_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationChange {
    pub expected_status: ApplicationStatus,
    pub stamp: TransitionStamp,
}

impl ApplicationChange {
    #[must_use]
    pub const fn new(expected_status: ApplicationStatus, stamp: TransitionStamp) -> Self {
        Self {
            expected_status,
            stamp,
        }
    }

    #[must_use]
    pub const fn new_status(&self) -> ApplicationStatus {
        self.stamp.target_status()
    }

    /// Applies the change to an in-memory application.
    ///
    /// The caller is responsible for checking `expected_status` first.
    pub fn apply_to(&self, application: &mut Application) {
        let stamps: &mut TransitionStamps = &mut application.stamps;
        match &self.stamp {
            TransitionStamp::Submitted { at } => application.submitted_at = Some(*at),
            TransitionStamp::Shortlisted { by, at } => {
                stamps.shortlisted_by = Some(*by);
                stamps.shortlisted_at = Some(*at);
            }
            TransitionStamp::InterviewScheduled {
                by,
                at,
                interview_type,
            } => {
                stamps.interview_scheduled_by = Some(*by);
                stamps.interview_scheduled_at = Some(*at);
                application.interview_type = Some(*interview_type);
            }
            TransitionStamp::Selected { by, at } => {
                stamps.selected_by = Some(*by);
                stamps.selected_at = Some(*at);
            }
            TransitionStamp::Rejected { by, at, reason } => {
                stamps.rejected_by = Some(*by);
                stamps.rejected_at = Some(*at);
                stamps.rejection_reason.clone_from(reason);
            }
            TransitionStamp::Allocated { by, at } => {
                stamps.allocated_by = Some(*by);
                stamps.allocated_at = Some(*at);
            }
            TransitionStamp::Withdrawn { .. } => {}
        }
        application.status = self.new_status();
        application.updated_at = self.stamp.at();
    }
}
