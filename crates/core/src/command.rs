// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use talent_domain::{ApplicationStatus, DomainError, InterviewType};

/// A command represents caller intent for a single application as data only.
///
/// Commands are the only way to request application status changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Applicant submits a draft.
    Submit,
    /// TP Manager or WFM shortlists a submitted application.
    Shortlist,
    /// WFM schedules (or reschedules) an interview.
    ToInterview {
        /// The kind of interview.
        interview_type: InterviewType,
    },
    /// WFM selects a candidate after interview.
    Select,
    /// WFM rejects a candidate.
    Reject {
        /// Optional free-text reason recorded on the application.
        reason: Option<String>,
    },
    /// HM allocates a selected candidate to the project.
    Allocate,
    /// Applicant withdraws before shortlisting.
    Withdraw,
}

impl Command {
    /// Short name of the command, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Shortlist => "shortlist",
            Self::ToInterview { .. } => "to_interview",
            Self::Select => "select",
            Self::Reject { .. } => "reject",
            Self::Allocate => "allocate",
            Self::Withdraw => "withdraw",
        }
    }

    /// The status the command moves an application to.
    #[must_use]
    pub const fn target_status(&self) -> ApplicationStatus {
        match self {
            Self::Submit => ApplicationStatus::Submitted,
            Self::Shortlist => ApplicationStatus::Shortlisted,
            Self::ToInterview { .. } => ApplicationStatus::Interview,
            Self::Select => ApplicationStatus::Selected,
            Self::Reject { .. } => ApplicationStatus::Rejected,
            Self::Allocate => ApplicationStatus::Allocated,
            Self::Withdraw => ApplicationStatus::Withdrawn,
        }
    }
}

/// Actions available to bulk transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Shortlist,
    Select,
    Reject,
    Allocate,
}

impl BulkAction {
    pub const ALL: [Self; 4] = [Self::Shortlist, Self::Select, Self::Reject, Self::Allocate];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shortlist => "shortlist",
            Self::Select => "select",
            Self::Reject => "reject",
            Self::Allocate => "allocate",
        }
    }

    /// The single-id command each bulk action runs.
    ///
    /// Bulk rejections carry no reason.
    #[must_use]
    pub const fn to_command(self) -> Command {
        match self {
            Self::Shortlist => Command::Shortlist,
            Self::Select => Command::Select,
            Self::Reject => Command::Reject { reason: None },
            Self::Allocate => Command::Allocate,
        }
    }
}

impl FromStr for BulkAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == folded)
            .ok_or_else(|| DomainError::InvalidBulkAction(s.to_string()))
    }
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
