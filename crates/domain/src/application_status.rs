// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status tracking and transition logic.
//!
//! This module defines the closed set of application states and the
//! lifecycle table every transition is checked against. Which role may
//! drive an edge is decided by the workflow engine; this table only
//! answers whether the edge exists.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Created by the applicant, not yet visible to managers
    Draft,
    /// Submitted by the applicant, awaiting shortlisting
    Submitted,
    /// Shortlisted by a TP Manager or WFM
    Shortlisted,
    /// Interview scheduled (internal or customer)
    Interview,
    /// Selected after interview, awaiting HM allocation
    Selected,
    /// Rejected by the WFM
    Rejected,
    /// Allocated to the project by the HM
    Allocated,
    /// Withdrawn by the applicant
    Withdrawn,
}

impl ApplicationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Draft,
        Self::Submitted,
        Self::Shortlisted,
        Self::Interview,
        Self::Selected,
        Self::Rejected,
        Self::Allocated,
        Self::Withdrawn,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Selected => "Selected",
            Self::Rejected => "Rejected",
            Self::Allocated => "Allocated",
            Self::Withdrawn => "Withdrawn",
        }
    }

    /// Parses a status from its canonical string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidApplicationStatus {
                status: s.to_string(),
            })
    }

    /// Parses user-supplied status text case-insensitively.
    ///
    /// `" submitted "` and `"SUBMITTED"` both yield `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationStatus` if the text names no status.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::InvalidApplicationStatus {
                status: raw.to_string(),
            })
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Allocated | Self::Withdrawn)
    }

    /// Returns true if an application in this status blocks a new
    /// application for the same employee and job.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Withdrawn | Self::Rejected)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// `Interview -> Interview` is a valid edge (rescheduling or changing
    /// the interview type).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the edge does not exist.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Draft => matches!(new_status, Self::Submitted | Self::Withdrawn),
            Self::Submitted => matches!(
                new_status,
                Self::Shortlisted | Self::Rejected | Self::Withdrawn
            ),
            Self::Shortlisted => matches!(new_status, Self::Interview | Self::Rejected),
            Self::Interview => matches!(
                new_status,
                Self::Interview | Self::Selected | Self::Rejected
            ),
            Self::Selected => matches!(new_status, Self::Allocated),
            Self::Rejected | Self::Allocated | Self::Withdrawn => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by application lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in ApplicationStatus::ALL {
            let parsed: ApplicationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("submitted".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(
            ApplicationStatus::normalize("  sHoRtLiStEd ").unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert!(matches!(
            ApplicationStatus::normalize("pending"),
            Err(DomainError::InvalidApplicationStatus { .. })
        ));
    }

    #[test]
    fn test_terminal_states() {
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::Allocated.is_terminal());
        assert!(ApplicationStatus::Withdrawn.is_terminal());
        assert!(!ApplicationStatus::Selected.is_terminal());
        assert!(!ApplicationStatus::Draft.is_terminal());
    }

    #[test]
    fn test_manager_path_is_valid() {
        let path = [
            ApplicationStatus::Draft,
            ApplicationStatus::Submitted,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interview,
            ApplicationStatus::Interview,
            ApplicationStatus::Selected,
            ApplicationStatus::Allocated,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].validate_transition(pair[1]).is_ok(),
                "{} -> {} should be valid",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_reject_sources() {
        for from in [
            ApplicationStatus::Submitted,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interview,
        ] {
            assert!(from.validate_transition(ApplicationStatus::Rejected).is_ok());
        }
        for from in [
            ApplicationStatus::Draft,
            ApplicationStatus::Selected,
            ApplicationStatus::Allocated,
        ] {
            assert!(from.validate_transition(ApplicationStatus::Rejected).is_err());
        }
    }

    #[test]
    fn test_withdraw_only_before_shortlisting() {
        assert!(
            ApplicationStatus::Draft
                .validate_transition(ApplicationStatus::Withdrawn)
                .is_ok()
        );
        assert!(
            ApplicationStatus::Submitted
                .validate_transition(ApplicationStatus::Withdrawn)
                .is_ok()
        );
        assert!(
            ApplicationStatus::Shortlisted
                .validate_transition(ApplicationStatus::Withdrawn)
                .is_err()
        );
    }

    #[test]
    fn test_non_edges_are_rejected() {
        let err = ApplicationStatus::Submitted
            .validate_transition(ApplicationStatus::Selected)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatusTransition { .. }));

        assert!(
            ApplicationStatus::Shortlisted
                .validate_transition(ApplicationStatus::Allocated)
                .is_err()
        );
        assert!(
            ApplicationStatus::Allocated
                .validate_transition(ApplicationStatus::Selected)
                .is_err()
        );
    }

    #[test]
    fn test_every_terminal_state_has_no_outgoing_edges() {
        for from in ApplicationStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            for to in ApplicationStatus::ALL {
                assert!(from.validate_transition(to).is_err());
            }
        }
    }

    #[test]
    fn test_active_statuses() {
        assert!(ApplicationStatus::Submitted.is_active());
        assert!(ApplicationStatus::Allocated.is_active());
        assert!(!ApplicationStatus::Withdrawn.is_active());
        assert!(!ApplicationStatus::Rejected.is_active());
    }
}
