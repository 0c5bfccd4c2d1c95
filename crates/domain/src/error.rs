// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee identifier is not a valid integer.
    InvalidEmployeeId(String),
    /// Application identifier is not a valid integer.
    InvalidApplicationId(String),
    /// Resource request identifier is empty.
    InvalidResourceRequestId(String),
    /// Role name is not one of the known roles.
    InvalidRole(String),
    /// Employee type is neither `TP` nor `Non TP`.
    InvalidEmployeeType(String),
    /// Interview type is neither `internal` nor `customer`.
    InvalidInterviewType(String),
    /// Application status string is not recognized.
    InvalidApplicationStatus {
        /// The invalid status string.
        status: String,
    },
    /// Status transition is not permitted by the lifecycle table.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Resource request field key is not recognized.
    UnknownField {
        /// The unrecognized key.
        key: String,
    },
    /// Resource request field may not be written by callers.
    ImmutableField {
        /// The protected key.
        key: String,
    },
    /// Resource request field value has the wrong shape.
    InvalidFieldValue {
        /// The field key.
        key: String,
        /// Description of the problem.
        reason: String,
    },
    /// Minimum match threshold is outside 0..=100.
    InvalidMatchThreshold {
        /// The rejected threshold, formatted.
        value: String,
    },
    /// Page or limit is outside the accepted range.
    InvalidPagination {
        /// Description of the problem.
        reason: String,
    },
    /// Bulk action name is not one of the supported actions.
    InvalidBulkAction(String),
    /// A bulk batch is empty or exceeds the batch cap.
    InvalidBatch {
        /// Description of the problem.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmployeeId(raw) => write!(f, "Invalid employee id: '{raw}'"),
            Self::InvalidApplicationId(raw) => write!(f, "Invalid application id: '{raw}'"),
            Self::InvalidResourceRequestId(raw) => {
                write!(f, "Invalid resource request id: '{raw}'")
            }
            Self::InvalidRole(raw) => write!(f, "Unknown role: '{raw}'"),
            Self::InvalidEmployeeType(raw) => write!(f, "Invalid employee type: '{raw}'"),
            Self::InvalidInterviewType(raw) => {
                write!(f, "Invalid interview type: '{raw}' (expected internal or customer)")
            }
            Self::InvalidApplicationStatus { status } => {
                write!(f, "Invalid application status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::UnknownField { key } => write!(f, "Unknown resource request field: '{key}'"),
            Self::ImmutableField { key } => {
                write!(f, "Resource request field '{key}' cannot be modified")
            }
            Self::InvalidFieldValue { key, reason } => {
                write!(f, "Invalid value for field '{key}': {reason}")
            }
            Self::InvalidMatchThreshold { value } => {
                write!(f, "min_match must be between 0 and 100, got {value}")
            }
            Self::InvalidPagination { reason } => write!(f, "Invalid pagination: {reason}"),
            Self::InvalidBulkAction(raw) => write!(
                f,
                "Invalid bulk action: '{raw}' (expected shortlist, select, reject or allocate)"
            ),
            Self::InvalidBatch { reason } => write!(f, "Invalid batch: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
