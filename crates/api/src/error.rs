// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use talent_domain::DomainError;
use talent_workflow::WorkflowError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from workflow errors and represent the API contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's identity could not be established.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller's role may not perform the action.
    #[error("Unauthorized: role '{role}' may not {action}")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The caller's role.
        role: String,
    },
    /// The role is allowed, but not on this record.
    #[error("Forbidden: cannot {action}: {reason}")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The record changed or is in a state that does not permit the action.
    #[error("Precondition failed for {action}: {message}")]
    PreconditionFailed {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the mismatch.
        message: String,
    },
    /// The action would violate an exclusivity rule.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationFailed { .. } => 401,
            Self::Unauthorized { .. } | Self::Forbidden { .. } => 403,
            Self::ResourceNotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::InvalidInput { .. } => 400,
            Self::PreconditionFailed { .. } => 422,
            Self::Internal { .. } => 500,
        }
    }

    /// Returns true when the caller should re-fetch the record and decide
    /// again.
    #[must_use]
    pub const fn is_retryable_after_refresh(&self) -> bool {
        matches!(self, Self::PreconditionFailed { .. } | Self::Conflict { .. })
    }
}

/// Translates a domain validation error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidEmployeeId(_) => "employee_id",
        DomainError::InvalidApplicationId(_) => "application_id",
        DomainError::InvalidResourceRequestId(_) => "resource_request_id",
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidEmployeeType(_) => "employee_type",
        DomainError::InvalidInterviewType(_) => "interview_type",
        DomainError::InvalidApplicationStatus { .. } | DomainError::InvalidStatusTransition { .. } => {
            "status"
        }
        DomainError::UnknownField { key }
        | DomainError::ImmutableField { key }
        | DomainError::InvalidFieldValue { key, .. } => key.as_str(),
        DomainError::InvalidMatchThreshold { .. } => "min_match",
        DomainError::InvalidPagination { .. } => "pagination",
        DomainError::InvalidBulkAction(_) => "action",
        DomainError::InvalidBatch { .. } => "application_ids",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a workflow error into an API error.
///
/// This translation is explicit and ensures workflow errors are not leaked
/// directly.
#[must_use]
pub fn translate_workflow_error(err: WorkflowError) -> ApiError {
    match err {
        WorkflowError::Unauthorized { action, role } => ApiError::Unauthorized {
            action,
            role: role.as_str().to_string(),
        },
        WorkflowError::Forbidden { action, reason } => ApiError::Forbidden { action, reason },
        WorkflowError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}' does not exist"),
        },
        WorkflowError::PreconditionFailed { action, reason } => ApiError::PreconditionFailed {
            action,
            message: reason,
        },
        WorkflowError::Conflict { reason } => ApiError::Conflict { message: reason },
        WorkflowError::Invalid(domain_err) => translate_domain_error(domain_err),
        WorkflowError::Store(message) => ApiError::Internal { message },
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        translate_workflow_error(err)
    }
}
