// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use talent_audit::AuditError;
use talent_domain::{DomainError, Role};

/// Errors raised by repository implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record the operation depends on does not exist.
    NotFound(String),
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// The backend failed or returned unreadable data.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Record not found: {msg}"),
            Self::Conflict(msg) => write!(f, "Store conflict: {msg}"),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Coarse classification of a [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    PreconditionFailed,
    Conflict,
    Invalid,
    Store,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::PreconditionFailed => "precondition_failed",
            Self::Conflict => "conflict",
            Self::Invalid => "invalid",
            Self::Store => "store",
        }
    }
}

/// Errors that can occur while running a workflow operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The actor's role may not perform the action at all.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The actor's role.
        role: Role,
    },
    /// The role is allowed in general, but not on this record.
    Forbidden {
        /// The attempted action.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
    /// The record is not in a state that permits the action.
    PreconditionFailed {
        /// The attempted action.
        action: String,
        /// Description of the mismatch.
        reason: String,
    },
    /// The action would violate an exclusivity invariant.
    Conflict {
        /// Description of the conflict.
        reason: String,
    },
    /// The request itself is malformed.
    Invalid(DomainError),
    /// The backing store failed.
    Store(String),
}

impl WorkflowError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PreconditionFailed { .. } => ErrorKind::PreconditionFailed,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Invalid(_) => ErrorKind::Invalid,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// Returns true when the caller should re-read the record and decide
    /// again rather than give up.
    #[must_use]
    pub const fn is_retryable_after_refresh(&self) -> bool {
        matches!(
            self,
            Self::PreconditionFailed { .. } | Self::Conflict { .. }
        )
    }

    pub(crate) fn unauthorized(action: &str, role: Role) -> Self {
        Self::Unauthorized {
            action: action.to_string(),
            role,
        }
    }

    pub(crate) fn forbidden(action: &str, reason: &str) -> Self {
        Self::Forbidden {
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, role } => {
                write!(f, "Role '{role}' is not authorized to {action}")
            }
            Self::Forbidden { action, reason } => write!(f, "Cannot {action}: {reason}"),
            Self::NotFound { entity, id } => write!(f, "{entity} '{id}' not found"),
            Self::PreconditionFailed { action, reason } => {
                write!(f, "Cannot {action}: {reason}")
            }
            Self::Conflict { reason } => write!(f, "Conflict: {reason}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Store(msg) => write!(f, "Store failure: {msg}"),
        }
    }
}

impl std::error::Error for WorkflowError {}

impl From<DomainError> for WorkflowError {
    fn from(err: DomainError) -> Self {
        Self::Invalid(err)
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound {
                entity: "Record",
                id: msg,
            },
            StoreError::Conflict(reason) => Self::Conflict { reason },
            StoreError::Unavailable(msg) => Self::Store(msg),
        }
    }
}

impl From<AuditError> for WorkflowError {
    fn from(err: AuditError) -> Self {
        Self::Store(err.to_string())
    }
}
