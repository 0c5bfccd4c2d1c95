// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde_json::{Map, Value};
use talent_domain::{Actor, ApplicationId};
use time::OffsetDateTime;
use tracing::warn;

/// Identity recorded for actions the engine performs on its own behalf.
pub const SYSTEM_PERFORMER: &str = "system";

/// An immutable audit log entry.
///
/// Every successful state change produces exactly one entry tagged with
/// the action name. Side effects of a transition (such as the employee
/// classification flip on allocation) get their own entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// The action name (e.g. `shortlist_tp`, `allocate_candidate`).
    pub action: String,
    /// The application the action touched, if any.
    pub application_id: Option<ApplicationId>,
    /// Employee id of the actor, or `system`.
    pub performed_by: String,
    /// Role of the actor, or `system`.
    pub performed_by_role: String,
    /// Action-specific details.
    pub details: Map<String, Value>,
    pub timestamp: OffsetDateTime,
}

impl AuditEntry {
    /// Creates an entry attributed to an actor.
    ///
    /// # Arguments
    ///
    /// * `action` - The action name
    /// * `application_id` - The application affected, if any
    /// * `actor` - The principal who performed the action
    /// * `details` - Action-specific details
    /// * `timestamp` - When the action was committed
    #[must_use]
    pub fn by_actor(
        action: &str,
        application_id: Option<ApplicationId>,
        actor: &Actor,
        details: Map<String, Value>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            action: action.to_string(),
            application_id,
            performed_by: actor.employee_id.to_string(),
            performed_by_role: actor.role.as_str().to_string(),
            details,
            timestamp,
        }
    }

    /// Creates an entry attributed to the engine itself.
    #[must_use]
    pub fn by_system(
        action: &str,
        application_id: Option<ApplicationId>,
        details: Map<String, Value>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            action: action.to_string(),
            application_id,
            performed_by: SYSTEM_PERFORMER.to_string(),
            performed_by_role: SYSTEM_PERFORMER.to_string(),
            details,
            timestamp,
        }
    }
}

/// An entry as read back from a sink, with its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub audit_id: i64,
    pub entry: AuditEntry,
}

/// Filter for reading recent audit entries, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditQuery {
    pub application_id: Option<ApplicationId>,
    pub limit: usize,
}

/// Errors raised by audit sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// The sink could not be written or read.
    Unavailable(String),
    /// An entry could not be encoded or decoded.
    Encoding(String),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Audit log unavailable: {msg}"),
            Self::Encoding(msg) => write!(f, "Audit entry encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}

/// Append-only audit sink.
pub trait AuditLog {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry could not be persisted.
    fn append(&mut self, entry: &AuditEntry) -> Result<(), AuditError>;

    /// Reads recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink could not be read.
    fn recent(&mut self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError>;
}

/// Wraps a sink so that append failures are logged and counted instead of
/// propagated.
#[derive(Debug)]
pub struct BestEffortAuditLog<L> {
    inner: L,
    failures: u64,
}

impl<L: AuditLog> BestEffortAuditLog<L> {
    #[must_use]
    pub const fn new(inner: L) -> Self {
        Self { inner, failures: 0 }
    }

    /// Records an entry, swallowing any sink failure.
    ///
    /// Returns true if the entry was persisted.
    pub fn record(&mut self, entry: &AuditEntry) -> bool {
        match self.inner.append(entry) {
            Ok(()) => true,
            Err(err) => {
                self.failures += 1;
                warn!(
                    action = %entry.action,
                    application_id = ?entry.application_id.map(ApplicationId::value),
                    failures = self.failures,
                    error = %err,
                    "Audit write failed"
                );
                false
            }
        }
    }

    /// Number of entries dropped because the sink failed.
    #[must_use]
    pub const fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Reads recent entries from the wrapped sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error; reads are not best-effort.
    pub fn recent(&mut self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError> {
        self.inner.recent(query)
    }

    #[must_use]
    pub const fn inner(&self) -> &L {
        &self.inner
    }

    pub const fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> L {
        self.inner
    }
}
