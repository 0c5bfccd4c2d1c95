// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::authorize_bulk;
use crate::command::BulkAction;
use crate::engine::WorkflowEngine;
use crate::error::WorkflowError;
use crate::repository::WorkflowStore;
use crate::state::{BulkItemOutcome, BulkItemStatus, BulkOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use talent_audit::AuditLog;
use talent_domain::{Actor, ApplicationId, DomainError};
use tracing::{info, warn};

impl<S: WorkflowStore, A: AuditLog> WorkflowEngine<S, A> {
    /// Runs one action over a batch of application ids.
    ///
    /// The batch is best-effort, not atomic: each id runs the same
    /// single-id transition and its failure is captured in the outcome
    /// without stopping the batch. When `cancel` is set, ids not yet
    /// started are reported as skipped.
    ///
    /// # Arguments
    ///
    /// * `action` - The action to run
    /// * `ids` - Application ids as supplied by the caller
    /// * `actor` - The principal running the batch
    /// * `cancel` - Optional flag checked before each id
    ///
    /// # Errors
    ///
    /// * `Invalid` if the batch is empty or larger than the configured cap
    /// * `Unauthorized` if the role may not run the action in bulk
    pub fn bulk_transition(
        &mut self,
        action: BulkAction,
        ids: &[String],
        actor: &Actor,
        cancel: Option<&AtomicBool>,
    ) -> Result<BulkOutcome, WorkflowError> {
        if ids.is_empty() {
            return Err(WorkflowError::Invalid(DomainError::InvalidBatch {
                reason: String::from("no application ids provided"),
            }));
        }
        if ids.len() > self.config.bulk_limit {
            return Err(WorkflowError::Invalid(DomainError::InvalidBatch {
                reason: format!(
                    "{} ids exceeds the limit of {}",
                    ids.len(),
                    self.config.bulk_limit
                ),
            }));
        }
        authorize_bulk(actor, action)?;

        let mut results: Vec<BulkItemOutcome> = Vec::with_capacity(ids.len());
        for raw_id in ids {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                results.push(BulkItemOutcome {
                    application_id: raw_id.clone(),
                    status: BulkItemStatus::Skipped,
                });
                continue;
            }

            let status: BulkItemStatus = match ApplicationId::parse(raw_id)
                .map_err(WorkflowError::from)
                .and_then(|id| self.transition(id, action.to_command(), actor))
            {
                Ok(outcome) => BulkItemStatus::Succeeded {
                    message: outcome.message,
                },
                Err(err) => {
                    warn!(
                        action = %action,
                        application_id = %raw_id,
                        error = %err,
                        "Bulk item failed"
                    );
                    BulkItemStatus::Failed {
                        kind: err.kind(),
                        error: err.to_string(),
                    }
                }
            };
            results.push(BulkItemOutcome {
                application_id: raw_id.clone(),
                status,
            });
        }

        let outcome: BulkOutcome = BulkOutcome { action, results };
        info!(
            action = %action,
            total = outcome.total(),
            successful = outcome.successful(),
            failed = outcome.failed(),
            skipped = outcome.skipped(),
            "Bulk transition finished"
        );
        Ok(outcome)
    }
}
