// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::authorize_hiring_manager;
use crate::engine::WorkflowEngine;
use crate::error::{StoreError, WorkflowError};
use crate::repository::{IngestionTicket, ModifyOutcome, WorkflowStore};
use crate::state::{PromotionReport, QueuedResourceRequest};
use serde_json::{Map, Value, json};
use talent_audit::{AuditEntry, AuditLog};
use talent_domain::{
    Actor, Ownership, ResourceRequest, ResourceRequestChange, ResourceRequestDraft,
    ResourceRequestField, ResourceRequestId, ResourceRequestUpdate, Role,
};
use time::OffsetDateTime;
use tracing::{info, warn};

impl<S: WorkflowStore, A: AuditLog> WorkflowEngine<S, A> {
    /// Queues a new resource request for ingestion.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` unless the actor is an HM
    /// * `Forbidden` if the payload names a different HM
    /// * `Invalid` if the payload fails validation
    pub fn create_resource_request(
        &mut self,
        draft: &ResourceRequestDraft,
        actor: &Actor,
    ) -> Result<QueuedResourceRequest, WorkflowError> {
        authorize_hiring_manager(actor, "create resource requests")?;
        if draft.hm_id != actor.employee_id {
            return Err(WorkflowError::forbidden(
                "create resource request",
                "hm_id must match the requesting Hiring Manager",
            ));
        }
        draft.validate()?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let ticket_id: i64 = self
            .store
            .enqueue_resource_request(draft, actor.employee_id, now)?;

        let mut details: Map<String, Value> = Map::new();
        details.insert(
            String::from("resource_request_id"),
            json!(draft.resource_request_id.as_str()),
        );
        details.insert(String::from("ticket_id"), json!(ticket_id));
        self.audit.record(&AuditEntry::by_actor(
            "resource_request_queued",
            None,
            actor,
            details,
            now,
        ));

        info!(
            ticket_id,
            resource_request_id = %draft.resource_request_id,
            "Resource request queued for ingestion"
        );
        Ok(QueuedResourceRequest {
            ticket_id,
            resource_request_id: draft.resource_request_id.clone(),
        })
    }

    /// Merges the provided fields into a resource request the HM owns.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::modify_resource_request`].
    pub fn update_resource_request(
        &mut self,
        id: &ResourceRequestId,
        update: ResourceRequestUpdate,
        actor: &Actor,
    ) -> Result<ResourceRequest, WorkflowError> {
        self.modify_resource_request(id, &ResourceRequestChange::Merge(update), actor)
    }

    /// Overwrites one field of a resource request the HM owns.
    ///
    /// # Errors
    ///
    /// * `Invalid` for unknown keys, derived counters, the business key, or
    ///   a value of the wrong shape
    /// * see [`WorkflowEngine::modify_resource_request`]
    pub fn patch_resource_request_field(
        &mut self,
        id: &ResourceRequestId,
        key: &str,
        value: &Value,
        actor: &Actor,
    ) -> Result<ResourceRequest, WorkflowError> {
        authorize_hiring_manager(actor, "modify resource requests")?;
        let field: ResourceRequestField = ResourceRequestField::from_key_value(key, value)?;
        self.modify_resource_request(id, &ResourceRequestChange::SetField(field), actor)
    }

    /// Soft deletes a resource request the HM owns.
    ///
    /// # Errors
    ///
    /// See [`WorkflowEngine::modify_resource_request`].
    pub fn delete_resource_request(
        &mut self,
        id: &ResourceRequestId,
        actor: &Actor,
    ) -> Result<ResourceRequest, WorkflowError> {
        self.modify_resource_request(id, &ResourceRequestChange::Deactivate, actor)
    }

    /// Applies an owner-scoped change inside one store transaction.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` unless the actor is an HM
    /// * `NotFound` if the resource request does not exist
    /// * `Forbidden` if the HM does not own it
    /// * `Invalid` if the change fails validation
    pub fn modify_resource_request(
        &mut self,
        id: &ResourceRequestId,
        change: &ResourceRequestChange,
        actor: &Actor,
    ) -> Result<ResourceRequest, WorkflowError> {
        authorize_hiring_manager(actor, "modify resource requests")?;

        let outcome: ModifyOutcome =
            self.store
                .modify_owned_resource_request(id, actor.employee_id, change)?;
        let rr: ResourceRequest = match outcome {
            ModifyOutcome::Applied(rr) => rr,
            ModifyOutcome::NotFound => {
                return Err(WorkflowError::not_found("Resource request", id));
            }
            ModifyOutcome::NotOwner => {
                return Err(WorkflowError::forbidden(
                    "modify resource request",
                    "you are not the Hiring Manager for this job",
                ));
            }
            ModifyOutcome::Rejected(err) => return Err(WorkflowError::Invalid(err)),
        };

        let mut details: Map<String, Value> = Map::new();
        details.insert(String::from("resource_request_id"), json!(id.as_str()));
        if let ResourceRequestChange::SetField(field) = change {
            details.insert(String::from("field"), json!(field.key()));
        }
        self.audit.record(&AuditEntry::by_actor(
            change.action_name(),
            None,
            actor,
            details,
            OffsetDateTime::now_utc(),
        ));

        info!(
            resource_request_id = %id,
            action = change.action_name(),
            performed_by = actor.employee_id.value(),
            "Resource request modified"
        );
        Ok(rr)
    }

    /// Lists the resource requests the actor owns.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for roles other than WFM and HM.
    pub fn list_owned_resource_requests(
        &mut self,
        actor: &Actor,
    ) -> Result<Vec<ResourceRequest>, WorkflowError> {
        let owner: Ownership = match actor.role {
            Role::Wfm => Ownership::WorkforceManager(actor.employee_id),
            Role::Hm => Ownership::HiringManager(actor.employee_id),
            Role::TpManager | Role::Admin | Role::Tp | Role::NonTp => {
                return Err(WorkflowError::unauthorized(
                    "list owned resource requests",
                    actor.role,
                ));
            }
        };
        Ok(self.store.resource_requests_owned_by(owner)?)
    }

    /// Drains pending ingestion tickets into the store.
    ///
    /// Each ticket becomes an open resource request with zeroed counters and
    /// is marked processed. A ticket whose business key already exists is
    /// marked processed and reported as a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the queue or store cannot be read or written.
    pub fn promote_queued_resource_requests(&mut self) -> Result<PromotionReport, WorkflowError> {
        let tickets: Vec<IngestionTicket> = self
            .store
            .pending_tickets(self.config.ingestion_batch_size)?;
        let mut report: PromotionReport = PromotionReport::default();

        for ticket in tickets {
            let id: ResourceRequestId = ticket.draft.resource_request_id.clone();
            match self
                .store
                .insert_resource_request(&ticket.draft.into_resource_request())
            {
                Ok(()) => report.promoted.push(id),
                Err(StoreError::Conflict(reason)) => {
                    warn!(
                        ticket_id = ticket.ticket_id,
                        resource_request_id = %id,
                        %reason,
                        "Queued resource request already exists"
                    );
                    report.duplicates.push(id);
                }
                Err(err) => return Err(err.into()),
            }
            self.store
                .mark_ticket_processed(ticket.ticket_id, OffsetDateTime::now_utc())?;
        }

        info!(
            promoted = report.promoted.len(),
            duplicates = report.duplicates.len(),
            "Ingestion queue drained"
        );
        Ok(report)
    }
}
