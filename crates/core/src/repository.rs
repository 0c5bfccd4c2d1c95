// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository seams consumed by the workflow engine.
//!
//! The engine never reaches a database directly. Each entity has its own
//! narrow trait, and [`WorkflowStore`] bundles them for injection.

use crate::error::StoreError;
use talent_domain::{
    Application, ApplicationChange, ApplicationId, ApplicationStatus, DomainError, Employee,
    EmployeeId, EmployeeType, InterviewType, NewApplication, Ownership, PipelineCounters,
    ResourceRequest, ResourceRequestChange, ResourceRequestDraft, ResourceRequestId,
};
use time::OffsetDateTime;

/// Filter for application listings.
///
/// Every populated field narrows the result. An empty `statuses` list
/// matches every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    /// Only applications to jobs owned through this column.
    pub owner: Option<Ownership>,
    pub job_rr_id: Option<ResourceRequestId>,
    pub statuses: Vec<ApplicationStatus>,
    /// Only applications from employees of this type.
    pub employee_type: Option<EmployeeType>,
}

/// A window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u32,
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// A queued resource request creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionTicket {
    pub ticket_id: i64,
    pub draft: ResourceRequestDraft,
    pub submitted_by: EmployeeId,
    pub queued_at: OffsetDateTime,
}

/// Result of an owner-scoped resource request modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifyOutcome {
    /// The change was written; carries the updated record.
    Applied(ResourceRequest),
    NotFound,
    /// The record exists but is owned by another HM.
    NotOwner,
    /// The change failed domain validation; nothing was written.
    Rejected(DomainError),
}

impl ModifyOutcome {
    /// Decides the outcome of a modification against the current record.
    ///
    /// Stores call this between their read and write, inside whatever
    /// transaction makes the pair atomic. Only `Applied` should be written.
    #[must_use]
    pub fn evaluate(
        current: Option<ResourceRequest>,
        owner: EmployeeId,
        change: &ResourceRequestChange,
    ) -> Self {
        let Some(mut rr) = current else {
            return Self::NotFound;
        };
        if rr.hm_id != owner {
            return Self::NotOwner;
        }
        match change.apply_to(&mut rr) {
            Ok(()) => Self::Applied(rr),
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Application records.
pub trait ApplicationRepository {
    /// Loads an application by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError>;

    /// Inserts a new draft application and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if an active application for the same
    /// employee and job already exists.
    fn insert_application(&mut self, new: &NewApplication) -> Result<Application, StoreError>;

    /// Applies a change only if the application is still in
    /// `change.expected_status`.
    ///
    /// Returns false when the status no longer matches (or the row is gone).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the write would violate a
    /// uniqueness constraint.
    fn compare_and_set(
        &mut self,
        id: ApplicationId,
        change: &ApplicationChange,
    ) -> Result<bool, StoreError>;

    /// Finds the active (not withdrawn or rejected) application for a pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_active_application(
        &mut self,
        employee_id: EmployeeId,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Option<Application>, StoreError>;

    /// Finds the employee's allocated application on any job.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_allocated_application(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Option<Application>, StoreError>;

    /// Counts the job's applications grouped by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_by_status(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(ApplicationStatus, u32)>, StoreError>;

    /// Counts the job's `Interview` applications grouped by interview type.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_interviews_by_type(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(Option<InterviewType>, u32)>, StoreError>;

    /// Lists the job's applications in one status, oldest id first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn applications_for_job(
        &mut self,
        job_rr_id: &ResourceRequestId,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError>;

    /// Lists applications matching a query, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query_applications(
        &mut self,
        query: &ApplicationQuery,
        page: PageRequest,
    ) -> Result<Paged<Application>, StoreError>;
}

/// Resource request records.
pub trait ResourceRequestRepository {
    /// Loads a resource request by business key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_resource_request(
        &mut self,
        id: &ResourceRequestId,
    ) -> Result<Option<ResourceRequest>, StoreError>;

    /// Inserts a resource request.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the business key already exists.
    fn insert_resource_request(&mut self, rr: &ResourceRequest) -> Result<(), StoreError>;

    /// Overwrites every pipeline counter plus the stats metadata.
    ///
    /// Returns false if the resource request does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn write_pipeline_counters(
        &mut self,
        id: &ResourceRequestId,
        counters: &PipelineCounters,
        updated_at: OffsetDateTime,
        updated_by: &str,
    ) -> Result<bool, StoreError>;

    /// Reads, checks HM ownership, applies and writes a change atomically.
    ///
    /// Implementations should use [`ModifyOutcome::evaluate`] between the
    /// read and the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn modify_owned_resource_request(
        &mut self,
        id: &ResourceRequestId,
        owner: EmployeeId,
        change: &ResourceRequestChange,
    ) -> Result<ModifyOutcome, StoreError>;

    /// Lists resource requests owned through the given column.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn resource_requests_owned_by(
        &mut self,
        owner: Ownership,
    ) -> Result<Vec<ResourceRequest>, StoreError>;

    /// Lists every resource request id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn resource_request_ids(&mut self) -> Result<Vec<ResourceRequestId>, StoreError>;
}

/// Employee records.
pub trait EmployeeRepository {
    /// Loads an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Inserts or replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_employee(&mut self, employee: &Employee) -> Result<(), StoreError>;

    /// Sets the employee classification.
    ///
    /// Returns false if the employee does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_employee_type(
        &mut self,
        id: EmployeeId,
        employee_type: EmployeeType,
        updated_at: OffsetDateTime,
    ) -> Result<bool, StoreError>;
}

/// Durable queue of resource request creations awaiting ingestion.
pub trait IngestionQueue {
    /// Appends a draft to the queue and returns its ticket id.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be written.
    fn enqueue_resource_request(
        &mut self,
        draft: &ResourceRequestDraft,
        submitted_by: EmployeeId,
        queued_at: OffsetDateTime,
    ) -> Result<i64, StoreError>;

    /// Lists unprocessed tickets, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read or a payload is unreadable.
    fn pending_tickets(&mut self, limit: usize) -> Result<Vec<IngestionTicket>, StoreError>;

    /// Marks a ticket processed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the ticket does not exist.
    fn mark_ticket_processed(
        &mut self,
        ticket_id: i64,
        processed_at: OffsetDateTime,
    ) -> Result<(), StoreError>;
}

/// Everything the engine needs from storage.
pub trait WorkflowStore:
    ApplicationRepository + ResourceRequestRepository + EmployeeRepository + IngestionQueue
{
}

impl<T> WorkflowStore for T where
    T: ApplicationRepository + ResourceRequestRepository + EmployeeRepository + IngestionQueue
{
}
