// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository trait implementations for [`Persistence`].
//!
//! Each method delegates to a plain query or mutation function and maps
//! [`PersistenceError`] onto the seam's error type.

use talent_audit::{AuditEntry, AuditError, AuditLog, AuditQuery, AuditRecord};
use talent_domain::{
    Application, ApplicationChange, ApplicationId, ApplicationStatus, Employee, EmployeeId,
    EmployeeType, InterviewType, NewApplication, Ownership, PipelineCounters, ResourceRequest,
    ResourceRequestChange, ResourceRequestDraft, ResourceRequestId,
};
use talent_workflow::{
    ApplicationQuery, ApplicationRepository, EmployeeRepository, IngestionQueue, IngestionTicket,
    ModifyOutcome, PageRequest, Paged, ResourceRequestRepository, StoreError,
};
use time::OffsetDateTime;

use crate::{Persistence, mutations, queries};

impl ApplicationRepository for Persistence {
    fn find_application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(queries::applications::find_application(&mut self.conn, id)?)
    }

    fn insert_application(&mut self, new: &NewApplication) -> Result<Application, StoreError> {
        Ok(mutations::applications::insert_application(&mut self.conn, new)?)
    }

    fn compare_and_set(
        &mut self,
        id: ApplicationId,
        change: &ApplicationChange,
    ) -> Result<bool, StoreError> {
        Ok(mutations::applications::compare_and_set(
            &mut self.conn,
            id,
            change,
        )?)
    }

    fn find_active_application(
        &mut self,
        employee_id: EmployeeId,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Option<Application>, StoreError> {
        Ok(queries::applications::find_active_application(
            &mut self.conn,
            employee_id,
            job_rr_id,
        )?)
    }

    fn find_allocated_application(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Option<Application>, StoreError> {
        Ok(queries::applications::find_allocated_application(
            &mut self.conn,
            employee_id,
        )?)
    }

    fn count_by_status(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(ApplicationStatus, u32)>, StoreError> {
        Ok(queries::applications::count_by_status(
            &mut self.conn,
            job_rr_id,
        )?)
    }

    fn count_interviews_by_type(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(Option<InterviewType>, u32)>, StoreError> {
        Ok(queries::applications::count_interviews_by_type(
            &mut self.conn,
            job_rr_id,
        )?)
    }

    fn applications_for_job(
        &mut self,
        job_rr_id: &ResourceRequestId,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(queries::applications::applications_for_job(
            &mut self.conn,
            job_rr_id,
            status,
        )?)
    }

    fn query_applications(
        &mut self,
        query: &ApplicationQuery,
        page: PageRequest,
    ) -> Result<Paged<Application>, StoreError> {
        Ok(queries::applications::query_applications(
            &mut self.conn,
            query,
            page,
        )?)
    }
}

impl ResourceRequestRepository for Persistence {
    fn find_resource_request(
        &mut self,
        id: &ResourceRequestId,
    ) -> Result<Option<ResourceRequest>, StoreError> {
        Ok(queries::resource_requests::find_resource_request(
            &mut self.conn,
            id,
        )?)
    }

    fn insert_resource_request(&mut self, rr: &ResourceRequest) -> Result<(), StoreError> {
        Ok(mutations::resource_requests::insert_resource_request(
            &mut self.conn,
            rr,
        )?)
    }

    fn write_pipeline_counters(
        &mut self,
        id: &ResourceRequestId,
        counters: &PipelineCounters,
        updated_at: OffsetDateTime,
        updated_by: &str,
    ) -> Result<bool, StoreError> {
        Ok(mutations::resource_requests::write_pipeline_counters(
            &mut self.conn,
            id,
            counters,
            updated_at,
            updated_by,
        )?)
    }

    fn modify_owned_resource_request(
        &mut self,
        id: &ResourceRequestId,
        owner: EmployeeId,
        change: &ResourceRequestChange,
    ) -> Result<ModifyOutcome, StoreError> {
        Ok(mutations::resource_requests::modify_owned_resource_request(
            &mut self.conn,
            id,
            owner,
            change,
        )?)
    }

    fn resource_requests_owned_by(
        &mut self,
        owner: Ownership,
    ) -> Result<Vec<ResourceRequest>, StoreError> {
        Ok(queries::resource_requests::resource_requests_owned_by(
            &mut self.conn,
            owner,
        )?)
    }

    fn resource_request_ids(&mut self) -> Result<Vec<ResourceRequestId>, StoreError> {
        Ok(queries::resource_requests::resource_request_ids(
            &mut self.conn,
        )?)
    }
}

impl EmployeeRepository for Persistence {
    fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(queries::employees::find_employee(&mut self.conn, id)?)
    }

    fn save_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        Ok(mutations::employees::save_employee(&mut self.conn, employee)?)
    }

    fn set_employee_type(
        &mut self,
        id: EmployeeId,
        employee_type: EmployeeType,
        updated_at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        Ok(mutations::employees::set_employee_type(
            &mut self.conn,
            id,
            employee_type,
            updated_at,
        )?)
    }
}

impl IngestionQueue for Persistence {
    fn enqueue_resource_request(
        &mut self,
        draft: &ResourceRequestDraft,
        submitted_by: EmployeeId,
        queued_at: OffsetDateTime,
    ) -> Result<i64, StoreError> {
        Ok(mutations::ingestion::enqueue_resource_request(
            &mut self.conn,
            draft,
            submitted_by,
            queued_at,
        )?)
    }

    fn pending_tickets(&mut self, limit: usize) -> Result<Vec<IngestionTicket>, StoreError> {
        Ok(queries::ingestion::pending_tickets(&mut self.conn, limit)?)
    }

    fn mark_ticket_processed(
        &mut self,
        ticket_id: i64,
        processed_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        Ok(mutations::ingestion::mark_ticket_processed(
            &mut self.conn,
            ticket_id,
            processed_at,
        )?)
    }
}

impl AuditLog for Persistence {
    fn append(&mut self, entry: &AuditEntry) -> Result<(), AuditError> {
        Ok(mutations::audit::append_audit_entry(&mut self.conn, entry)?)
    }

    fn recent(&mut self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(queries::audit::recent_audit_entries(&mut self.conn, query)?)
    }
}
