// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::{authorize_admin, authorize_manager};
use crate::config::WorkflowConfig;
use crate::engine::WorkflowEngine;
use crate::error::WorkflowError;
use crate::repository::{ApplicationQuery, PageRequest, Paged, WorkflowStore};
use crate::state::ApplicationPage;
use talent_audit::{AuditLog, AuditQuery, AuditRecord};
use talent_domain::{
    Actor, Application, ApplicationId, ApplicationStatus, DomainError, EmployeeType, Ownership,
    ResourceRequestId, Role,
};
use tracing::debug;

/// Statuses a WFM never sees in their queue.
const WFM_EXCLUDED: [ApplicationStatus; 5] = [
    ApplicationStatus::Draft,
    ApplicationStatus::Allocated,
    ApplicationStatus::Rejected,
    ApplicationStatus::Selected,
    ApplicationStatus::Withdrawn,
];

/// Validated page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    fn resolve(
        config: &WorkflowConfig,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Self, WorkflowError> {
        let page: u32 = page.unwrap_or(1);
        let limit: u32 = limit.unwrap_or(config.default_page_limit);
        if page < 1 {
            return Err(WorkflowError::Invalid(DomainError::InvalidPagination {
                reason: String::from("page must be at least 1"),
            }));
        }
        if limit < 1 || limit > config.max_page_limit {
            return Err(WorkflowError::Invalid(DomainError::InvalidPagination {
                reason: format!("limit must be between 1 and {}", config.max_page_limit),
            }));
        }
        Ok(Self { page, limit })
    }

    fn request(self) -> PageRequest {
        PageRequest {
            offset: u64::from(self.page - 1) * u64::from(self.limit),
            limit: self.limit,
        }
    }

    fn into_page(self, paged: Paged<Application>) -> ApplicationPage {
        ApplicationPage {
            items: paged.items,
            total: paged.total,
            page: self.page,
            limit: self.limit,
            pages: paged.total.div_ceil(u64::from(self.limit)),
        }
    }
}

/// Builds the work-queue query for a manager role.
///
/// The WFM queue is every non-excluded status on owned jobs, plus
/// `Submitted` applications from Non TP employees. `Submitted` is never
/// excluded, so the second clause adds nothing beyond the first.
fn manager_queue_query(actor: &Actor) -> Result<ApplicationQuery, WorkflowError> {
    match actor.role {
        Role::TpManager => Ok(ApplicationQuery {
            statuses: vec![ApplicationStatus::Submitted],
            employee_type: Some(EmployeeType::Tp),
            ..ApplicationQuery::default()
        }),
        Role::Wfm => Ok(ApplicationQuery {
            owner: Some(Ownership::WorkforceManager(actor.employee_id)),
            statuses: ApplicationStatus::ALL
                .into_iter()
                .filter(|status| !WFM_EXCLUDED.contains(status))
                .collect(),
            ..ApplicationQuery::default()
        }),
        Role::Hm => Ok(ApplicationQuery {
            owner: Some(Ownership::HiringManager(actor.employee_id)),
            statuses: vec![ApplicationStatus::Selected],
            ..ApplicationQuery::default()
        }),
        Role::Admin | Role::Tp | Role::NonTp => Err(WorkflowError::unauthorized(
            "list manager applications",
            actor.role,
        )),
    }
}

impl<S: WorkflowStore, A: AuditLog> WorkflowEngine<S, A> {
    /// Lists the role-specific work queue, most recently updated first.
    ///
    /// * TP Manager: `Submitted` applications from TP employees
    /// * WFM: in-flight applications on jobs they manage
    /// * HM: `Selected` applications on jobs they own
    ///
    /// # Errors
    ///
    /// * `Unauthorized` for any other role
    /// * `Invalid` if `page < 1` or `limit` is outside `1..=max_page_limit`
    pub fn list_applications_for_manager(
        &mut self,
        actor: &Actor,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ApplicationPage, WorkflowError> {
        let query: ApplicationQuery = manager_queue_query(actor)?;
        let pagination: Pagination = Pagination::resolve(&self.config, page, limit)?;
        let paged: Paged<Application> = self
            .store
            .query_applications(&query, pagination.request())?;
        debug!(
            role = %actor.role,
            employee_id = actor.employee_id.value(),
            total = paged.total,
            "Listed manager applications"
        );
        Ok(pagination.into_page(paged))
    }

    /// Lists applications filtered by job and status text.
    ///
    /// Status text is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` for applicant roles
    /// * `Invalid` for an unknown status, a blank job id, or bad pagination
    pub fn list_applications(
        &mut self,
        actor: &Actor,
        job_rr_id: Option<&str>,
        status: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ApplicationPage, WorkflowError> {
        authorize_manager(actor, "list applications")?;
        let job_rr_id: Option<ResourceRequestId> =
            job_rr_id.map(ResourceRequestId::new).transpose()?;
        let statuses: Vec<ApplicationStatus> = status
            .map(ApplicationStatus::normalize)
            .transpose()?
            .into_iter()
            .collect();
        let pagination: Pagination = Pagination::resolve(&self.config, page, limit)?;

        let query: ApplicationQuery = ApplicationQuery {
            job_rr_id,
            statuses,
            ..ApplicationQuery::default()
        };
        let paged: Paged<Application> = self
            .store
            .query_applications(&query, pagination.request())?;
        Ok(pagination.into_page(paged))
    }

    /// Reads recent audit entries, newest first.
    ///
    /// `limit` is clamped to the configured cap.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` unless the actor is an Admin
    /// * `Store` if the audit log cannot be read
    pub fn list_audit_entries(
        &mut self,
        actor: &Actor,
        application_id: Option<ApplicationId>,
        limit: Option<usize>,
    ) -> Result<Vec<AuditRecord>, WorkflowError> {
        authorize_admin(actor, "read the audit log")?;
        let cap: usize = self.config.audit_listing_cap;
        let query: AuditQuery = AuditQuery {
            application_id,
            limit: limit.map_or(cap, |requested| requested.min(cap)),
        };
        Ok(self.audit.recent(&query)?)
    }
}
