// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApplicationQuery, ApplicationRepository, EmployeeRepository, IngestionQueue, IngestionTicket,
    ModifyOutcome, PageRequest, Paged, ResourceRequestRepository, StoreError, WorkflowConfig,
    WorkflowEngine,
};
use std::collections::BTreeMap;
use talent_audit::{AuditEntry, AuditError, AuditLog, AuditQuery, AuditRecord};
use talent_domain::{
    Actor, Application, ApplicationChange, ApplicationId, ApplicationStatus, Employee, EmployeeId,
    EmployeeType, InterviewType, NewApplication, Ownership, PipelineCounters, Priority,
    ResourceRequest, ResourceRequestChange, ResourceRequestDraft, ResourceRequestId, Role,
    TransitionStamps,
};
use time::{Duration, OffsetDateTime};

pub const ADMIN_ID: i64 = 1;
pub const TP_MANAGER_ID: i64 = 100;
pub const WFM_ID: i64 = 200;
pub const OTHER_WFM_ID: i64 = 201;
pub const HM_ID: i64 = 300;
pub const OTHER_HM_ID: i64 = 301;
pub const TP_EMPLOYEE_ID: i64 = 1001;
pub const NON_TP_EMPLOYEE_ID: i64 = 1002;
pub const JOB_ID: &str = "RR-1001";
pub const OTHER_JOB_ID: &str = "RR-2002";

/// In-memory repositories with the same uniqueness rules as the database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub applications: BTreeMap<ApplicationId, Application>,
    pub resource_requests: BTreeMap<ResourceRequestId, ResourceRequest>,
    pub employees: BTreeMap<EmployeeId, Employee>,
    pub tickets: Vec<(IngestionTicket, Option<OffsetDateTime>)>,
    next_application_id: i64,
    /// When set, counter writes fail.
    pub fail_counter_writes: bool,
    /// When set, employee type writes fail.
    pub fail_employee_writes: bool,
    /// Status written just before the next compare-and-set, simulating a
    /// concurrent writer.
    pub concurrent_write: Option<(ApplicationId, ApplicationStatus)>,
}

impl MemoryStore {
    /// Inserts an application directly in the given state.
    pub fn seed_application(
        &mut self,
        employee_id: i64,
        job: &str,
        status: ApplicationStatus,
        interview_type: Option<InterviewType>,
    ) -> ApplicationId {
        self.next_application_id += 1;
        let id: ApplicationId = ApplicationId::new(self.next_application_id);
        let created_at: OffsetDateTime =
            OffsetDateTime::UNIX_EPOCH + Duration::minutes(self.next_application_id);
        self.applications.insert(
            id,
            Application {
                id,
                employee_id: EmployeeId::new(employee_id),
                job_rr_id: ResourceRequestId::new(job).unwrap(),
                status,
                interview_type,
                stamps: TransitionStamps::default(),
                submitted_at: None,
                created_at,
                updated_at: created_at,
            },
        );
        id
    }

    pub fn status_of(&self, id: ApplicationId) -> ApplicationStatus {
        self.applications[&id].status
    }

    pub fn counters_of(&self, job: &str) -> PipelineCounters {
        self.resource_requests[&ResourceRequestId::new(job).unwrap()].counters
    }

    fn conflicts_with_active(&self, employee_id: EmployeeId, job: &ResourceRequestId) -> bool {
        self.applications
            .values()
            .any(|a| a.employee_id == employee_id && &a.job_rr_id == job && a.status.is_active())
    }
}

impl ApplicationRepository for MemoryStore {
    fn find_application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(self.applications.get(&id).cloned())
    }

    fn insert_application(&mut self, new: &NewApplication) -> Result<Application, StoreError> {
        if self.conflicts_with_active(new.employee_id, &new.job_rr_id) {
            return Err(StoreError::Conflict(String::from("active application exists")));
        }
        self.next_application_id += 1;
        let application: Application = Application {
            id: ApplicationId::new(self.next_application_id),
            employee_id: new.employee_id,
            job_rr_id: new.job_rr_id.clone(),
            status: ApplicationStatus::Draft,
            interview_type: None,
            stamps: TransitionStamps::default(),
            submitted_at: None,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        self.applications.insert(application.id, application.clone());
        Ok(application)
    }

    fn compare_and_set(
        &mut self,
        id: ApplicationId,
        change: &ApplicationChange,
    ) -> Result<bool, StoreError> {
        if let Some((target, status)) = self.concurrent_write.take() {
            if let Some(app) = self.applications.get_mut(&target) {
                app.status = status;
            }
        }

        let Some(current) = self.applications.get(&id) else {
            return Ok(false);
        };
        if current.status != change.expected_status {
            return Ok(false);
        }
        if change.new_status() == ApplicationStatus::Allocated
            && self.applications.values().any(|a| {
                a.id != id
                    && a.employee_id == current.employee_id
                    && a.status == ApplicationStatus::Allocated
            })
        {
            return Err(StoreError::Conflict(String::from("employee already allocated")));
        }

        if let Some(app) = self.applications.get_mut(&id) {
            change.apply_to(app);
        }
        Ok(true)
    }

    fn find_active_application(
        &mut self,
        employee_id: EmployeeId,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Option<Application>, StoreError> {
        Ok(self
            .applications
            .values()
            .find(|a| {
                a.employee_id == employee_id && &a.job_rr_id == job_rr_id && a.status.is_active()
            })
            .cloned())
    }

    fn find_allocated_application(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Option<Application>, StoreError> {
        Ok(self
            .applications
            .values()
            .find(|a| a.employee_id == employee_id && a.status == ApplicationStatus::Allocated)
            .cloned())
    }

    fn count_by_status(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(ApplicationStatus, u32)>, StoreError> {
        let mut counts: BTreeMap<ApplicationStatus, u32> = BTreeMap::new();
        for app in self.applications.values().filter(|a| &a.job_rr_id == job_rr_id) {
            *counts.entry(app.status).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    fn count_interviews_by_type(
        &mut self,
        job_rr_id: &ResourceRequestId,
    ) -> Result<Vec<(Option<InterviewType>, u32)>, StoreError> {
        let mut counts: BTreeMap<Option<InterviewType>, u32> = BTreeMap::new();
        for app in self
            .applications
            .values()
            .filter(|a| &a.job_rr_id == job_rr_id && a.status == ApplicationStatus::Interview)
        {
            *counts.entry(app.interview_type).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    fn applications_for_job(
        &mut self,
        job_rr_id: &ResourceRequestId,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .values()
            .filter(|a| &a.job_rr_id == job_rr_id && a.status == status)
            .cloned()
            .collect())
    }

    fn query_applications(
        &mut self,
        query: &ApplicationQuery,
        page: PageRequest,
    ) -> Result<Paged<Application>, StoreError> {
        let mut matching: Vec<Application> = self
            .applications
            .values()
            .filter(|a| query.statuses.is_empty() || query.statuses.contains(&a.status))
            .filter(|a| query.job_rr_id.as_ref().is_none_or(|job| &a.job_rr_id == job))
            .filter(|a| {
                query.owner.is_none_or(|owner| {
                    self.resource_requests
                        .get(&a.job_rr_id)
                        .is_some_and(|rr| match owner {
                            Ownership::HiringManager(id) => rr.hm_id == id,
                            Ownership::WorkforceManager(id) => rr.wfm_id == id,
                        })
                })
            })
            .filter(|a| {
                query.employee_type.is_none_or(|wanted| {
                    self.employees
                        .get(&a.employee_id)
                        .is_some_and(|e| e.employee_type == wanted)
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let total: u64 = u64::try_from(matching.len()).unwrap();
        let items: Vec<Application> = matching
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap())
            .take(usize::try_from(page.limit).unwrap())
            .collect();
        Ok(Paged { items, total })
    }
}

impl ResourceRequestRepository for MemoryStore {
    fn find_resource_request(
        &mut self,
        id: &ResourceRequestId,
    ) -> Result<Option<ResourceRequest>, StoreError> {
        Ok(self.resource_requests.get(id).cloned())
    }

    fn insert_resource_request(&mut self, rr: &ResourceRequest) -> Result<(), StoreError> {
        if self.resource_requests.contains_key(&rr.resource_request_id) {
            return Err(StoreError::Conflict(format!(
                "resource request {} exists",
                rr.resource_request_id
            )));
        }
        self.resource_requests
            .insert(rr.resource_request_id.clone(), rr.clone());
        Ok(())
    }

    fn write_pipeline_counters(
        &mut self,
        id: &ResourceRequestId,
        counters: &PipelineCounters,
        updated_at: OffsetDateTime,
        updated_by: &str,
    ) -> Result<bool, StoreError> {
        if self.fail_counter_writes {
            return Err(StoreError::Unavailable(String::from("counter write failed")));
        }
        let Some(rr) = self.resource_requests.get_mut(id) else {
            return Ok(false);
        };
        rr.counters = *counters;
        rr.last_updated = Some(updated_at);
        rr.last_updated_by = Some(updated_by.to_string());
        Ok(true)
    }

    fn modify_owned_resource_request(
        &mut self,
        id: &ResourceRequestId,
        owner: EmployeeId,
        change: &ResourceRequestChange,
    ) -> Result<ModifyOutcome, StoreError> {
        let outcome: ModifyOutcome =
            ModifyOutcome::evaluate(self.resource_requests.get(id).cloned(), owner, change);
        if let ModifyOutcome::Applied(rr) = &outcome {
            self.resource_requests.insert(id.clone(), rr.clone());
        }
        Ok(outcome)
    }

    fn resource_requests_owned_by(
        &mut self,
        owner: Ownership,
    ) -> Result<Vec<ResourceRequest>, StoreError> {
        Ok(self
            .resource_requests
            .values()
            .filter(|rr| match owner {
                Ownership::HiringManager(id) => rr.hm_id == id,
                Ownership::WorkforceManager(id) => rr.wfm_id == id,
            })
            .cloned()
            .collect())
    }

    fn resource_request_ids(&mut self) -> Result<Vec<ResourceRequestId>, StoreError> {
        Ok(self.resource_requests.keys().cloned().collect())
    }
}

impl EmployeeRepository for MemoryStore {
    fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.get(&id).cloned())
    }

    fn save_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        self.employees.insert(employee.employee_id, employee.clone());
        Ok(())
    }

    fn set_employee_type(
        &mut self,
        id: EmployeeId,
        employee_type: EmployeeType,
        updated_at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        if self.fail_employee_writes {
            return Err(StoreError::Unavailable(String::from("employee write failed")));
        }
        let Some(employee) = self.employees.get_mut(&id) else {
            return Ok(false);
        };
        employee.employee_type = employee_type;
        employee.updated_at = Some(updated_at);
        Ok(true)
    }
}

impl IngestionQueue for MemoryStore {
    fn enqueue_resource_request(
        &mut self,
        draft: &ResourceRequestDraft,
        submitted_by: EmployeeId,
        queued_at: OffsetDateTime,
    ) -> Result<i64, StoreError> {
        let ticket_id: i64 = i64::try_from(self.tickets.len()).unwrap() + 1;
        self.tickets.push((
            IngestionTicket {
                ticket_id,
                draft: draft.clone(),
                submitted_by,
                queued_at,
            },
            None,
        ));
        Ok(ticket_id)
    }

    fn pending_tickets(&mut self, limit: usize) -> Result<Vec<IngestionTicket>, StoreError> {
        Ok(self
            .tickets
            .iter()
            .filter(|(_, processed)| processed.is_none())
            .take(limit)
            .map(|(ticket, _)| ticket.clone())
            .collect())
    }

    fn mark_ticket_processed(
        &mut self,
        ticket_id: i64,
        processed_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let entry = self
            .tickets
            .iter_mut()
            .find(|(ticket, _)| ticket.ticket_id == ticket_id)
            .ok_or_else(|| StoreError::NotFound(format!("ticket {ticket_id}")))?;
        entry.1 = Some(processed_at);
        Ok(())
    }
}

/// Audit sink keeping entries in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    pub entries: Vec<AuditEntry>,
    pub fail: bool,
}

impl MemoryAuditLog {
    pub fn actions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.action.as_str()).collect()
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&mut self, entry: &AuditEntry) -> Result<(), AuditError> {
        if self.fail {
            return Err(AuditError::Unavailable(String::from("audit sink down")));
        }
        self.entries.push(entry.clone());
        Ok(())
    }

    fn recent(&mut self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(self
            .entries
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| {
                query.application_id.is_none() || e.application_id == query.application_id
            })
            .take(query.limit)
            .map(|(i, e)| AuditRecord {
                audit_id: i64::try_from(i).unwrap() + 1,
                entry: e.clone(),
            })
            .collect())
    }
}

pub type TestEngine = WorkflowEngine<MemoryStore, MemoryAuditLog>;

pub fn actor(id: i64, role: Role) -> Actor {
    Actor::new(EmployeeId::new(id), role)
}

pub fn admin() -> Actor {
    actor(ADMIN_ID, Role::Admin)
}

pub fn tp_manager() -> Actor {
    actor(TP_MANAGER_ID, Role::TpManager)
}

pub fn wfm() -> Actor {
    actor(WFM_ID, Role::Wfm)
}

pub fn other_wfm() -> Actor {
    actor(OTHER_WFM_ID, Role::Wfm)
}

pub fn hm() -> Actor {
    actor(HM_ID, Role::Hm)
}

pub fn other_hm() -> Actor {
    actor(OTHER_HM_ID, Role::Hm)
}

pub fn create_test_draft(id: &str, hm_id: i64, wfm_id: i64) -> ResourceRequestDraft {
    ResourceRequestDraft {
        resource_request_id: ResourceRequestId::new(id).unwrap(),
        project_name: String::from("Atlas"),
        ust_role: String::from("Backend Engineer"),
        city: String::from("Kochi"),
        country: String::from("India"),
        job_grade: String::from("B2"),
        account_name: String::from("Contoso"),
        job_description: None,
        priority: Priority::P2,
        hm_id: EmployeeId::new(hm_id),
        wfm_id: EmployeeId::new(wfm_id),
        mandatory_skills: vec![String::from("Java"), String::from("SQL")],
        optional_skills: vec![String::from("Kafka")],
    }
}

pub fn create_test_job(id: &str, hm_id: i64, wfm_id: i64) -> ResourceRequest {
    create_test_draft(id, hm_id, wfm_id).into_resource_request()
}

pub fn job_id(id: &str) -> ResourceRequestId {
    ResourceRequestId::new(id).unwrap()
}

/// Store with two jobs (RR-1001 owned by HM 300 / WFM 200, RR-2002 owned
/// by HM 301 / WFM 201), a TP employee and a Non TP employee.
pub fn create_test_store() -> MemoryStore {
    let mut store: MemoryStore = MemoryStore::default();
    for job in [
        create_test_job(JOB_ID, HM_ID, WFM_ID),
        create_test_job(OTHER_JOB_ID, OTHER_HM_ID, OTHER_WFM_ID),
    ] {
        store
            .resource_requests
            .insert(job.resource_request_id.clone(), job);
    }

    let mut tp: Employee =
        Employee::new(EmployeeId::new(TP_EMPLOYEE_ID), "Asha Nair", EmployeeType::Tp)
            .with_skills(["java", "python"]);
    tp.designation = Some(String::from("Developer"));
    tp.city = Some(String::from("Kochi"));
    let non_tp: Employee =
        Employee::new(EmployeeId::new(NON_TP_EMPLOYEE_ID), "Ravi Menon", EmployeeType::NonTp)
            .with_skills(["['Java', 'SQL']"]);
    store.employees.insert(tp.employee_id, tp);
    store.employees.insert(non_tp.employee_id, non_tp);
    store
}

pub fn create_test_engine() -> TestEngine {
    WorkflowEngine::new(
        create_test_store(),
        MemoryAuditLog::default(),
        WorkflowConfig::default(),
    )
}
