// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use talent_domain::{
    Employee, EmployeeId, EmployeeType, Priority, ResourceRequestDraft, ResourceRequestId,
};
use talent_persistence::Persistence;
use talent_workflow::{EmployeeRepository, WorkflowConfig, WorkflowEngine};

use crate::{ApplicationResponse, IdentityContext, create_application, submit_application};

pub type TestEngine = WorkflowEngine<Persistence, Persistence>;

pub const JOB_ID: &str = "RR-1001";
pub const TP_EMPLOYEE_ID: i64 = 1001;
pub const NON_TP_EMPLOYEE_ID: i64 = 1002;

pub fn tp_manager() -> IdentityContext {
    IdentityContext::new("100", "TP Manager")
}

pub fn wfm() -> IdentityContext {
    IdentityContext::new("200", "WFM")
}

pub fn other_wfm() -> IdentityContext {
    IdentityContext::new("201", "WFM")
}

pub fn hm() -> IdentityContext {
    IdentityContext::new("300", "HM")
}

pub fn admin() -> IdentityContext {
    IdentityContext::new("1", "Admin")
}

pub fn tp_employee() -> IdentityContext {
    IdentityContext::new("1001", "TP")
}

pub fn non_tp_employee() -> IdentityContext {
    IdentityContext::new("1002", "Non TP")
}

pub fn create_test_draft(id: &str) -> ResourceRequestDraft {
    ResourceRequestDraft {
        resource_request_id: ResourceRequestId::new(id).unwrap(),
        project_name: String::from("Atlas Migration"),
        ust_role: String::from("Backend Engineer"),
        city: String::from("Kochi"),
        country: String::from("India"),
        job_grade: String::from("B2"),
        account_name: String::from("Northwind"),
        job_description: None,
        priority: Priority::P2,
        hm_id: EmployeeId::new(300),
        wfm_id: EmployeeId::new(200),
        mandatory_skills: vec![String::from("Rust"), String::from("SQL")],
        optional_skills: Vec::new(),
    }
}

/// Builds an engine over one in-memory database with an open job and two
/// employees.
pub fn create_test_engine() -> TestEngine {
    let store: Persistence = Persistence::new_in_memory().unwrap();
    let audit: Persistence = store.reopen().unwrap();
    let mut engine: TestEngine = WorkflowEngine::new(store, audit, WorkflowConfig::default());

    crate::create_resource_request(&mut engine, &hm(), &create_test_draft(JOB_ID)).unwrap();
    engine.promote_queued_resource_requests().unwrap();

    engine
        .store_mut()
        .save_employee(
            &Employee::new(EmployeeId::new(TP_EMPLOYEE_ID), "Asha Nair", EmployeeType::Tp)
                .with_skills(["rust", "sql"]),
        )
        .unwrap();
    engine
        .store_mut()
        .save_employee(
            &Employee::new(
                EmployeeId::new(NON_TP_EMPLOYEE_ID),
                "Ravi Menon",
                EmployeeType::NonTp,
            )
            .with_skills(["rust"]),
        )
        .unwrap();
    engine
}

/// Creates and submits an application, returning it in its submitted form.
pub fn submit_for(engine: &mut TestEngine, applicant: &IdentityContext) -> ApplicationResponse {
    let draft: ApplicationResponse = create_application(engine, applicant, JOB_ID).unwrap();
    submit_application(engine, applicant, &draft.application_id.to_string())
        .unwrap()
        .application
}
