// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod application_tests;
mod ingestion_tests;
mod resource_request_tests;

use crate::Persistence;
use talent_domain::{
    Actor, Application, ApplicationChange, ApplicationId, ApplicationStatus, Employee, EmployeeId,
    EmployeeType, NewApplication, Priority, ResourceRequest, ResourceRequestDraft,
    ResourceRequestId, Role, TransitionStamp,
};
use talent_workflow::{ApplicationRepository, EmployeeRepository, ResourceRequestRepository};
use time::{Duration, OffsetDateTime};

pub const TP_MANAGER_ID: i64 = 100;
pub const WFM_ID: i64 = 200;
pub const HM_ID: i64 = 300;
pub const OTHER_HM_ID: i64 = 301;
pub const TP_EMPLOYEE_ID: i64 = 1001;
pub const NON_TP_EMPLOYEE_ID: i64 = 1002;
pub const JOB_ID: &str = "RR-1001";
pub const OTHER_JOB_ID: &str = "RR-2002";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn job_id(id: &str) -> ResourceRequestId {
    ResourceRequestId::new(id).unwrap()
}

/// A fixed instant with whole-microsecond precision, so it survives storage.
pub fn test_instant(minutes: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap() + Duration::minutes(minutes)
}

pub fn actor(id: i64, role: Role) -> Actor {
    Actor::new(EmployeeId::new(id), role)
}

pub fn create_test_draft(id: &str, hm_id: i64, wfm_id: i64) -> ResourceRequestDraft {
    ResourceRequestDraft {
        resource_request_id: job_id(id),
        project_name: String::from("Atlas Migration"),
        ust_role: String::from("Backend Engineer"),
        city: String::from("Kochi"),
        country: String::from("India"),
        job_grade: String::from("B2"),
        account_name: String::from("Northwind"),
        job_description: Some(String::from("Services in Rust")),
        priority: Priority::P2,
        hm_id: EmployeeId::new(hm_id),
        wfm_id: EmployeeId::new(wfm_id),
        mandatory_skills: vec![String::from("Rust"), String::from("SQL")],
        optional_skills: vec![String::from("Kafka")],
    }
}

pub fn create_test_job(id: &str, hm_id: i64, wfm_id: i64) -> ResourceRequest {
    create_test_draft(id, hm_id, wfm_id).into_resource_request()
}

/// Seeds two jobs and both employees.
pub fn seed_reference_data(persistence: &mut Persistence) {
    persistence
        .insert_resource_request(&create_test_job(JOB_ID, HM_ID, WFM_ID))
        .unwrap();
    persistence
        .insert_resource_request(&create_test_job(OTHER_JOB_ID, OTHER_HM_ID, WFM_ID))
        .unwrap();
    persistence
        .save_employee(
            &Employee::new(EmployeeId::new(TP_EMPLOYEE_ID), "Asha Nair", EmployeeType::Tp)
                .with_skills(["rust", "sql"]),
        )
        .unwrap();
    persistence
        .save_employee(
            &Employee::new(
                EmployeeId::new(NON_TP_EMPLOYEE_ID),
                "Ravi Menon",
                EmployeeType::NonTp,
            )
            .with_skills(["java"]),
        )
        .unwrap();
}

pub fn insert_draft(persistence: &mut Persistence, employee_id: i64, job: &str) -> Application {
    persistence
        .insert_application(&NewApplication {
            employee_id: EmployeeId::new(employee_id),
            job_rr_id: job_id(job),
            created_at: test_instant(0),
        })
        .unwrap()
}

/// Walks an application along the given stamps, asserting every step lands.
pub fn advance(persistence: &mut Persistence, id: ApplicationId, stamps: Vec<TransitionStamp>) {
    for stamp in stamps {
        let current: ApplicationStatus = persistence.find_application(id).unwrap().unwrap().status;
        let change: ApplicationChange = ApplicationChange::new(current, stamp);
        assert!(persistence.compare_and_set(id, &change).unwrap());
    }
}

pub fn submitted(minutes: i64) -> TransitionStamp {
    TransitionStamp::Submitted {
        at: test_instant(minutes),
    }
}

pub fn shortlisted(minutes: i64) -> TransitionStamp {
    TransitionStamp::Shortlisted {
        by: EmployeeId::new(TP_MANAGER_ID),
        at: test_instant(minutes),
    }
}
