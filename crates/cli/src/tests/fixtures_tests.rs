// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use talent_domain::{EmployeeId, EmployeeType, ResourceRequestId};
use talent_persistence::Persistence;
use talent_workflow::{
    EmployeeRepository, PromotionReport, ResourceRequestRepository, WorkflowConfig,
    WorkflowEngine,
};

use crate::fixtures::{Fixtures, apply_fixtures};

const FIXTURES: &str = r#"{
    "employees": [
        {
            "employee_id": 1001,
            "employee_name": "Asha Nair",
            "employee_type": "TP",
            "designation": "Senior Engineer",
            "detailed_skills": ["Rust", "SQL"]
        },
        {
            "employee_id": 1002,
            "employee_name": "Ravi Menon",
            "employee_type": "Non TP"
        }
    ],
    "resource_requests": [
        {
            "resource_request_id": "RR-1001",
            "project_name": "Atlas Migration",
            "ust_role": "Backend Engineer",
            "priority": "P1",
            "hm_id": 300,
            "wfm_id": 200,
            "mandatory_skills": ["Rust"],
            "optional_skills": []
        }
    ]
}"#;

fn create_test_engine() -> WorkflowEngine<Persistence, Persistence> {
    let store: Persistence = Persistence::new_in_memory().unwrap();
    let audit: Persistence = store.reopen().unwrap();
    WorkflowEngine::new(store, audit, WorkflowConfig::default())
}

#[test]
fn test_parses_fixture_document() {
    let fixtures: Fixtures = Fixtures::from_json(FIXTURES).unwrap();
    assert_eq!(fixtures.employees.len(), 2);
    assert_eq!(fixtures.resource_requests.len(), 1);

    let employee = fixtures.employees[0].to_employee().unwrap();
    assert_eq!(employee.employee_type, EmployeeType::Tp);
    assert_eq!(employee.designation.as_deref(), Some("Senior Engineer"));
    assert_eq!(employee.detailed_skills, vec!["Rust", "SQL"]);
}

#[test]
fn test_rejects_unknown_employee_type() {
    let fixtures: Fixtures = Fixtures::from_json(
        r#"{"employees":[{"employee_id":1,"employee_name":"X","employee_type":"Contractor"}]}"#,
    )
    .unwrap();
    assert!(fixtures.employees[0].to_employee().is_err());
}

#[test]
fn test_rejects_resource_request_without_title() {
    let text: String = FIXTURES.replace("\"Backend Engineer\"", "\"  \"");
    assert!(Fixtures::from_json(&text).is_err());
}

#[test]
fn test_apply_loads_employees_and_promotes_requests() {
    let mut engine = create_test_engine();
    let fixtures: Fixtures = Fixtures::from_json(FIXTURES).unwrap();

    let report: PromotionReport = apply_fixtures(&mut engine, &fixtures).unwrap();
    assert_eq!(
        report.promoted,
        vec![ResourceRequestId::new("RR-1001").unwrap()]
    );
    assert!(report.duplicates.is_empty());

    let store: &mut Persistence = engine.store_mut();
    assert!(store.find_employee(EmployeeId::new(1002)).unwrap().is_some());
    let rr = store
        .find_resource_request(&ResourceRequestId::new("RR-1001").unwrap())
        .unwrap()
        .unwrap();
    assert!(rr.flag);
    assert_eq!(rr.hm_id, EmployeeId::new(300));
}

#[test]
fn test_reapplying_reports_duplicates() {
    let mut engine = create_test_engine();
    let fixtures: Fixtures = Fixtures::from_json(FIXTURES).unwrap();
    apply_fixtures(&mut engine, &fixtures).unwrap();

    let report: PromotionReport = apply_fixtures(&mut engine, &fixtures).unwrap();
    assert!(report.promoted.is_empty());
    assert_eq!(report.duplicates.len(), 1);
}
