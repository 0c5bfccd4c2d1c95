// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource request storage tests.

use super::{
    HM_ID, JOB_ID, OTHER_HM_ID, OTHER_JOB_ID, WFM_ID, create_test_job, create_test_persistence,
    job_id, seed_reference_data, test_instant,
};
use crate::Persistence;
use talent_domain::{
    EmployeeId, Ownership, PipelineCounters, Priority, ResourceRequest, ResourceRequestChange,
    ResourceRequestField, ResourceRequestUpdate,
};
use talent_workflow::{ModifyOutcome, ResourceRequestRepository, StoreError};

#[test]
fn test_insert_and_find_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let job: ResourceRequest = create_test_job(JOB_ID, HM_ID, WFM_ID);

    persistence.insert_resource_request(&job).unwrap();

    assert_eq!(
        persistence.find_resource_request(&job_id(JOB_ID)).unwrap(),
        Some(job)
    );
    assert_eq!(
        persistence.find_resource_request(&job_id("RR-404")).unwrap(),
        None
    );
}

#[test]
fn test_duplicate_business_key_conflicts() {
    let mut persistence: Persistence = create_test_persistence();
    let job: ResourceRequest = create_test_job(JOB_ID, HM_ID, WFM_ID);
    persistence.insert_resource_request(&job).unwrap();

    let result: Result<(), StoreError> = persistence.insert_resource_request(&job);

    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[test]
fn test_write_pipeline_counters_overwrites_all_counters() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let counters: PipelineCounters = PipelineCounters {
        resources_in_propose: 2,
        resources_in_internal_interview: 1,
        resources_in_customer_interview: 2,
        resources_in_hm_check: 1,
        resources_in_allocated: 1,
        resources_in_reject: 1,
        resources_in_not_allocated: 6,
        resources_in_accept: 1,
    };

    let written: bool = persistence
        .write_pipeline_counters(&job_id(JOB_ID), &counters, test_instant(9), "system")
        .unwrap();

    assert!(written);
    let stored: ResourceRequest = persistence
        .find_resource_request(&job_id(JOB_ID))
        .unwrap()
        .unwrap();
    assert_eq!(stored.counters, counters);
    assert_eq!(stored.last_updated, Some(test_instant(9)));
    assert_eq!(stored.last_updated_by.as_deref(), Some("system"));
}

#[test]
fn test_write_pipeline_counters_for_missing_job_returns_false() {
    let mut persistence: Persistence = create_test_persistence();
    let written: bool = persistence
        .write_pipeline_counters(
            &job_id("RR-404"),
            &PipelineCounters::default(),
            test_instant(0),
            "system",
        )
        .unwrap();
    assert!(!written);
}

#[test]
fn test_modify_owned_merges_and_keeps_counters() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let counters: PipelineCounters = PipelineCounters {
        resources_in_propose: 3,
        ..PipelineCounters::default()
    };
    persistence
        .write_pipeline_counters(&job_id(JOB_ID), &counters, test_instant(1), "system")
        .unwrap();

    let change: ResourceRequestChange = ResourceRequestChange::Merge(ResourceRequestUpdate {
        city: Some(String::from("Pune")),
        priority: Some(Priority::P1),
        mandatory_skills: Some(vec![String::from("Go")]),
        ..ResourceRequestUpdate::default()
    });
    let outcome: ModifyOutcome = persistence
        .modify_owned_resource_request(&job_id(JOB_ID), EmployeeId::new(HM_ID), &change)
        .unwrap();

    let ModifyOutcome::Applied(updated) = outcome else {
        panic!("expected the change to apply, got {outcome:?}");
    };
    assert_eq!(updated.city, "Pune");
    let stored: ResourceRequest = persistence
        .find_resource_request(&job_id(JOB_ID))
        .unwrap()
        .unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.priority, Priority::P1);
    assert_eq!(stored.mandatory_skills, vec![String::from("Go")]);
    assert_eq!(stored.counters, counters);
}

#[test]
fn test_modify_owned_refuses_other_hm_without_writing() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let before: ResourceRequest = persistence
        .find_resource_request(&job_id(OTHER_JOB_ID))
        .unwrap()
        .unwrap();

    let outcome: ModifyOutcome = persistence
        .modify_owned_resource_request(
            &job_id(OTHER_JOB_ID),
            EmployeeId::new(HM_ID),
            &ResourceRequestChange::Deactivate,
        )
        .unwrap();

    assert_eq!(outcome, ModifyOutcome::NotOwner);
    assert_eq!(
        persistence
            .find_resource_request(&job_id(OTHER_JOB_ID))
            .unwrap(),
        Some(before)
    );
}

#[test]
fn test_modify_owned_reports_missing_and_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    let missing: ModifyOutcome = persistence
        .modify_owned_resource_request(
            &job_id("RR-404"),
            EmployeeId::new(HM_ID),
            &ResourceRequestChange::Deactivate,
        )
        .unwrap();
    assert_eq!(missing, ModifyOutcome::NotFound);

    let blank: ModifyOutcome = persistence
        .modify_owned_resource_request(
            &job_id(JOB_ID),
            EmployeeId::new(HM_ID),
            &ResourceRequestChange::SetField(ResourceRequestField::ProjectName(String::from(
                "  ",
            ))),
        )
        .unwrap();
    assert!(matches!(blank, ModifyOutcome::Rejected(_)));
    assert_eq!(
        persistence
            .find_resource_request(&job_id(JOB_ID))
            .unwrap()
            .unwrap()
            .project_name,
        "Atlas Migration"
    );
}

#[test]
fn test_deactivate_clears_flag() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    persistence
        .modify_owned_resource_request(
            &job_id(JOB_ID),
            EmployeeId::new(HM_ID),
            &ResourceRequestChange::Deactivate,
        )
        .unwrap();

    assert!(
        !persistence
            .find_resource_request(&job_id(JOB_ID))
            .unwrap()
            .unwrap()
            .flag
    );
}

#[test]
fn test_owned_by_matches_the_right_column() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    let hm_jobs: Vec<ResourceRequest> = persistence
        .resource_requests_owned_by(Ownership::HiringManager(EmployeeId::new(OTHER_HM_ID)))
        .unwrap();
    let wfm_jobs: Vec<ResourceRequest> = persistence
        .resource_requests_owned_by(Ownership::WorkforceManager(EmployeeId::new(WFM_ID)))
        .unwrap();
    let nobody: Vec<ResourceRequest> = persistence
        .resource_requests_owned_by(Ownership::WorkforceManager(EmployeeId::new(HM_ID)))
        .unwrap();

    assert_eq!(hm_jobs.len(), 1);
    assert_eq!(hm_jobs[0].resource_request_id, job_id(OTHER_JOB_ID));
    assert_eq!(wfm_jobs.len(), 2);
    assert!(nobody.is_empty());
    assert_eq!(
        persistence.resource_request_ids().unwrap(),
        vec![job_id(JOB_ID), job_id(OTHER_JOB_ID)]
    );
}
