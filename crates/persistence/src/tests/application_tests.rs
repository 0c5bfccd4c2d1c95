// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application storage tests.

use super::{
    HM_ID, JOB_ID, NON_TP_EMPLOYEE_ID, OTHER_JOB_ID, TP_EMPLOYEE_ID, TP_MANAGER_ID, WFM_ID,
    advance, create_test_persistence, insert_draft, job_id, seed_reference_data, shortlisted,
    submitted, test_instant,
};
use crate::Persistence;
use talent_domain::{
    Application, ApplicationChange, ApplicationId, ApplicationStatus, EmployeeId, EmployeeType,
    InterviewType, NewApplication, Ownership, TransitionStamp,
};
use talent_workflow::{ApplicationQuery, ApplicationRepository, PageRequest, Paged, StoreError};

fn seeded() -> Persistence {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    persistence
}

fn select_stamps() -> Vec<TransitionStamp> {
    vec![
        submitted(1),
        shortlisted(2),
        TransitionStamp::InterviewScheduled {
            by: EmployeeId::new(WFM_ID),
            at: test_instant(3),
            interview_type: InterviewType::Customer,
        },
        TransitionStamp::Selected {
            by: EmployeeId::new(WFM_ID),
            at: test_instant(4),
        },
    ]
}

#[test]
fn test_insert_application_assigns_id_and_draft_status() {
    let mut persistence: Persistence = seeded();

    let first: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    let second: Application = insert_draft(&mut persistence, NON_TP_EMPLOYEE_ID, JOB_ID);

    assert_eq!(first.status, ApplicationStatus::Draft);
    assert_eq!(first.created_at, test_instant(0));
    assert_eq!(first.updated_at, test_instant(0));
    assert!(second.id > first.id);
    assert_eq!(
        persistence.find_application(first.id).unwrap(),
        Some(first)
    );
}

#[test]
fn test_find_missing_application_returns_none() {
    let mut persistence: Persistence = seeded();
    assert_eq!(
        persistence.find_application(ApplicationId::new(999)).unwrap(),
        None
    );
}

#[test]
fn test_second_active_application_for_same_job_conflicts() {
    let mut persistence: Persistence = seeded();
    insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);

    let result: Result<Application, StoreError> =
        persistence.insert_application(&NewApplication {
            employee_id: EmployeeId::new(TP_EMPLOYEE_ID),
            job_rr_id: job_id(JOB_ID),
            created_at: test_instant(5),
        });

    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[test]
fn test_reapply_after_withdrawal_is_allowed() {
    let mut persistence: Persistence = seeded();
    let first: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    advance(
        &mut persistence,
        first.id,
        vec![TransitionStamp::Withdrawn {
            at: test_instant(1),
        }],
    );

    let second: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);

    assert_ne!(first.id, second.id);
    assert_eq!(
        persistence
            .find_active_application(EmployeeId::new(TP_EMPLOYEE_ID), &job_id(JOB_ID))
            .unwrap()
            .map(|a| a.id),
        Some(second.id)
    );
}

#[test]
fn test_application_for_unknown_job_is_rejected_by_foreign_key() {
    let mut persistence: Persistence = seeded();
    let result: Result<Application, StoreError> =
        persistence.insert_application(&NewApplication {
            employee_id: EmployeeId::new(TP_EMPLOYEE_ID),
            job_rr_id: job_id("RR-404"),
            created_at: test_instant(0),
        });
    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}

#[test]
fn test_compare_and_set_writes_stamps() {
    let mut persistence: Persistence = seeded();
    let app: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);

    advance(&mut persistence, app.id, select_stamps());

    let stored: Application = persistence.find_application(app.id).unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Selected);
    assert_eq!(stored.interview_type, Some(InterviewType::Customer));
    assert_eq!(stored.submitted_at, Some(test_instant(1)));
    assert_eq!(
        stored.stamps.shortlisted_by,
        Some(EmployeeId::new(TP_MANAGER_ID))
    );
    assert_eq!(stored.stamps.interview_scheduled_at, Some(test_instant(3)));
    assert_eq!(stored.stamps.selected_by, Some(EmployeeId::new(WFM_ID)));
    assert_eq!(stored.updated_at, test_instant(4));
}

#[test]
fn test_compare_and_set_with_stale_status_writes_nothing() {
    let mut persistence: Persistence = seeded();
    let app: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);

    let stale: ApplicationChange =
        ApplicationChange::new(ApplicationStatus::Submitted, shortlisted(1));

    assert!(!persistence.compare_and_set(app.id, &stale).unwrap());
    assert_eq!(
        persistence.find_application(app.id).unwrap().unwrap(),
        app
    );
}

#[test]
fn test_compare_and_set_on_missing_application_returns_false() {
    let mut persistence: Persistence = seeded();
    let change: ApplicationChange =
        ApplicationChange::new(ApplicationStatus::Draft, submitted(1));
    assert!(
        !persistence
            .compare_and_set(ApplicationId::new(42), &change)
            .unwrap()
    );
}

#[test]
fn test_rejection_reason_is_stored() {
    let mut persistence: Persistence = seeded();
    let app: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    advance(
        &mut persistence,
        app.id,
        vec![
            submitted(1),
            TransitionStamp::Rejected {
                by: EmployeeId::new(TP_MANAGER_ID),
                at: test_instant(2),
                reason: Some(String::from("Skills gap")),
            },
        ],
    );

    let stored: Application = persistence.find_application(app.id).unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Rejected);
    assert_eq!(stored.stamps.rejection_reason.as_deref(), Some("Skills gap"));
}

#[test]
fn test_second_allocation_violates_unique_index() {
    let mut persistence: Persistence = seeded();
    let first: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    let second: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, OTHER_JOB_ID);
    advance(&mut persistence, first.id, select_stamps());
    advance(&mut persistence, second.id, select_stamps());

    let allocate = |minutes: i64| {
        ApplicationChange::new(
            ApplicationStatus::Selected,
            TransitionStamp::Allocated {
                by: EmployeeId::new(HM_ID),
                at: test_instant(minutes),
            },
        )
    };

    assert!(persistence.compare_and_set(first.id, &allocate(5)).unwrap());
    let result: Result<bool, StoreError> = persistence.compare_and_set(second.id, &allocate(6));

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert_eq!(
        persistence.find_application(second.id).unwrap().unwrap().status,
        ApplicationStatus::Selected
    );
    assert_eq!(
        persistence
            .find_allocated_application(EmployeeId::new(TP_EMPLOYEE_ID))
            .unwrap()
            .map(|a| a.id),
        Some(first.id)
    );
}

#[test]
fn test_counts_group_by_status_and_interview_type() {
    let mut persistence: Persistence = seeded();
    let a: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    let b: Application = insert_draft(&mut persistence, NON_TP_EMPLOYEE_ID, JOB_ID);
    let c: Application = insert_draft(&mut persistence, 1003, JOB_ID);
    insert_draft(&mut persistence, 1004, OTHER_JOB_ID);

    advance(&mut persistence, a.id, vec![submitted(1), shortlisted(2)]);
    for (id, interview_type) in [(b.id, InterviewType::Internal), (c.id, InterviewType::Internal)] {
        advance(
            &mut persistence,
            id,
            vec![
                submitted(1),
                shortlisted(2),
                TransitionStamp::InterviewScheduled {
                    by: EmployeeId::new(WFM_ID),
                    at: test_instant(3),
                    interview_type,
                },
            ],
        );
    }

    let mut by_status: Vec<(ApplicationStatus, u32)> =
        persistence.count_by_status(&job_id(JOB_ID)).unwrap();
    by_status.sort();
    assert_eq!(
        by_status,
        vec![
            (ApplicationStatus::Shortlisted, 1),
            (ApplicationStatus::Interview, 2)
        ]
    );
    assert_eq!(
        persistence
            .count_interviews_by_type(&job_id(JOB_ID))
            .unwrap(),
        vec![(Some(InterviewType::Internal), 2)]
    );
}

#[test]
fn test_applications_for_job_filters_status_in_id_order() {
    let mut persistence: Persistence = seeded();
    let a: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    let b: Application = insert_draft(&mut persistence, NON_TP_EMPLOYEE_ID, JOB_ID);
    insert_draft(&mut persistence, 1003, JOB_ID);
    advance(&mut persistence, b.id, vec![submitted(1)]);
    advance(&mut persistence, a.id, vec![submitted(2)]);

    let ids: Vec<ApplicationId> = persistence
        .applications_for_job(&job_id(JOB_ID), ApplicationStatus::Submitted)
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn test_query_applications_filters_and_orders() {
    let mut persistence: Persistence = seeded();
    let tp_job: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, JOB_ID);
    let non_tp_job: Application = insert_draft(&mut persistence, NON_TP_EMPLOYEE_ID, JOB_ID);
    let tp_other: Application = insert_draft(&mut persistence, TP_EMPLOYEE_ID, OTHER_JOB_ID);
    advance(&mut persistence, tp_job.id, vec![submitted(3)]);
    advance(&mut persistence, non_tp_job.id, vec![submitted(1)]);
    advance(&mut persistence, tp_other.id, vec![submitted(2)]);

    let tp_submitted: Paged<Application> = persistence
        .query_applications(
            &ApplicationQuery {
                statuses: vec![ApplicationStatus::Submitted],
                employee_type: Some(EmployeeType::Tp),
                ..ApplicationQuery::default()
            },
            PageRequest {
                offset: 0,
                limit: 10,
            },
        )
        .unwrap();
    assert_eq!(tp_submitted.total, 2);
    assert_eq!(
        tp_submitted.items.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![tp_job.id, tp_other.id]
    );

    let hm_owned: Paged<Application> = persistence
        .query_applications(
            &ApplicationQuery {
                owner: Some(Ownership::HiringManager(EmployeeId::new(HM_ID))),
                ..ApplicationQuery::default()
            },
            PageRequest {
                offset: 0,
                limit: 10,
            },
        )
        .unwrap();
    assert_eq!(hm_owned.total, 2);
    assert!(hm_owned.items.iter().all(|a| a.job_rr_id == job_id(JOB_ID)));

    let wfm_owned: Paged<Application> = persistence
        .query_applications(
            &ApplicationQuery {
                owner: Some(Ownership::WorkforceManager(EmployeeId::new(WFM_ID))),
                job_rr_id: Some(job_id(OTHER_JOB_ID)),
                ..ApplicationQuery::default()
            },
            PageRequest {
                offset: 0,
                limit: 10,
            },
        )
        .unwrap();
    assert_eq!(wfm_owned.total, 1);
    assert_eq!(wfm_owned.items[0].id, tp_other.id);
}

#[test]
fn test_query_applications_pages_with_unpaged_total() {
    let mut persistence: Persistence = seeded();
    for employee_id in 2001..2006 {
        let app: Application = insert_draft(&mut persistence, employee_id, JOB_ID);
        advance(&mut persistence, app.id, vec![submitted(employee_id - 2000)]);
    }

    let page: Paged<Application> = persistence
        .query_applications(
            &ApplicationQuery::default(),
            PageRequest {
                offset: 4,
                limit: 2,
            },
        )
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].employee_id, EmployeeId::new(2001));
}
