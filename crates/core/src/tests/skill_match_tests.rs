// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    JOB_ID, NON_TP_EMPLOYEE_ID, OTHER_JOB_ID, TP_EMPLOYEE_ID, TestEngine, actor, admin,
    create_test_engine, hm, job_id, other_wfm, tp_manager, wfm,
};
use crate::{ErrorKind, SkillMatchReport, WorkflowError};
use talent_domain::{ApplicationId, ApplicationStatus, Role};

fn seed_candidates(engine: &mut TestEngine) -> (ApplicationId, ApplicationId) {
    let partial: ApplicationId = engine.store_mut().seed_application(
        TP_EMPLOYEE_ID,
        JOB_ID,
        ApplicationStatus::Submitted,
        None,
    );
    let full: ApplicationId = engine.store_mut().seed_application(
        NON_TP_EMPLOYEE_ID,
        JOB_ID,
        ApplicationStatus::Submitted,
        None,
    );
    // Not yet submitted, and a ghost employee: neither is scored.
    engine
        .store_mut()
        .seed_application(77, JOB_ID, ApplicationStatus::Draft, None);
    engine
        .store_mut()
        .seed_application(4242, JOB_ID, ApplicationStatus::Submitted, None);
    (partial, full)
}

#[test]
fn test_candidates_are_scored_and_sorted() {
    let mut engine: TestEngine = create_test_engine();
    let (partial, full) = seed_candidates(&mut engine);

    let report: SkillMatchReport = engine.skill_matches(&job_id(JOB_ID), None, &wfm()).unwrap();

    assert_eq!(report.job_title, "Backend Engineer");
    assert_eq!(report.required_skills, vec!["java", "sql"]);
    assert_eq!(report.total_applications, 3);
    assert_eq!(report.candidates_returned, 2);

    let best = &report.candidates[0];
    assert_eq!(best.application_id, full);
    assert!((best.match_percentage - 100.0).abs() < f64::EPSILON);
    assert!(best.missing_skills.is_empty());

    let next = &report.candidates[1];
    assert_eq!(next.application_id, partial);
    assert_eq!(next.employee_name, "Asha Nair");
    assert_eq!(next.designation.as_deref(), Some("Developer"));
    assert_eq!(next.location.as_deref(), Some("Kochi"));
    assert!((next.match_percentage - 50.0).abs() < f64::EPSILON);
    assert_eq!(next.matched_skills, vec!["java"]);
    assert_eq!(next.missing_skills, vec!["sql"]);
    assert_eq!(next.total_required_skills, 2);
    assert_eq!(next.skills_matched_count, 1);
}

#[test]
fn test_min_match_filters_candidates() {
    let mut engine: TestEngine = create_test_engine();
    let (_, full) = seed_candidates(&mut engine);

    let report: SkillMatchReport = engine
        .skill_matches(&job_id(JOB_ID), Some(60.0), &hm())
        .unwrap();
    assert_eq!(report.candidates_returned, 1);
    assert_eq!(report.candidates[0].application_id, full);
    assert!(report.min_match.is_some_and(|m| (m - 60.0).abs() < f64::EPSILON));

    let report: SkillMatchReport = engine
        .skill_matches(&job_id(JOB_ID), Some(50.0), &admin())
        .unwrap();
    assert_eq!(report.candidates_returned, 2);
}

#[test]
fn test_min_match_out_of_range_is_invalid() {
    let mut engine: TestEngine = create_test_engine();
    for bad in [-1.0, 100.5, f64::NAN] {
        let err: WorkflowError = engine
            .skill_matches(&job_id(JOB_ID), Some(bad), &wfm())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }
}

#[test]
fn test_skill_match_access() {
    let mut engine: TestEngine = create_test_engine();

    let err: WorkflowError = engine
        .skill_matches(&job_id(JOB_ID), None, &other_wfm())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    for who in [tp_manager(), actor(TP_EMPLOYEE_ID, Role::Tp)] {
        let err: WorkflowError = engine
            .skill_matches(&job_id(JOB_ID), None, &who)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    let err: WorkflowError = engine
        .skill_matches(&job_id("RR-404"), None, &admin())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let report: SkillMatchReport = engine
        .skill_matches(&job_id(OTHER_JOB_ID), None, &admin())
        .unwrap();
    assert!(report.candidates.is_empty());
}
