// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::{authorize_job_view, authorize_job_view_role};
use crate::engine::WorkflowEngine;
use crate::error::WorkflowError;
use crate::repository::WorkflowStore;
use crate::state::{CandidateMatch, SkillMatchReport};
use std::collections::BTreeSet;
use talent_audit::AuditLog;
use talent_domain::{
    Actor, Application, ApplicationStatus, Employee, ResourceRequest, ResourceRequestId,
    SkillScore, normalize_skills, score_skills, validate_min_match,
};
use tracing::debug;

impl<S: WorkflowStore, A: AuditLog> WorkflowEngine<S, A> {
    /// Scores the job's submitted candidates against its mandatory skills.
    ///
    /// Candidates whose employee record does not resolve are left out.
    /// The result is sorted by match percentage, highest first; ties keep
    /// application order.
    ///
    /// # Arguments
    ///
    /// * `job_rr_id` - The job to score against
    /// * `min_match` - Optional lower bound on match percentage (0..=100)
    /// * `actor` - The principal requesting the report
    ///
    /// # Errors
    ///
    /// * `Unauthorized` for roles other than WFM, HM and Admin
    /// * `Invalid` if `min_match` is outside 0..=100
    /// * `NotFound` if the job does not exist
    /// * `Forbidden` if a WFM or HM does not own the job
    pub fn skill_matches(
        &mut self,
        job_rr_id: &ResourceRequestId,
        min_match: Option<f64>,
        actor: &Actor,
    ) -> Result<SkillMatchReport, WorkflowError> {
        authorize_job_view_role(actor)?;
        let min_match: Option<f64> = validate_min_match(min_match)?;
        let job: ResourceRequest = self.load_job(job_rr_id)?;
        authorize_job_view(actor, &job)?;

        let required: BTreeSet<String> = normalize_skills(&job.mandatory_skills);
        let applications: Vec<Application> = self
            .store
            .applications_for_job(job_rr_id, ApplicationStatus::Submitted)?;

        let mut candidates: Vec<CandidateMatch> = Vec::with_capacity(applications.len());
        for application in &applications {
            let Some(employee) = self.store.find_employee(application.employee_id)? else {
                debug!(
                    application_id = application.id.value(),
                    employee_id = application.employee_id.value(),
                    "Skipping candidate without employee record"
                );
                continue;
            };
            let score: SkillScore = score_skills(
                &required,
                &normalize_skills(&employee.detailed_skills),
            );
            if min_match.is_some_and(|threshold| score.match_percentage < threshold) {
                continue;
            }
            candidates.push(candidate_match(application, employee, score));
        }

        candidates.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));

        Ok(SkillMatchReport {
            job_rr_id: job.resource_request_id,
            job_title: job.ust_role,
            total_applications: applications.len(),
            candidates_returned: candidates.len(),
            required_skills: required.into_iter().collect(),
            min_match,
            candidates,
        })
    }
}

fn candidate_match(application: &Application, employee: Employee, score: SkillScore) -> CandidateMatch {
    let skills_matched_count: usize = score.matched_count();
    CandidateMatch {
        application_id: application.id,
        employee_id: employee.employee_id,
        employee_name: employee.employee_name,
        designation: employee.designation,
        location: employee.city,
        match_percentage: score.match_percentage,
        matched_skills: score.matched,
        missing_skills: score.missing,
        total_required_skills: score.total_required,
        skills_matched_count,
    }
}
