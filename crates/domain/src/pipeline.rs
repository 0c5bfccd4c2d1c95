// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived pipeline counters for a resource request.
//!
//! Counters are a pure function of the job's applications. The store
//! supplies two aggregations (count by status, and count of `Interview`
//! applications by interview type) and [`PipelineCounters::from_tally`]
//! turns them into the stored counter set.

use crate::application::Application;
use crate::application_status::ApplicationStatus;
use crate::types::InterviewType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Application counts for one job, grouped the way the counters need them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineTally {
    by_status: BTreeMap<ApplicationStatus, u32>,
    internal_interviews: u32,
    customer_interviews: u32,
}

impl PipelineTally {
    /// Builds a tally from the store's two grouped aggregations.
    ///
    /// Interview rows without an interview type land in neither bucket.
    #[must_use]
    pub fn from_groups(
        status_counts: &[(ApplicationStatus, u32)],
        interview_counts: &[(Option<InterviewType>, u32)],
    ) -> Self {
        let mut tally: Self = Self::default();
        for (status, count) in status_counts {
            *tally.by_status.entry(*status).or_insert(0) += count;
        }
        for (interview_type, count) in interview_counts {
            match interview_type {
                Some(InterviewType::Internal) => tally.internal_interviews += count,
                Some(InterviewType::Customer) => tally.customer_interviews += count,
                None => {}
            }
        }
        tally
    }

    /// Builds a tally by scanning applications directly.
    #[must_use]
    pub fn from_applications<'a, I>(applications: I) -> Self
    where
        I: IntoIterator<Item = &'a Application>,
    {
        let mut tally: Self = Self::default();
        for application in applications {
            *tally.by_status.entry(application.status).or_insert(0) += 1;
            if application.status == ApplicationStatus::Interview {
                match application.interview_type {
                    Some(InterviewType::Internal) => tally.internal_interviews += 1,
                    Some(InterviewType::Customer) => tally.customer_interviews += 1,
                    None => {}
                }
            }
        }
        tally
    }

    #[must_use]
    pub fn count(&self, status: ApplicationStatus) -> u32 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Stored pipeline counters of a resource request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCounters {
    pub resources_in_propose: u32,
    pub resources_in_internal_interview: u32,
    pub resources_in_customer_interview: u32,
    pub resources_in_hm_check: u32,
    pub resources_in_allocated: u32,
    pub resources_in_reject: u32,
    pub resources_in_not_allocated: u32,
    pub resources_in_accept: u32,
}

impl PipelineCounters {
    /// Field names of the counters, as stored and serialized.
    pub const FIELD_NAMES: [&'static str; 8] = [
        "resources_in_propose",
        "resources_in_internal_interview",
        "resources_in_customer_interview",
        "resources_in_hm_check",
        "resources_in_allocated",
        "resources_in_reject",
        "resources_in_not_allocated",
        "resources_in_accept",
    ];

    /// Computes the counters from a tally.
    ///
    /// `hm_check` and `accept` both count `Selected` applications.
    /// `not_allocated` is everything still in flight past submission.
    #[must_use]
    pub fn from_tally(tally: &PipelineTally) -> Self {
        let shortlisted: u32 = tally.count(ApplicationStatus::Shortlisted);
        let interview: u32 = tally.count(ApplicationStatus::Interview);
        let selected: u32 = tally.count(ApplicationStatus::Selected);

        Self {
            resources_in_propose: shortlisted,
            resources_in_internal_interview: tally.internal_interviews,
            resources_in_customer_interview: tally.customer_interviews,
            resources_in_hm_check: selected,
            resources_in_allocated: tally.count(ApplicationStatus::Allocated),
            resources_in_reject: tally.count(ApplicationStatus::Rejected),
            resources_in_not_allocated: shortlisted + interview + selected,
            resources_in_accept: selected,
        }
    }
}
