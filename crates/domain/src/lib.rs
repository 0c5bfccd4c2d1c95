// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod application_status;
mod employee;
mod error;
mod pipeline;
mod resource_request;
mod skills;
mod types;

#[cfg(test)]
mod tests;

pub use application::{
    Application, ApplicationChange, NewApplication, TransitionStamp, TransitionStamps,
};
pub use application_status::ApplicationStatus;
pub use employee::Employee;
pub use error::DomainError;
pub use pipeline::{PipelineCounters, PipelineTally};
pub use resource_request::{
    ResourceRequest, ResourceRequestChange, ResourceRequestDraft, ResourceRequestField,
    ResourceRequestUpdate,
};
pub use skills::{SkillScore, normalize_skills, score_skills, split_skill_text, validate_min_match};
pub use types::{
    Actor, ApplicationId, EmployeeId, EmployeeType, InterviewType, Ownership, Priority,
    ResourceRequestId, Role,
};
