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

mod apply;
mod authorization;
mod bulk;
mod command;
mod config;
mod engine;
mod error;
mod listing;
mod repository;
mod resource_requests;
mod skill_match;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{TransitionContext, apply};
pub use authorization::{
    authorize_bulk, authorize_command, bulk_actions_for, ensure_job_owner, owns_job,
};
pub use command::{BulkAction, Command};
pub use config::{STATS_UPDATED_BY, WorkflowConfig};
pub use engine::WorkflowEngine;
pub use error::{ErrorKind, StoreError, WorkflowError};
pub use repository::{
    ApplicationQuery, ApplicationRepository, EmployeeRepository, IngestionQueue, IngestionTicket,
    ModifyOutcome, PageRequest, Paged, ResourceRequestRepository, WorkflowStore,
};
pub use state::{
    ApplicationPage, BulkItemOutcome, BulkItemStatus, BulkOutcome, CandidateMatch,
    PromotionReport, QueuedResourceRequest, SkillMatchReport, TransitionOutcome, TransitionResult,
};
