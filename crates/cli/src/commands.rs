// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand execution.

use color_eyre::Result;
use serde::Serialize;
use talent_api::{
    ApplicationPageResponse, AuditListRequest, BulkTransitionRequest, IdentityContext,
    InterviewRequest, ListApplicationsRequest, PageParams, RejectRequest, SkillMatchRequest,
    StatsResponse, TransitionResponse,
};
use talent_domain::{PipelineCounters, ResourceRequestId};
use talent_persistence::Persistence;
use talent_workflow::{PromotionReport, WorkflowConfig, WorkflowEngine};
use tracing::{info, warn};

use crate::cli::{Args, Command, TransitionAction};
use crate::fixtures::{Fixtures, apply_fixtures};

type Engine = WorkflowEngine<Persistence, Persistence>;

/// Opens the store and builds an engine whose audit sink shares it.
fn open_engine(args: &Args) -> Result<Engine> {
    let store: Persistence = match &args.database {
        Some(path) => {
            info!(path = %path.display(), "Using file-based database");
            Persistence::new_with_file(path, &args.store_config())?
        }
        None => {
            warn!("No --database given; using an in-memory database discarded on exit");
            Persistence::new_in_memory()?
        }
    };
    let audit: Persistence = store.reopen()?;
    Ok(WorkflowEngine::new(store, audit, WorkflowConfig::default()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs the parsed command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the operation fails.
pub fn run(args: Args) -> Result<()> {
    let mut engine: Engine = open_engine(&args)?;
    let identity: IdentityContext = args.identity();

    match args.command {
        Command::Init => {
            engine.store_mut().verify_foreign_key_enforcement()?;
            info!("Database initialized");
        }
        Command::LoadFixtures { path } => {
            let fixtures: Fixtures = Fixtures::load(&path)?;
            let report: PromotionReport = apply_fixtures(&mut engine, &fixtures)?;
            info!(
                employees = fixtures.employees.len(),
                resource_requests = report.promoted.len(),
                duplicates = report.duplicates.len(),
                "Fixtures loaded"
            );
        }
        Command::RebuildStats { job } => rebuild_stats(&mut engine, job.as_deref())?,
        Command::Apply { job } => {
            print_json(&talent_api::create_application(&mut engine, &identity, &job)?)?;
        }
        Command::Transition {
            action,
            application_id,
            interview_type,
            reason,
        } => {
            let response: TransitionResponse = transition(
                &mut engine,
                &identity,
                action,
                &application_id,
                interview_type,
                reason,
            )?;
            for warning in &response.warnings {
                warn!(application_id = %application_id, "{warning}");
            }
            print_json(&response)?;
        }
        Command::Bulk {
            action,
            application_ids,
        } => {
            let request: BulkTransitionRequest = BulkTransitionRequest {
                action,
                application_ids: application_ids
                    .into_iter()
                    .map(serde_json::Value::String)
                    .collect(),
            };
            print_json(&talent_api::bulk_transition(
                &mut engine,
                &identity,
                &request,
                None,
            )?)?;
        }
        Command::List {
            queue,
            job,
            status,
            page,
            limit,
        } => {
            let page_params: PageParams = PageParams { page, limit };
            let response: ApplicationPageResponse = if queue {
                talent_api::list_applications_for_manager(&mut engine, &identity, page_params)?
            } else {
                let request: ListApplicationsRequest = ListApplicationsRequest {
                    job_rr_id: job,
                    status,
                    page: page_params,
                };
                talent_api::list_applications(&mut engine, &identity, &request)?
            };
            print_json(&response)?;
        }
        Command::Owned => {
            print_json(&talent_api::list_owned_resource_requests(
                &mut engine,
                &identity,
            )?)?;
        }
        Command::SkillMatches { job, min_match } => {
            print_json(&talent_api::skill_matches(
                &mut engine,
                &identity,
                &job,
                SkillMatchRequest { min_match },
            )?)?;
        }
        Command::Audit {
            application_id,
            limit,
        } => {
            print_json(&talent_api::list_audit_entries(
                &mut engine,
                &identity,
                AuditListRequest {
                    application_id,
                    limit,
                },
            )?)?;
        }
        Command::IngestPending => {
            let report: PromotionReport = engine.promote_queued_resource_requests()?;
            let promoted: Vec<String> = report.promoted.iter().map(ToString::to_string).collect();
            let duplicates: Vec<String> =
                report.duplicates.iter().map(ToString::to_string).collect();
            print_json(&serde_json::json!({
                "promoted": promoted,
                "duplicates": duplicates,
            }))?;
        }
    }
    Ok(())
}

/// Dispatches a single-id transition to its handler.
fn transition(
    engine: &mut Engine,
    identity: &IdentityContext,
    action: TransitionAction,
    application_id: &str,
    interview_type: Option<String>,
    reason: Option<String>,
) -> Result<TransitionResponse> {
    let response: TransitionResponse = match action {
        TransitionAction::Submit => {
            talent_api::submit_application(engine, identity, application_id)?
        }
        TransitionAction::Withdraw => {
            talent_api::withdraw_application(engine, identity, application_id)?
        }
        TransitionAction::Shortlist => talent_api::shortlist(engine, identity, application_id)?,
        TransitionAction::Interview => {
            let request: InterviewRequest = InterviewRequest {
                interview_type: interview_type.unwrap_or_default(),
            };
            talent_api::to_interview(engine, identity, application_id, &request)?
        }
        TransitionAction::Select => talent_api::select(engine, identity, application_id)?,
        TransitionAction::Reject => {
            talent_api::reject(engine, identity, application_id, RejectRequest { reason })?
        }
        TransitionAction::Allocate => talent_api::allocate(engine, identity, application_id)?,
    };
    Ok(response)
}

/// Recomputes counters without an actor check.
///
/// This is the recovery path for counters left stale by a failed
/// post-transition recomputation.
fn rebuild_stats(engine: &mut Engine, job: Option<&str>) -> Result<()> {
    let rebuilt: Vec<(ResourceRequestId, PipelineCounters)> = match job {
        Some(raw) => {
            let id: ResourceRequestId = ResourceRequestId::new(raw)?;
            let counters: PipelineCounters = engine.recompute_stats(&id)?;
            vec![(id, counters)]
        }
        None => engine.rebuild_all_stats()?,
    };
    let responses: Vec<StatsResponse> = rebuilt
        .into_iter()
        .map(|(id, counters)| StatsResponse {
            job_rr_id: id.to_string(),
            counters,
        })
        .collect();
    print_json(&responses)
}
