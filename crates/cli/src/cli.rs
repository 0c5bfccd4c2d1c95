// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use talent_api::IdentityContext;
use talent_persistence::{DEFAULT_BUSY_TIMEOUT, StoreConfig};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Operator CLI for the talent placement workflow.
#[derive(Debug, Parser)]
#[command(name = "talent-admin", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database that is discarded on exit.
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// How long a statement waits on a locked database, in milliseconds.
    #[arg(long, global = true, default_value_t = default_busy_timeout_ms())]
    pub busy_timeout_ms: u64,

    /// Employee id the command runs as.
    #[arg(long, global = true, default_value = "1")]
    pub actor_id: String,

    /// Role the command runs as (`TP Manager`, `WFM`, `HM`, `Admin`, `TP`,
    /// `Non TP`).
    #[arg(long, global = true, default_value = "Admin")]
    pub actor_role: String,

    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

fn default_busy_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_BUSY_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::with_busy_timeout_ms(self.busy_timeout_ms)
    }

    pub fn identity(&self) -> IdentityContext {
        IdentityContext::new(&self.actor_id, &self.actor_role)
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create the database and run migrations
    Init,

    /// Load employees and resource requests from a JSON fixture file
    #[command(visible_alias = "lf")]
    LoadFixtures {
        /// Path to the fixture file
        path: PathBuf,
    },

    /// Recompute pipeline counters for one job, or every job
    RebuildStats {
        /// Job to rebuild. Omit to rebuild all jobs.
        #[arg(long)]
        job: Option<String>,
    },

    /// Create a draft application for the acting employee
    Apply {
        /// Resource request id of the job
        job: String,
    },

    /// Move one application to its next status
    #[command(visible_alias = "t")]
    Transition {
        #[arg(value_enum)]
        action: TransitionAction,

        /// Application id
        application_id: String,

        /// Interview type for `interview` (`internal` or `customer`)
        #[arg(long, required_if_eq("action", "interview"))]
        interview_type: Option<String>,

        /// Free-text reason for `reject`
        #[arg(long)]
        reason: Option<String>,
    },

    /// Run one action over many applications
    Bulk {
        /// `shortlist`, `select`, `reject` or `allocate`
        action: String,

        /// Application ids
        #[arg(required = true)]
        application_ids: Vec<String>,
    },

    /// List applications
    #[command(visible_alias = "ls")]
    List {
        /// List the acting manager's work queue instead of filtering
        #[arg(long, conflicts_with_all = ["job", "status"])]
        queue: bool,

        /// Filter by job
        #[arg(long)]
        job: Option<String>,

        /// Filter by status (case-insensitive)
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// List the resource requests the acting WFM or HM owns
    Owned,

    /// Score a job's submitted candidates against its mandatory skills
    #[command(visible_alias = "sm")]
    SkillMatches {
        job: String,

        /// Lower bound on match percentage (0-100)
        #[arg(long)]
        min_match: Option<f64>,
    },

    /// Show recent audit entries, newest first
    Audit {
        #[arg(long)]
        application_id: Option<i64>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Promote queued resource requests into the store
    IngestPending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransitionAction {
    Submit,
    Withdraw,
    Shortlist,
    Interview,
    Select,
    Reject,
    Allocate,
}
