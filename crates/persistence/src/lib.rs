// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the talent placement workflow.
//!
//! This crate implements every repository seam the workflow engine
//! consumes, plus the durable audit sink, on top of Diesel and `SQLite`.
//!
//! ## Storage Rules
//!
//! - Foreign keys are enforced and verified when a connection opens
//! - File databases run in WAL mode
//! - Multi-statement writes use `IMMEDIATE` transactions
//! - At most one `Allocated` application per employee and one active
//!   application per employee and job are enforced by partial unique
//!   indexes, surfaced as [`talent_workflow::StoreError::Conflict`]
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every call its own shared-cache
//! in-memory database, so tests never see each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod repositories;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Default wait on a locked database.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connection tuning for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long a statement waits for a competing writer before failing.
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with the given busy timeout in milliseconds.
    #[must_use]
    pub const fn with_busy_timeout_ms(millis: u64) -> Self {
        Self {
            busy_timeout: Duration::from_millis(millis),
        }
    }
}

/// `SQLite` store implementing the workflow repositories and the audit sink.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    database_url: String,
    config: StoreConfig,
    wal: bool,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("database_url", &self.database_url)
            .field("config", &self.config)
            .field("wal", &self.wal)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");
        Self::open(shared_memory_url, StoreConfig::default(), false)
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    /// * `config` - Connection tuning
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(
        path: P,
        config: &StoreConfig,
    ) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        Self::open(path_str.to_string(), *config, true)
    }

    fn open(
        database_url: String,
        config: StoreConfig,
        wal: bool,
    ) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&database_url, config.busy_timeout)?;
        if wal {
            backend::sqlite::enable_wal_mode(&mut conn)?;
        }
        conn.verify_foreign_key_enforcement()?;

        Ok(Self {
            conn,
            database_url,
            config,
            wal,
        })
    }

    /// Opens a second connection to the same database.
    ///
    /// The engine takes the store and the audit sink as separate values;
    /// this is how both are backed by one database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened.
    pub fn reopen(&self) -> Result<Self, PersistenceError> {
        debug!(database_url = %self.database_url, "Opening additional connection");
        Self::open(self.database_url.clone(), self.config, self.wal)
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Returns the connection tuning in effect.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }
}
