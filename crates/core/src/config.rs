// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Identity written to `last_updated_by` when counters are recomputed.
pub const STATS_UPDATED_BY: &str = "workflow_engine";

/// Tunable limits of the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Maximum number of ids in one bulk transition.
    pub bulk_limit: usize,
    /// Page size used when the caller does not supply one.
    pub default_page_limit: u32,
    /// Largest accepted page size.
    pub max_page_limit: u32,
    /// Largest number of audit entries returned by one listing.
    pub audit_listing_cap: usize,
    /// Tickets promoted per ingestion pass.
    pub ingestion_batch_size: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            bulk_limit: 100,
            default_page_limit: 50,
            max_page_limit: 200,
            audit_listing_cap: 500,
            ingestion_batch_size: 100,
        }
    }
}
