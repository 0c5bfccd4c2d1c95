// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `applications`: Application lookups, listings and pipeline aggregations
//! - `resource_requests`: Resource request lookups
//! - `employees`: Employee lookups
//! - `audit`: Audit log reads
//! - `ingestion`: Pending ingestion tickets

pub mod applications;
pub mod audit;
pub mod employees;
pub mod ingestion;
pub mod resource_requests;
