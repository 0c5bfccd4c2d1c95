// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Multi-statement operations run inside `immediate_transaction` so that
//! the read and the write hold the same write lock.

pub mod applications;
pub mod audit;
pub mod employees;
pub mod ingestion;
pub mod resource_requests;
