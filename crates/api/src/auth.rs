// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity resolution at the API boundary.
//!
//! The identity context is supplied by an upstream gateway and trusted
//! verbatim. This module only turns its text fields into a typed
//! [`Actor`].

use talent_domain::{Actor, EmployeeId, Role};
use tracing::debug;

use crate::error::ApiError;

/// Identity of the caller as supplied by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdentityContext {
    /// The caller's employee id, as text.
    pub employee_id: String,
    /// The caller's role name (e.g. `TP Manager`, `WFM`).
    pub role: String,
}

impl IdentityContext {
    /// Creates an identity context.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The caller's employee id
    /// * `role` - The caller's role name
    #[must_use]
    pub fn new(employee_id: &str, role: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            role: role.to_string(),
        }
    }
}

/// Resolves the identity context into a typed actor.
///
/// # Errors
///
/// * `AuthenticationFailed` if either field is blank
/// * `InvalidInput` if the employee id is not an integer
/// * `Unauthorized` if the role is not one of the known roles
pub fn resolve_actor(identity: &IdentityContext) -> Result<Actor, ApiError> {
    if identity.employee_id.trim().is_empty() || identity.role.trim().is_empty() {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("identity context is missing employee_id or role"),
        });
    }

    let employee_id: EmployeeId =
        EmployeeId::parse(&identity.employee_id).map_err(|e| ApiError::InvalidInput {
            field: String::from("employee_id"),
            message: e.to_string(),
        })?;
    let role: Role = identity.role.parse::<Role>().map_err(|_| {
        debug!(role = %identity.role, "Rejected unknown role");
        ApiError::Unauthorized {
            action: String::from("access the workflow"),
            role: identity.role.clone(),
        }
    })?;

    Ok(Actor::new(employee_id, role))
}
