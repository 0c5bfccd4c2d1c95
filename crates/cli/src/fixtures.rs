// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON fixture files for seeding a database.
//!
//! ```json
//! {
//!   "employees": [
//!     { "employee_id": 1001, "employee_name": "Asha Nair", "employee_type": "TP",
//!       "detailed_skills": ["Rust", "SQL"] }
//!   ],
//!   "resource_requests": [ { "resource_request_id": "RR-1001", ... } ]
//! }
//! ```
//!
//! Employees are upserted directly. Resource requests are queued through the
//! ingestion path and promoted, exactly as HM-created requests are.

use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use talent_domain::{Actor, Employee, EmployeeId, EmployeeType, ResourceRequestDraft, Role};
use talent_persistence::Persistence;
use talent_workflow::{EmployeeRepository, PromotionReport, WorkflowEngine};
use tracing::{info, warn};

/// An employee record as written in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeFixture {
    pub employee_id: i64,
    pub employee_name: String,
    /// `TP` or `Non TP`.
    pub employee_type: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub detailed_skills: Vec<String>,
}

impl EmployeeFixture {
    /// Converts the fixture into an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee type is not recognised.
    pub fn to_employee(&self) -> Result<Employee> {
        let employee_type: EmployeeType = self
            .employee_type
            .parse::<EmployeeType>()
            .wrap_err_with(|| format!("employee {}", self.employee_id))?;
        let mut employee: Employee = Employee::new(
            EmployeeId::new(self.employee_id),
            &self.employee_name,
            employee_type,
        )
        .with_skills(self.detailed_skills.iter().cloned());
        employee.designation.clone_from(&self.designation);
        employee.city.clone_from(&self.city);
        employee.band.clone_from(&self.band);
        Ok(employee)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub employees: Vec<EmployeeFixture>,
    #[serde(default)]
    pub resource_requests: Vec<ResourceRequestDraft>,
}

impl Fixtures {
    /// Parses fixtures from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid fixture document or a
    /// resource request fails validation.
    pub fn from_json(text: &str) -> Result<Self> {
        let fixtures: Self = serde_json::from_str(text).wrap_err("invalid fixture document")?;
        for draft in &fixtures.resource_requests {
            draft
                .validate()
                .wrap_err_with(|| format!("resource request {}", draft.resource_request_id))?;
        }
        Ok(fixtures)
    }

    /// Reads fixtures from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text)
    }
}

/// Writes fixtures into the store behind `engine`.
///
/// Each resource request is queued as its own HM and then promoted.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn apply_fixtures(
    engine: &mut WorkflowEngine<Persistence, Persistence>,
    fixtures: &Fixtures,
) -> Result<PromotionReport> {
    for fixture in &fixtures.employees {
        let employee: Employee = fixture.to_employee()?;
        engine.store_mut().save_employee(&employee)?;
    }
    info!(count = fixtures.employees.len(), "Employees loaded");

    for draft in &fixtures.resource_requests {
        let owner: Actor = Actor::new(draft.hm_id, Role::Hm);
        engine
            .create_resource_request(draft, &owner)
            .wrap_err_with(|| format!("resource request {}", draft.resource_request_id))?;
    }

    let mut report: PromotionReport = PromotionReport::default();
    loop {
        let pass: PromotionReport = engine.promote_queued_resource_requests()?;
        if pass.promoted.is_empty() && pass.duplicates.is_empty() {
            break;
        }
        report.promoted.extend(pass.promoted);
        report.duplicates.extend(pass.duplicates);
    }
    if !report.duplicates.is_empty() {
        warn!(
            duplicates = report.duplicates.len(),
            "Some resource requests already existed and were left unchanged"
        );
    }
    Ok(report)
}
