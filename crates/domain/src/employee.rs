// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EmployeeId, EmployeeType};
use time::OffsetDateTime;

/// An employee as seen by the workflow.
///
/// The workflow reads employees for classification and skills, and writes
/// them only to flip `employee_type` on allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub designation: Option<String>,
    pub city: Option<String>,
    pub band: Option<String>,
    pub employee_type: EmployeeType,
    /// Skills in the order they were recorded.
    pub detailed_skills: Vec<String>,
    pub updated_at: Option<OffsetDateTime>,
}

impl Employee {
    /// Creates an employee with only the fields the workflow requires.
    #[must_use]
    pub fn new(employee_id: EmployeeId, employee_name: &str, employee_type: EmployeeType) -> Self {
        Self {
            employee_id,
            employee_name: employee_name.to_string(),
            designation: None,
            city: None,
            band: None,
            employee_type,
            detailed_skills: Vec::new(),
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.detailed_skills = skills.into_iter().map(Into::into).collect();
        self
    }
}
