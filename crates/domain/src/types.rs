// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Numeric employee identifier.
///
/// Upstream records sometimes carry the id as text. It is parsed once at the
/// boundary and every comparison after that is integer equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses an employee id from its textual form.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmployeeId` if the text is not an integer.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidEmployeeId(raw.to_string()))
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(i64);

impl ApplicationId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses an application id from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationId` if the text is not an integer.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidApplicationId(raw.to_string()))
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Business key of a resource request (e.g. `RR-1001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceRequestId(String);

impl ResourceRequestId {
    /// Creates a resource request id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResourceRequestId` if the id is empty.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidResourceRequestId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceRequestId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ResourceRequestId> for String {
    fn from(value: ResourceRequestId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ResourceRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Principal roles supplied by the identity context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Talent pool manager; shortlists TP employees.
    #[serde(rename = "TP Manager")]
    TpManager,
    /// Workforce manager; owns jobs through `wfm_id`.
    #[serde(rename = "WFM")]
    Wfm,
    /// Hiring manager; owns jobs through `hm_id`.
    #[serde(rename = "HM")]
    Hm,
    #[serde(rename = "Admin")]
    Admin,
    /// Applicant principal classified as talent pool.
    #[serde(rename = "TP")]
    Tp,
    /// Applicant principal outside the talent pool.
    #[serde(rename = "Non TP")]
    NonTp,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TpManager => "TP Manager",
            Self::Wfm => "WFM",
            Self::Hm => "HM",
            Self::Admin => "Admin",
            Self::Tp => "TP",
            Self::NonTp => "Non TP",
        }
    }

    /// Returns true for the manager roles that drive the workflow.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self, Self::TpManager | Self::Wfm | Self::Hm | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "TP Manager" => Ok(Self::TpManager),
            "WFM" => Ok(Self::Wfm),
            "HM" => Ok(Self::Hm),
            "Admin" => Ok(Self::Admin),
            "TP" => Ok(Self::Tp),
            "Non TP" => Ok(Self::NonTp),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeType {
    #[serde(rename = "TP")]
    Tp,
    #[serde(rename = "Non TP")]
    NonTp,
}

impl EmployeeType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tp => "TP",
            Self::NonTp => "Non TP",
        }
    }
}

impl FromStr for EmployeeType {
    type Err = DomainError;

    /// Case-insensitive; `NonTP` and `Non-TP` spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match folded.as_str() {
            "TP" => Ok(Self::Tp),
            "NONTP" => Ok(Self::NonTp),
            _ => Err(DomainError::InvalidEmployeeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of interview an application is scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Internal,
    Customer,
}

impl InterviewType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Customer => "customer",
        }
    }

    /// Human-readable label used in transition messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::Customer => "Customer",
        }
    }
}

impl FromStr for InterviewType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "customer" => Ok(Self::Customer),
            _ => Err(DomainError::InvalidInterviewType(s.to_string())),
        }
    }
}

impl std::fmt::Display for InterviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    #[default]
    P4,
}

impl Priority {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }

    /// Normalizes free-form priority text.
    ///
    /// Accepts `p1`, `P 2`, or a bare digit. Anything unrecognized falls back
    /// to `P4`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let digits: &str = compact.strip_prefix('P').unwrap_or(&compact);
        match digits {
            "1" => Self::P1,
            "2" => Self::P2,
            "3" => Self::P3,
            _ => Self::P4,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The acting principal for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub employee_id: EmployeeId,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(employee_id: EmployeeId, role: Role) -> Self {
        Self { employee_id, role }
    }
}

/// Which ownership column of a resource request a manager is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Jobs whose `hm_id` equals the id.
    HiringManager(EmployeeId),
    /// Jobs whose `wfm_id` equals the id.
    WorkforceManager(EmployeeId),
}
