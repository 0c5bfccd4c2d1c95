// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource requests (jobs) and the field-level changes owners may make.

use crate::error::DomainError;
use crate::pipeline::PipelineCounters;
use crate::skills::split_skill_text;
use crate::types::{EmployeeId, Priority, ResourceRequestId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Keys that callers may never write through a patch.
const PROTECTED_KEYS: [&str; 3] = ["resource_request_id", "last_updated", "last_updated_by"];

/// A job requisition that employees apply against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub resource_request_id: ResourceRequestId,
    pub project_name: String,
    /// Job title.
    pub ust_role: String,
    pub city: String,
    pub country: String,
    pub job_grade: String,
    pub account_name: String,
    pub job_description: Option<String>,
    pub priority: Priority,
    pub hm_id: EmployeeId,
    pub wfm_id: EmployeeId,
    /// Open/active flag. Soft deletion clears it.
    pub flag: bool,
    pub mandatory_skills: Vec<String>,
    pub optional_skills: Vec<String>,
    pub counters: PipelineCounters,
    pub last_updated: Option<OffsetDateTime>,
    pub last_updated_by: Option<String>,
}

/// Creation payload for a resource request.
///
/// This is what the ingestion queue stores; counters start at zero when
/// the request is promoted into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequestDraft {
    pub resource_request_id: ResourceRequestId,
    pub project_name: String,
    pub ust_role: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub job_grade: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub hm_id: EmployeeId,
    pub wfm_id: EmployeeId,
    #[serde(default)]
    pub mandatory_skills: Vec<String>,
    #[serde(default)]
    pub optional_skills: Vec<String>,
}

impl ResourceRequestDraft {
    /// Validates the payload before it is queued.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldValue` if the project name or job
    /// title is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (key, value) in [("project_name", &self.project_name), ("ust_role", &self.ust_role)] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidFieldValue {
                    key: key.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Converts the draft into an open resource request with zeroed counters.
    #[must_use]
    pub fn into_resource_request(self) -> ResourceRequest {
        ResourceRequest {
            resource_request_id: self.resource_request_id,
            project_name: self.project_name,
            ust_role: self.ust_role,
            city: self.city,
            country: self.country,
            job_grade: self.job_grade,
            account_name: self.account_name,
            job_description: self.job_description,
            priority: self.priority,
            hm_id: self.hm_id,
            wfm_id: self.wfm_id,
            flag: true,
            mandatory_skills: self.mandatory_skills,
            optional_skills: self.optional_skills,
            counters: PipelineCounters::default(),
            last_updated: None,
            last_updated_by: None,
        }
    }
}

/// Full-document update. Absent fields are left unchanged.
///
/// Counters and the business key are not representable here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceRequestUpdate {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub ust_role: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub job_grade: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub hm_id: Option<EmployeeId>,
    #[serde(default)]
    pub wfm_id: Option<EmployeeId>,
    #[serde(default)]
    pub flag: Option<bool>,
    #[serde(default)]
    pub mandatory_skills: Option<Vec<String>>,
    #[serde(default)]
    pub optional_skills: Option<Vec<String>>,
}

impl ResourceRequestUpdate {
    /// Returns true when the update carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.project_name.is_none()
            && self.ust_role.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.job_grade.is_none()
            && self.account_name.is_none()
            && self.job_description.is_none()
            && self.priority.is_none()
            && self.hm_id.is_none()
            && self.wfm_id.is_none()
            && self.flag.is_none()
            && self.mandatory_skills.is_none()
            && self.optional_skills.is_none()
    }

    fn merge_into(&self, rr: &mut ResourceRequest) {
        fn merge<T: Clone>(target: &mut T, source: Option<&T>) {
            if let Some(value) = source {
                target.clone_from(value);
            }
        }

        merge(&mut rr.project_name, self.project_name.as_ref());
        merge(&mut rr.ust_role, self.ust_role.as_ref());
        merge(&mut rr.city, self.city.as_ref());
        merge(&mut rr.country, self.country.as_ref());
        merge(&mut rr.job_grade, self.job_grade.as_ref());
        merge(&mut rr.account_name, self.account_name.as_ref());
        if let Some(description) = &self.job_description {
            rr.job_description = Some(description.clone());
        }
        merge(&mut rr.priority, self.priority.as_ref());
        merge(&mut rr.hm_id, self.hm_id.as_ref());
        merge(&mut rr.wfm_id, self.wfm_id.as_ref());
        merge(&mut rr.flag, self.flag.as_ref());
        merge(&mut rr.mandatory_skills, self.mandatory_skills.as_ref());
        merge(&mut rr.optional_skills, self.optional_skills.as_ref());
    }
}

/// A single writable field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequestField {
    ProjectName(String),
    UstRole(String),
    City(String),
    Country(String),
    JobGrade(String),
    AccountName(String),
    JobDescription(Option<String>),
    Priority(Priority),
    HmId(EmployeeId),
    WfmId(EmployeeId),
    Flag(bool),
    MandatorySkills(Vec<String>),
    OptionalSkills(Vec<String>),
}

impl ResourceRequestField {
    /// Builds a field change from a patch key and its JSON value.
    ///
    /// Employee ids accept numbers or numeric strings. Skill lists accept
    /// arrays of strings or comma-separated text. Priority text is normalized.
    ///
    /// # Errors
    ///
    /// * `DomainError::ImmutableField` for the business key, counters and
    ///   stats metadata
    /// * `DomainError::UnknownField` for keys that are not resource request fields
    /// * `DomainError::InvalidFieldValue` when the value has the wrong shape
    pub fn from_key_value(key: &str, value: &Value) -> Result<Self, DomainError> {
        if PROTECTED_KEYS.contains(&key) || PipelineCounters::FIELD_NAMES.contains(&key) {
            return Err(DomainError::ImmutableField {
                key: key.to_string(),
            });
        }

        match key {
            "project_name" => Ok(Self::ProjectName(expect_text(key, value)?)),
            "ust_role" => Ok(Self::UstRole(expect_text(key, value)?)),
            "city" => Ok(Self::City(expect_text(key, value)?)),
            "country" => Ok(Self::Country(expect_text(key, value)?)),
            "job_grade" => Ok(Self::JobGrade(expect_text(key, value)?)),
            "account_name" => Ok(Self::AccountName(expect_text(key, value)?)),
            "job_description" => match value {
                Value::Null => Ok(Self::JobDescription(None)),
                other => Ok(Self::JobDescription(Some(expect_text(key, other)?))),
            },
            "priority" => Ok(Self::Priority(Priority::normalize(&expect_text(key, value)?))),
            "hm_id" => Ok(Self::HmId(expect_employee_id(key, value)?)),
            "wfm_id" => Ok(Self::WfmId(expect_employee_id(key, value)?)),
            "flag" => value
                .as_bool()
                .map(Self::Flag)
                .ok_or_else(|| invalid_value(key, "expected a boolean")),
            "mandatory_skills" => Ok(Self::MandatorySkills(expect_skills(key, value)?)),
            "optional_skills" => Ok(Self::OptionalSkills(expect_skills(key, value)?)),
            _ => Err(DomainError::UnknownField {
                key: key.to_string(),
            }),
        }
    }

    /// The field key this change targets.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ProjectName(_) => "project_name",
            Self::UstRole(_) => "ust_role",
            Self::City(_) => "city",
            Self::Country(_) => "country",
            Self::JobGrade(_) => "job_grade",
            Self::AccountName(_) => "account_name",
            Self::JobDescription(_) => "job_description",
            Self::Priority(_) => "priority",
            Self::HmId(_) => "hm_id",
            Self::WfmId(_) => "wfm_id",
            Self::Flag(_) => "flag",
            Self::MandatorySkills(_) => "mandatory_skills",
            Self::OptionalSkills(_) => "optional_skills",
        }
    }

    fn write_into(&self, rr: &mut ResourceRequest) {
        match self {
            Self::ProjectName(v) => rr.project_name.clone_from(v),
            Self::UstRole(v) => rr.ust_role.clone_from(v),
            Self::City(v) => rr.city.clone_from(v),
            Self::Country(v) => rr.country.clone_from(v),
            Self::JobGrade(v) => rr.job_grade.clone_from(v),
            Self::AccountName(v) => rr.account_name.clone_from(v),
            Self::JobDescription(v) => rr.job_description.clone_from(v),
            Self::Priority(v) => rr.priority = *v,
            Self::HmId(v) => rr.hm_id = *v,
            Self::WfmId(v) => rr.wfm_id = *v,
            Self::Flag(v) => rr.flag = *v,
            Self::MandatorySkills(v) => rr.mandatory_skills.clone_from(v),
            Self::OptionalSkills(v) => rr.optional_skills.clone_from(v),
        }
    }
}

fn invalid_value(key: &str, reason: &str) -> DomainError {
    DomainError::InvalidFieldValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn expect_text(key: &str, value: &Value) -> Result<String, DomainError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_value(key, "expected a string"))
}

fn expect_employee_id(key: &str, value: &Value) -> Result<EmployeeId, DomainError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(EmployeeId::new)
            .ok_or_else(|| invalid_value(key, "expected an integer employee id")),
        Value::String(text) => {
            EmployeeId::parse(text).map_err(|_| invalid_value(key, "expected an integer employee id"))
        }
        _ => Err(invalid_value(key, "expected an integer employee id")),
    }
}

fn expect_skills(key: &str, value: &Value) -> Result<Vec<String>, DomainError> {
    match value {
        Value::String(text) => Ok(split_skill_text(text)),
        Value::Array(items) => {
            let mut skills: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                let text: &str = item
                    .as_str()
                    .ok_or_else(|| invalid_value(key, "expected an array of strings"))?
                    .trim();
                if !text.is_empty() {
                    skills.push(text.to_string());
                }
            }
            Ok(skills)
        }
        _ => Err(invalid_value(key, "expected an array of strings")),
    }
}

/// An owner-initiated modification of a resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequestChange {
    /// Merge every provided field.
    Merge(ResourceRequestUpdate),
    /// Overwrite a single field.
    SetField(ResourceRequestField),
    /// Soft delete (`flag = false`).
    Deactivate,
}

impl ResourceRequestChange {
    /// Audit action name recorded for this change.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Merge(_) => "resource_request_updated",
            Self::SetField(_) => "resource_request_patched",
            Self::Deactivate => "resource_request_deactivated",
        }
    }

    /// Applies the change to a resource request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldValue` if a merge carries no fields
    /// or would blank the project name or job title.
    pub fn apply_to(&self, rr: &mut ResourceRequest) -> Result<(), DomainError> {
        match self {
            Self::Merge(update) => {
                if update.is_empty() {
                    return Err(invalid_value("update", "no fields provided"));
                }
                update.merge_into(rr);
            }
            Self::SetField(field) => field.write_into(rr),
            Self::Deactivate => rr.flag = false,
        }
        if rr.project_name.trim().is_empty() {
            return Err(invalid_value("project_name", "must not be empty"));
        }
        if rr.ust_role.trim().is_empty() {
            return Err(invalid_value("ust_role", "must not be empty"));
        }
        Ok(())
    }
}
