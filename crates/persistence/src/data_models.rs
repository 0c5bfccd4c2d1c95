// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their mapping to domain values.
//!
//! Timestamps are stored as UTC text with a fixed six-digit fraction so
//! that lexical order matches chronological order. Skill lists and audit
//! details are stored as JSON text.

use diesel::prelude::*;
use serde_json::{Map, Value};
use talent_audit::{AuditEntry, AuditRecord};
use talent_domain::{
    Application, ApplicationId, ApplicationStatus, Employee, EmployeeId, EmployeeType,
    InterviewType, PipelineCounters, Priority, ResourceRequest, ResourceRequestDraft,
    ResourceRequestId, TransitionStamps,
};
use talent_workflow::IngestionTicket;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::{applications, audit_log, employees, ingestion_queue, resource_requests};
use crate::error::PersistenceError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted (years outside
/// 0..=9999).
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Formats an optional timestamp for storage.
///
/// # Errors
///
/// See [`format_timestamp`].
pub fn format_optional_timestamp(
    at: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    at.map(format_timestamp).transpose()
}

fn parse_timestamp(table: &'static str, raw: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(raw, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| PersistenceError::invalid_row(table, format!("timestamp {raw:?}: {e}")))
}

fn parse_optional_timestamp(
    table: &'static str,
    raw: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    raw.map(|value| parse_timestamp(table, value)).transpose()
}

fn parse_counter(raw: i32) -> Result<u32, PersistenceError> {
    u32::try_from(raw).map_err(|_| {
        PersistenceError::invalid_row("resource_requests", format!("negative counter {raw}"))
    })
}

/// Encodes a counter for storage.
///
/// # Errors
///
/// Returns an error if the counter does not fit the column.
pub fn encode_counter(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("counter {value} overflows")))
}

/// Encodes a skill list as JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_skills(skills: &[String]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(skills)?)
}

fn decode_skills(table: &'static str, raw: &str) -> Result<Vec<String>, PersistenceError> {
    serde_json::from_str(raw).map_err(|e| PersistenceError::invalid_row(table, e))
}

/// Diesel Queryable struct for application rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = applications)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub employee_id: i64,
    pub job_rr_id: String,
    pub status: String,
    pub interview_type: Option<String>,
    pub shortlisted_by: Option<i64>,
    pub shortlisted_at: Option<String>,
    pub interview_scheduled_by: Option<i64>,
    pub interview_scheduled_at: Option<String>,
    pub selected_by: Option<i64>,
    pub selected_at: Option<String>,
    pub rejected_by: Option<i64>,
    pub rejected_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub allocated_by: Option<i64>,
    pub allocated_at: Option<String>,
    pub submitted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "applications";
        let status: ApplicationStatus = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        let interview_type: Option<InterviewType> = row
            .interview_type
            .as_deref()
            .map(str::parse::<InterviewType>)
            .transpose()
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        let job_rr_id: ResourceRequestId = ResourceRequestId::new(&row.job_rr_id)
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;

        Ok(Self {
            id: ApplicationId::new(row.application_id),
            employee_id: EmployeeId::new(row.employee_id),
            job_rr_id,
            status,
            interview_type,
            stamps: TransitionStamps {
                shortlisted_by: row.shortlisted_by.map(EmployeeId::new),
                shortlisted_at: parse_optional_timestamp(TABLE, row.shortlisted_at.as_deref())?,
                interview_scheduled_by: row.interview_scheduled_by.map(EmployeeId::new),
                interview_scheduled_at: parse_optional_timestamp(
                    TABLE,
                    row.interview_scheduled_at.as_deref(),
                )?,
                selected_by: row.selected_by.map(EmployeeId::new),
                selected_at: parse_optional_timestamp(TABLE, row.selected_at.as_deref())?,
                rejected_by: row.rejected_by.map(EmployeeId::new),
                rejected_at: parse_optional_timestamp(TABLE, row.rejected_at.as_deref())?,
                rejection_reason: row.rejection_reason,
                allocated_by: row.allocated_by.map(EmployeeId::new),
                allocated_at: parse_optional_timestamp(TABLE, row.allocated_at.as_deref())?,
            },
            submitted_at: parse_optional_timestamp(TABLE, row.submitted_at.as_deref())?,
            created_at: parse_timestamp(TABLE, &row.created_at)?,
            updated_at: parse_timestamp(TABLE, &row.updated_at)?,
        })
    }
}

/// Diesel Queryable struct for resource request rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = resource_requests)]
pub struct ResourceRequestRow {
    pub resource_request_id: String,
    pub project_name: String,
    pub ust_role: String,
    pub city: String,
    pub country: String,
    pub job_grade: String,
    pub account_name: String,
    pub job_description: Option<String>,
    pub priority: String,
    pub hm_id: i64,
    pub wfm_id: i64,
    pub flag: i32,
    pub mandatory_skills: String,
    pub optional_skills: String,
    pub resources_in_propose: i32,
    pub resources_in_internal_interview: i32,
    pub resources_in_customer_interview: i32,
    pub resources_in_hm_check: i32,
    pub resources_in_allocated: i32,
    pub resources_in_reject: i32,
    pub resources_in_not_allocated: i32,
    pub resources_in_accept: i32,
    pub last_updated: Option<String>,
    pub last_updated_by: Option<String>,
}

impl TryFrom<ResourceRequestRow> for ResourceRequest {
    type Error = PersistenceError;

    fn try_from(row: ResourceRequestRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "resource_requests";
        Ok(Self {
            resource_request_id: ResourceRequestId::new(&row.resource_request_id)
                .map_err(|e| PersistenceError::invalid_row(TABLE, e))?,
            project_name: row.project_name,
            ust_role: row.ust_role,
            city: row.city,
            country: row.country,
            job_grade: row.job_grade,
            account_name: row.account_name,
            job_description: row.job_description,
            priority: Priority::normalize(&row.priority),
            hm_id: EmployeeId::new(row.hm_id),
            wfm_id: EmployeeId::new(row.wfm_id),
            flag: row.flag != 0,
            mandatory_skills: decode_skills(TABLE, &row.mandatory_skills)?,
            optional_skills: decode_skills(TABLE, &row.optional_skills)?,
            counters: PipelineCounters {
                resources_in_propose: parse_counter(row.resources_in_propose)?,
                resources_in_internal_interview: parse_counter(
                    row.resources_in_internal_interview,
                )?,
                resources_in_customer_interview: parse_counter(
                    row.resources_in_customer_interview,
                )?,
                resources_in_hm_check: parse_counter(row.resources_in_hm_check)?,
                resources_in_allocated: parse_counter(row.resources_in_allocated)?,
                resources_in_reject: parse_counter(row.resources_in_reject)?,
                resources_in_not_allocated: parse_counter(row.resources_in_not_allocated)?,
                resources_in_accept: parse_counter(row.resources_in_accept)?,
            },
            last_updated: parse_optional_timestamp(TABLE, row.last_updated.as_deref())?,
            last_updated_by: row.last_updated_by,
        })
    }
}

/// Diesel Queryable struct for employee rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub employee_name: String,
    pub designation: Option<String>,
    pub city: Option<String>,
    pub band: Option<String>,
    pub employee_type: String,
    pub detailed_skills: String,
    pub updated_at: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "employees";
        let employee_type: EmployeeType = row
            .employee_type
            .parse::<EmployeeType>()
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        Ok(Self {
            employee_id: EmployeeId::new(row.employee_id),
            employee_name: row.employee_name,
            designation: row.designation,
            city: row.city,
            band: row.band,
            employee_type,
            detailed_skills: decode_skills(TABLE, &row.detailed_skills)?,
            updated_at: parse_optional_timestamp(TABLE, row.updated_at.as_deref())?,
        })
    }
}

/// Diesel Queryable struct for audit log rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_log)]
pub struct AuditRow {
    pub audit_id: i64,
    pub action: String,
    pub application_id: Option<i64>,
    pub performed_by: String,
    pub performed_by_role: String,
    pub details: String,
    pub timestamp: String,
}

impl TryFrom<AuditRow> for AuditRecord {
    type Error = PersistenceError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "audit_log";
        let details: Map<String, Value> =
            serde_json::from_str(&row.details).map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        Ok(Self {
            audit_id: row.audit_id,
            entry: AuditEntry {
                action: row.action,
                application_id: row.application_id.map(ApplicationId::new),
                performed_by: row.performed_by,
                performed_by_role: row.performed_by_role,
                details,
                timestamp: parse_timestamp(TABLE, &row.timestamp)?,
            },
        })
    }
}

/// Diesel Queryable struct for ingestion queue rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = ingestion_queue)]
pub struct TicketRow {
    pub ticket_id: i64,
    pub resource_request_id: String,
    pub payload: String,
    pub submitted_by: i64,
    pub queued_at: String,
    pub processed_at: Option<String>,
}

impl TryFrom<TicketRow> for IngestionTicket {
    type Error = PersistenceError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "ingestion_queue";
        let draft: ResourceRequestDraft =
            serde_json::from_str(&row.payload).map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        Ok(Self {
            ticket_id: row.ticket_id,
            draft,
            submitted_by: EmployeeId::new(row.submitted_by),
            queued_at: parse_timestamp(TABLE, &row.queued_at)?,
        })
    }
}
