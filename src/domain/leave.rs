//! Leave requests and the date-interval rules governing them.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::ANNUAL_LEAVE_ENTITLEMENT;

/// Category of a leave request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "sick")]
    Sick,
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    #[sea_orm(string_value = "maternity")]
    Maternity,
    #[sea_orm(string_value = "paternity")]
    Paternity,
    #[sea_orm(string_value = "emergency")]
    Emergency,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Approval state of a leave request. Only pending and approved requests
/// occupy calendar space; rejected and cancelled ones never conflict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl LeaveStatus {
    /// Whether a request in this state blocks overlapping requests
    pub fn blocks_calendar(&self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

/// Leave request domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Leave {
    pub id: i32,
    pub employee_id: i32,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days actually taken; at most the calendar span
    pub total_days: i32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    /// User who approved or rejected the request
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed-interval overlap test: `[s1, e1]` intersects `[s2, e2]`.
pub fn spans_overlap(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && e1 >= s2
}

/// Calendar days covered by an inclusive date range.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Leave creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLeave {
    pub employee_id: i32,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days taken within the range; may be less than the span
    /// when it includes non-working days
    #[validate(range(min = 1, message = "total_days must be positive"))]
    pub total_days: i32,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Leave update payload; only supplied fields change.
/// Accepted only while the request is pending.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLeave {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "total_days must be positive"))]
    pub total_days: Option<i32>,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// List filter for leave requests
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LeaveFilter {
    pub employee_id: Option<i32>,
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<LeaveType>,
}

/// Annual-leave account for one employee and year
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct LeaveBalance {
    pub employee_id: i32,
    pub year: i32,
    /// Fixed yearly entitlement in days
    pub total_annual_leave: i32,
    /// Days consumed by approved annual leaves starting in the year
    pub used_annual_leave: i32,
    /// Days requested but not yet decided
    pub pending_leave: i32,
    /// Entitlement minus used; may go negative
    pub remaining_annual_leave: i32,
}

impl LeaveBalance {
    /// Build the balance from aggregated day counts.
    pub fn new(employee_id: i32, year: i32, used: i32, pending: i32) -> Self {
        Self {
            employee_id,
            year,
            total_annual_leave: ANNUAL_LEAVE_ENTITLEMENT,
            used_annual_leave: used,
            pending_leave: pending,
            remaining_annual_leave: ANNUAL_LEAVE_ENTITLEMENT - used,
        }
    }
}

/// Everyone on approved leave on a given date
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveCalendar {
    pub date: NaiveDate,
    pub total_on_leave: usize,
    pub leaves: Vec<Leave>,
}
