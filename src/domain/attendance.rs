//! Attendance records and check-in/check-out rules.

use chrono::{NaiveDate, NaiveTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::{WORKDAY_START_HOUR, WORKDAY_START_MINUTE};

/// Attendance outcome for a single day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "half_day")]
    HalfDay,
    #[sea_orm(string_value = "early_leave")]
    EarlyLeave,
}

/// Attendance domain entity, one row per (employee, date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Attendance {
    pub id: i32,
    pub employee_id: i32,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
}

impl Attendance {
    /// Hours worked, available once both times are recorded
    pub fn working_hours(&self) -> Option<f64> {
        match (self.check_in_time, self.check_out_time) {
            (Some(check_in), Some(check_out)) => Some(working_hours(check_in, check_out)),
            _ => None,
        }
    }
}

/// The standard workday start; check-ins after it count as late.
pub fn standard_start() -> NaiveTime {
    NaiveTime::from_hms_opt(WORKDAY_START_HOUR, WORKDAY_START_MINUTE, 0)
        .expect("workday start constants form a valid time")
}

/// Classify a check-in time. Arriving exactly on the hour is on time.
pub fn classify_check_in(check_in: NaiveTime) -> AttendanceStatus {
    if check_in > standard_start() {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Duration between two times of the same day, in fractional hours.
pub fn working_hours(check_in: NaiveTime, check_out: NaiveTime) -> f64 {
    (check_out - check_in).num_seconds() as f64 / 3600.0
}

/// Attendance creation payload (manual entry by managers)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAttendance {
    pub employee_id: i32,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
}

/// Attendance update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendance {
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: Option<AttendanceStatus>,
}

/// Check-in payload; omitted time/date default to the current moment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckIn {
    pub employee_id: i32,
    pub check_in_time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
}

/// Check-out payload; omitted time/date default to the current moment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckOut {
    pub employee_id: i32,
    pub check_out_time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
}

/// List filter for attendance records
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    pub employee_id: Option<i32>,
    /// Earliest date to include
    pub from: Option<NaiveDate>,
    /// Latest date to include
    pub to: Option<NaiveDate>,
}

/// Per-month attendance rollup for one employee
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyAttendanceReport {
    pub employee_id: i32,
    pub month: u32,
    pub year: i32,
    pub total_days: usize,
    pub present_days: usize,
    pub late_days: usize,
    pub absent_days: usize,
    pub half_days: usize,
    /// Total hours worked over completed records
    pub working_hours: f64,
    pub attendances: Vec<Attendance>,
}

impl MonthlyAttendanceReport {
    /// Roll up one employee's records for a month.
    pub fn from_records(
        employee_id: i32,
        month: u32,
        year: i32,
        attendances: Vec<Attendance>,
    ) -> Self {
        let count = |status: AttendanceStatus| {
            attendances.iter().filter(|a| a.status == status).count()
        };
        let working_hours: f64 = attendances.iter().filter_map(|a| a.working_hours()).sum();

        Self {
            employee_id,
            month,
            year,
            total_days: attendances.len(),
            present_days: count(AttendanceStatus::Present),
            late_days: count(AttendanceStatus::Late),
            absent_days: count(AttendanceStatus::Absent),
            half_days: count(AttendanceStatus::HalfDay),
            working_hours,
            attendances,
        }
    }
}

/// Per-day attendance rollup across employees
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyAttendanceSummary {
    pub date: NaiveDate,
    pub total_employees: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub half_day: usize,
}

impl DailyAttendanceSummary {
    /// Roll up one day's records.
    pub fn from_records(date: NaiveDate, attendances: &[Attendance]) -> Self {
        let count = |status: AttendanceStatus| {
            attendances.iter().filter(|a| a.status == status).count()
        };

        Self {
            date,
            total_employees: attendances.len(),
            present: count(AttendanceStatus::Present),
            late: count(AttendanceStatus::Late),
            absent: count(AttendanceStatus::Absent),
            half_day: count(AttendanceStatus::HalfDay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn check_in_before_start_is_present() {
        assert_eq!(classify_check_in(at(7, 59)), AttendanceStatus::Present);
    }

    #[test]
    fn check_in_exactly_on_start_is_present() {
        assert_eq!(classify_check_in(at(8, 0)), AttendanceStatus::Present);
    }

    #[test]
    fn check_in_after_start_is_late() {
        assert_eq!(classify_check_in(at(8, 1)), AttendanceStatus::Late);
    }

    #[test]
    fn working_hours_are_fractional() {
        assert_eq!(working_hours(at(8, 0), at(17, 30)), 9.5);
    }

    #[test]
    fn working_hours_need_both_times() {
        let record = Attendance {
            id: 1,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            check_in_time: Some(at(8, 0)),
            check_out_time: None,
            status: AttendanceStatus::Present,
        };
        assert!(record.working_hours().is_none());
    }

    #[test]
    fn monthly_report_counts_by_status() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let record = |status| Attendance {
            id: 1,
            employee_id: 1,
            date,
            check_in_time: Some(at(8, 0)),
            check_out_time: Some(at(17, 0)),
            status,
        };
        let report = MonthlyAttendanceReport::from_records(
            1,
            3,
            2024,
            vec![
                record(AttendanceStatus::Present),
                record(AttendanceStatus::Present),
                record(AttendanceStatus::Late),
                record(AttendanceStatus::Absent),
            ],
        );

        assert_eq!(report.total_days, 4);
        assert_eq!(report.present_days, 2);
        assert_eq!(report.late_days, 1);
        assert_eq!(report.absent_days, 1);
        assert_eq!(report.working_hours, 36.0);
    }
}
