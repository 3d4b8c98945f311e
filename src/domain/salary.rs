//! Salary records and the effective-period rules governing them.
//!
//! An employee's pay history is a sequence of dated periods; the row with
//! `effective_to = None` is the open period carrying the current rate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Salary period domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Salary {
    pub id: i32,
    pub employee_id: i32,
    #[schema(value_type = String, example = "50000.00")]
    pub base_salary: Decimal,
    pub effective_from: NaiveDate,
    /// None marks the open period carrying the current rate
    pub effective_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Salary {
    /// Whether this period is open-ended
    pub fn is_open(&self) -> bool {
        self.effective_to.is_none()
    }

    /// Whether this period covers the given date.
    ///
    /// Both bounds are inclusive; an open period covers everything from
    /// `effective_from` onward.
    pub fn covers(&self, as_of: NaiveDate) -> bool {
        self.effective_from <= as_of && self.effective_to.map_or(true, |to| to >= as_of)
    }
}

/// Select the salary in effect on a date.
///
/// When periods overlap at a succession boundary (the old period's end date
/// equals the new period's start date), the later `effective_from` wins.
pub fn current_as_of(rows: &[Salary], as_of: NaiveDate) -> Option<&Salary> {
    rows.iter()
        .filter(|row| row.covers(as_of))
        .max_by_key(|row| row.effective_from)
}

/// Salary creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSalary {
    pub employee_id: i32,
    /// Must be greater than zero
    #[schema(value_type = String, example = "50000.00")]
    pub base_salary: Decimal,
    pub effective_from: NaiveDate,
    /// Omit to open a new current-rate period
    pub effective_to: Option<NaiveDate>,
}

/// Salary update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSalary {
    #[schema(value_type = Option<String>)]
    pub base_salary: Option<Decimal>,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
}

/// Payload for the rate-change operation that closes the open period
/// and starts a new one
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SalaryRevision {
    /// New base salary, must be greater than zero
    #[schema(value_type = String, example = "55000.00")]
    pub base_salary: Decimal,
    /// First day the new rate applies
    pub effective_from: NaiveDate,
}

/// List filter for salary records
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SalaryFilter {
    pub employee_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(id: i32, from: NaiveDate, to: Option<NaiveDate>) -> Salary {
        Salary {
            id,
            employee_id: 1,
            base_salary: Decimal::from_i64(50_000).unwrap(),
            effective_from: from,
            effective_to: to,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_period_covers_everything_after_start() {
        let open = period(1, day(2024, 1, 1), None);
        assert!(open.covers(day(2024, 1, 1)));
        assert!(open.covers(day(2030, 12, 31)));
        assert!(!open.covers(day(2023, 12, 31)));
    }

    #[test]
    fn closed_period_bounds_are_inclusive() {
        let closed = period(1, day(2024, 1, 1), Some(day(2024, 6, 30)));
        assert!(closed.covers(day(2024, 1, 1)));
        assert!(closed.covers(day(2024, 6, 30)));
        assert!(!closed.covers(day(2024, 7, 1)));
    }

    #[test]
    fn latest_start_wins_on_succession_boundary() {
        // The old period is closed on the day the new one starts, so the
        // boundary date is covered by both; the newer rate must win.
        let boundary = day(2024, 6, 1);
        let rows = vec![
            period(1, day(2024, 1, 1), Some(boundary)),
            period(2, boundary, None),
        ];

        let current = current_as_of(&rows, boundary).unwrap();
        assert_eq!(current.id, 2);

        // The day before the boundary still belongs to the old period.
        let before = current_as_of(&rows, day(2024, 5, 31)).unwrap();
        assert_eq!(before.id, 1);
    }

    #[test]
    fn no_period_covers_dates_before_hire() {
        let rows = vec![period(1, day(2024, 1, 1), None)];
        assert!(current_as_of(&rows, day(2023, 6, 1)).is_none());
    }
}
