//! Attendance service - daily check-in/check-out tracking.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveTime};
use std::sync::Arc;

use crate::domain::attendance::classify_check_in;
use crate::domain::{
    Attendance, AttendanceFilter, CheckIn, CheckOut, CreateAttendance, DailyAttendanceSummary,
    MonthlyAttendanceReport, UpdateAttendance,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Attendance service trait for dependency injection.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Get attendance record by ID
    async fn get_attendance(&self, id: i32) -> AppResult<Attendance>;

    /// List attendance records with total count
    async fn list_attendances(
        &self,
        params: PageParams,
        filter: AttendanceFilter,
    ) -> AppResult<(Vec<Attendance>, u64)>;

    /// Create a record manually, one per employee per day
    async fn create_attendance(&self, data: CreateAttendance) -> AppResult<Attendance>;

    /// Update attendance details; only supplied fields change
    async fn update_attendance(&self, id: i32, data: UpdateAttendance) -> AppResult<Attendance>;

    /// Delete attendance record
    async fn delete_attendance(&self, id: i32) -> AppResult<()>;

    /// Check in, deriving late/present from the time of arrival
    async fn check_in(&self, data: CheckIn) -> AppResult<Attendance>;

    /// Check out on an existing record
    async fn check_out(&self, data: CheckOut) -> AppResult<Attendance>;

    /// Per-month rollup for one employee
    async fn monthly_report(
        &self,
        employee_id: i32,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlyAttendanceReport>;

    /// Per-day rollup, optionally restricted to one department
    async fn daily_summary(
        &self,
        date: NaiveDate,
        department_id: Option<i32>,
    ) -> AppResult<DailyAttendanceSummary>;
}

fn check_times(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> AppResult<()> {
    if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
        if check_out <= check_in {
            return Err(AppError::validation(
                "check_out_time must be after check_in_time",
            ));
        }
    }
    Ok(())
}

/// Concrete implementation of AttendanceService using Unit of Work.
pub struct AttendanceManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AttendanceManager<U> {
    /// Create new attendance service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AttendanceService for AttendanceManager<U> {
    async fn get_attendance(&self, id: i32) -> AppResult<Attendance> {
        self.uow
            .attendances()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_attendances(
        &self,
        params: PageParams,
        filter: AttendanceFilter,
    ) -> AppResult<(Vec<Attendance>, u64)> {
        self.uow.attendances().list(params, filter).await
    }

    async fn create_attendance(&self, data: CreateAttendance) -> AppResult<Attendance> {
        check_times(data.check_in_time, data.check_out_time)?;

        if self
            .uow
            .attendances()
            .find_by_employee_and_date(data.employee_id, data.date)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Attendance record for this date"));
        }

        self.uow
            .attendances()
            .create(
                data.employee_id,
                data.date,
                data.check_in_time,
                data.check_out_time,
                data.status,
            )
            .await
    }

    async fn update_attendance(&self, id: i32, data: UpdateAttendance) -> AppResult<Attendance> {
        let existing = self.get_attendance(id).await?;

        // Validate the times as they will look after the merge
        let check_in = data.check_in_time.or(existing.check_in_time);
        let check_out = data.check_out_time.or(existing.check_out_time);
        check_times(check_in, check_out)?;

        self.uow.attendances().update(id, data).await
    }

    async fn delete_attendance(&self, id: i32) -> AppResult<()> {
        self.uow.attendances().delete(id).await
    }

    async fn check_in(&self, data: CheckIn) -> AppResult<Attendance> {
        let now = Local::now();
        let date = data.date.unwrap_or_else(|| now.date_naive());
        let check_in_time = data.check_in_time.unwrap_or_else(|| now.time());

        if self
            .uow
            .attendances()
            .find_by_employee_and_date(data.employee_id, date)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Attendance record for this date"));
        }

        let status = classify_check_in(check_in_time);

        self.uow
            .attendances()
            .create(data.employee_id, date, Some(check_in_time), None, status)
            .await
    }

    async fn check_out(&self, data: CheckOut) -> AppResult<Attendance> {
        let now = Local::now();
        let date = data.date.unwrap_or_else(|| now.date_naive());
        let check_out_time = data.check_out_time.unwrap_or_else(|| now.time());

        let attendance = self
            .uow
            .attendances()
            .find_by_employee_and_date(data.employee_id, date)
            .await?
            .ok_or(AppError::NotFound)?;

        if attendance.check_out_time.is_some() {
            return Err(AppError::invalid_transition("Already checked out"));
        }
        check_times(attendance.check_in_time, Some(check_out_time))?;

        self.uow
            .attendances()
            .set_check_out(attendance.id, check_out_time)
            .await
    }

    async fn monthly_report(
        &self,
        employee_id: i32,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlyAttendanceReport> {
        self.uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let records = self
            .uow
            .attendances()
            .for_month(employee_id, year, month)
            .await?;

        Ok(MonthlyAttendanceReport::from_records(
            employee_id,
            month,
            year,
            records,
        ))
    }

    async fn daily_summary(
        &self,
        date: NaiveDate,
        department_id: Option<i32>,
    ) -> AppResult<DailyAttendanceSummary> {
        let records = self.uow.attendances().for_date(date, department_id).await?;
        Ok(DailyAttendanceSummary::from_records(date, &records))
    }
}
