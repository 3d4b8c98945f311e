//! Leave service - request lifecycle and calendar rules.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use std::sync::Arc;

use crate::config::MAX_LEAVE_DAYS;
use crate::domain::leave::span_days;
use crate::domain::{
    CreateLeave, Leave, LeaveBalance, LeaveCalendar, LeaveFilter, LeaveStatus, UpdateLeave,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Leave service trait for dependency injection.
#[async_trait]
pub trait LeaveService: Send + Sync {
    /// Get leave request by ID
    async fn get_leave(&self, id: i32) -> AppResult<Leave>;

    /// List leave requests with total count
    async fn list_leaves(
        &self,
        params: PageParams,
        filter: LeaveFilter,
    ) -> AppResult<(Vec<Leave>, u64)>;

    /// Submit a leave request after date and conflict checks
    async fn create_leave(&self, data: CreateLeave) -> AppResult<Leave>;

    /// Amend a pending request; only supplied fields change
    async fn update_leave(&self, id: i32, data: UpdateLeave) -> AppResult<Leave>;

    /// Delete leave request
    async fn delete_leave(&self, id: i32) -> AppResult<()>;

    /// Approve a pending request, stamping the approver
    async fn approve_leave(&self, id: i32, approver_id: i32) -> AppResult<Leave>;

    /// Reject a pending request, stamping the decider
    async fn reject_leave(&self, id: i32, approver_id: i32) -> AppResult<Leave>;

    /// Cancel a pending or approved request that has not started yet
    async fn cancel_leave(&self, id: i32) -> AppResult<Leave>;

    /// Annual-leave account for an employee and year
    async fn leave_balance(&self, employee_id: i32, year: i32) -> AppResult<LeaveBalance>;

    /// Everyone on approved leave on a date
    async fn leave_calendar(&self, date: NaiveDate) -> AppResult<LeaveCalendar>;
}

/// Validate the date range and day count of a request.
fn check_range(start: NaiveDate, end: NaiveDate, total_days: i32) -> AppResult<()> {
    if end < start {
        return Err(AppError::validation(
            "end_date must be on or after start_date",
        ));
    }
    if total_days <= 0 {
        return Err(AppError::validation("total_days must be positive"));
    }
    let span = span_days(start, end);
    if i64::from(total_days) > span {
        return Err(AppError::validation(format!(
            "total_days ({}) cannot exceed the requested range ({} days)",
            total_days, span
        )));
    }
    if total_days > MAX_LEAVE_DAYS {
        return Err(AppError::validation(format!(
            "total_days cannot exceed {}",
            MAX_LEAVE_DAYS
        )));
    }
    Ok(())
}

/// Concrete implementation of LeaveService using Unit of Work.
pub struct LeaveManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LeaveManager<U> {
    /// Create new leave service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_conflicts(
        &self,
        employee_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        if self
            .uow
            .leaves()
            .has_conflict(employee_id, start, end, exclude_id)
            .await?
        {
            return Err(AppError::conflict(
                "Leave request overlaps an existing pending or approved leave",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> LeaveService for LeaveManager<U> {
    async fn get_leave(&self, id: i32) -> AppResult<Leave> {
        self.uow
            .leaves()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_leaves(
        &self,
        params: PageParams,
        filter: LeaveFilter,
    ) -> AppResult<(Vec<Leave>, u64)> {
        self.uow.leaves().list(params, filter).await
    }

    async fn create_leave(&self, data: CreateLeave) -> AppResult<Leave> {
        check_range(data.start_date, data.end_date, data.total_days)?;

        self.uow
            .employees()
            .find_by_id(data.employee_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.check_conflicts(data.employee_id, data.start_date, data.end_date, None)
            .await?;

        self.uow.leaves().create(data).await
    }

    async fn update_leave(&self, id: i32, data: UpdateLeave) -> AppResult<Leave> {
        let existing = self.get_leave(id).await?;

        if existing.status != LeaveStatus::Pending {
            return Err(AppError::invalid_transition(
                "Only pending leave requests can be updated",
            ));
        }

        // Validate the request as it will look after the merge
        let start = data.start_date.unwrap_or(existing.start_date);
        let end = data.end_date.unwrap_or(existing.end_date);
        let total_days = data.total_days.unwrap_or(existing.total_days);
        check_range(start, end, total_days)?;

        self.check_conflicts(existing.employee_id, start, end, Some(id))
            .await?;

        self.uow.leaves().update(id, data).await
    }

    async fn delete_leave(&self, id: i32) -> AppResult<()> {
        self.uow.leaves().delete(id).await
    }

    async fn approve_leave(&self, id: i32, approver_id: i32) -> AppResult<Leave> {
        let leave = self.get_leave(id).await?;

        if leave.status != LeaveStatus::Pending {
            return Err(AppError::invalid_transition(
                "Only pending leave requests can be approved",
            ));
        }

        self.uow
            .leaves()
            .set_status(id, LeaveStatus::Approved, Some(approver_id), Some(Utc::now()))
            .await
    }

    async fn reject_leave(&self, id: i32, approver_id: i32) -> AppResult<Leave> {
        let leave = self.get_leave(id).await?;

        if leave.status != LeaveStatus::Pending {
            return Err(AppError::invalid_transition(
                "Only pending leave requests can be rejected",
            ));
        }

        self.uow
            .leaves()
            .set_status(id, LeaveStatus::Rejected, Some(approver_id), Some(Utc::now()))
            .await
    }

    async fn cancel_leave(&self, id: i32) -> AppResult<Leave> {
        let leave = self.get_leave(id).await?;

        if !leave.status.blocks_calendar() {
            return Err(AppError::invalid_transition(
                "Only pending or approved leave can be cancelled",
            ));
        }
        if leave.start_date < Local::now().date_naive() {
            return Err(AppError::invalid_transition(
                "Cannot cancel leave that has already started",
            ));
        }

        self.uow
            .leaves()
            .set_status(id, LeaveStatus::Cancelled, None, None)
            .await
    }

    async fn leave_balance(&self, employee_id: i32, year: i32) -> AppResult<LeaveBalance> {
        self.uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let used = self
            .uow
            .leaves()
            .sum_annual_days(employee_id, LeaveStatus::Approved, year)
            .await?;
        let pending = self
            .uow
            .leaves()
            .sum_annual_days(employee_id, LeaveStatus::Pending, year)
            .await?;

        Ok(LeaveBalance::new(
            employee_id,
            year,
            used as i32,
            pending as i32,
        ))
    }

    async fn leave_calendar(&self, date: NaiveDate) -> AppResult<LeaveCalendar> {
        let leaves = self.uow.leaves().approved_on(date).await?;
        Ok(LeaveCalendar {
            date,
            total_on_leave: leaves.len(),
            leaves,
        })
    }
}
