//! Leave repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::leave::{self, ActiveModel, Entity as LeaveEntity};
use crate::domain::{CreateLeave, Leave, LeaveFilter, LeaveStatus, LeaveType, UpdateLeave};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Leave repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Find leave request by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Leave>>;

    /// List leave requests with total count, newest first
    async fn list(&self, params: PageParams, filter: LeaveFilter)
        -> AppResult<(Vec<Leave>, u64)>;

    /// Whether a pending/approved leave of the employee intersects the range.
    /// `exclude_id` skips one request, for update-in-place checks.
    async fn has_conflict(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<bool>;

    /// Create a new pending leave request
    async fn create(&self, data: CreateLeave) -> AppResult<Leave>;

    /// Update leave fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdateLeave) -> AppResult<Leave>;

    /// Move a request to a new status, stamping the decider when given
    async fn set_status(
        &self,
        id: i32,
        status: LeaveStatus,
        approved_by: Option<i32>,
        approved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Leave>;

    /// Delete leave request by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Sum of annual-leave days in a status, for requests starting in a year
    async fn sum_annual_days(
        &self,
        employee_id: i32,
        status: LeaveStatus,
        year: i32,
    ) -> AppResult<i64>;

    /// Approved leaves covering a date
    async fn approved_on(&self, date: NaiveDate) -> AppResult<Vec<Leave>>;
}

/// Concrete implementation of LeaveRepository
pub struct LeaveStore {
    db: DatabaseConnection,
}

impl LeaveStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(FromQueryResult)]
struct DaysSum {
    total: Option<i64>,
}

#[async_trait]
impl LeaveRepository for LeaveStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Leave>> {
        let result = LeaveEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Leave::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: LeaveFilter,
    ) -> AppResult<(Vec<Leave>, u64)> {
        let mut query = LeaveEntity::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(leave::Column::EmployeeId.eq(employee_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(leave::Column::Status.eq(status));
        }
        if let Some(leave_type) = filter.leave_type {
            query = query.filter(leave::Column::LeaveType.eq(leave_type));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_desc(leave::Column::CreatedAt)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Leave::from).collect(), total))
    }

    async fn has_conflict(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        // Closed-interval overlap: start <= other.end AND end >= other.start
        let mut query = LeaveEntity::find()
            .filter(leave::Column::EmployeeId.eq(employee_id))
            .filter(
                leave::Column::Status
                    .is_in([LeaveStatus::Pending, LeaveStatus::Approved]),
            )
            .filter(leave::Column::StartDate.lte(end_date))
            .filter(leave::Column::EndDate.gte(start_date));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(leave::Column::Id.ne(exclude_id));
        }

        let count = query.count(&self.db).await.map_err(AppError::from)?;
        Ok(count > 0)
    }

    async fn create(&self, data: CreateLeave) -> AppResult<Leave> {
        let now = Utc::now();
        let active_model = ActiveModel {
            employee_id: Set(data.employee_id),
            leave_type: Set(data.leave_type),
            start_date: Set(data.start_date),
            end_date: Set(data.end_date),
            total_days: Set(data.total_days),
            reason: Set(data.reason),
            status: Set(LeaveStatus::Pending),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Leave::from(model))
    }

    async fn update(&self, id: i32, data: UpdateLeave) -> AppResult<Leave> {
        let model = LeaveEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(leave_type) = data.leave_type {
            active.leave_type = Set(leave_type);
        }
        if let Some(start_date) = data.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = data.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(total_days) = data.total_days {
            active.total_days = Set(total_days);
        }
        if let Some(reason) = data.reason {
            active.reason = Set(Some(reason));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Leave::from(model))
    }

    async fn set_status(
        &self,
        id: i32,
        status: LeaveStatus,
        approved_by: Option<i32>,
        approved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Leave> {
        let model = LeaveEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        if approved_by.is_some() {
            active.approved_by = Set(approved_by);
        }
        if approved_at.is_some() {
            active.approved_at = Set(approved_at);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Leave::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = LeaveEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn sum_annual_days(
        &self,
        employee_id: i32,
        status: LeaveStatus,
        year: i32,
    ) -> AppResult<i64> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::validation("Invalid year"))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::validation("Invalid year"))?;

        let result = LeaveEntity::find()
            .select_only()
            .column_as(leave::Column::TotalDays.sum(), "total")
            .filter(leave::Column::EmployeeId.eq(employee_id))
            .filter(leave::Column::LeaveType.eq(LeaveType::Annual))
            .filter(leave::Column::Status.eq(status))
            .filter(leave::Column::StartDate.gte(first))
            .filter(leave::Column::StartDate.lte(last))
            .into_model::<DaysSum>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.and_then(|row| row.total).unwrap_or(0))
    }

    async fn approved_on(&self, date: NaiveDate) -> AppResult<Vec<Leave>> {
        let models = LeaveEntity::find()
            .filter(leave::Column::Status.eq(LeaveStatus::Approved))
            .filter(leave::Column::StartDate.lte(date))
            .filter(leave::Column::EndDate.gte(date))
            .order_by_asc(leave::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Leave::from).collect())
    }
}
