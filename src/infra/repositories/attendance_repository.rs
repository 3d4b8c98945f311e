//! Attendance repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};
use super::entities::employee;
use crate::domain::{Attendance, AttendanceFilter, AttendanceStatus, UpdateAttendance};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Attendance repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Find attendance record by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Attendance>>;

    /// Find the record for one employee on one day
    async fn find_by_employee_and_date(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>>;

    /// List attendance records with total count
    async fn list(
        &self,
        params: PageParams,
        filter: AttendanceFilter,
    ) -> AppResult<(Vec<Attendance>, u64)>;

    /// All records for an employee within a calendar month
    async fn for_month(&self, employee_id: i32, year: i32, month: u32)
        -> AppResult<Vec<Attendance>>;

    /// All records on a date, optionally restricted to one department
    async fn for_date(
        &self,
        date: NaiveDate,
        department_id: Option<i32>,
    ) -> AppResult<Vec<Attendance>>;

    /// Create a new attendance record
    async fn create(
        &self,
        employee_id: i32,
        date: NaiveDate,
        check_in_time: Option<NaiveTime>,
        check_out_time: Option<NaiveTime>,
        status: AttendanceStatus,
    ) -> AppResult<Attendance>;

    /// Update attendance fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdateAttendance) -> AppResult<Attendance>;

    /// Record the check-out time on an existing record
    async fn set_check_out(&self, id: i32, check_out_time: NaiveTime) -> AppResult<Attendance>;

    /// Delete attendance record by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of AttendanceRepository
pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Inclusive date bounds of a calendar month.
fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation("Invalid year or month"))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation("Invalid year or month"))?;
    Ok((first, next_month.pred_opt().unwrap_or(first)))
}

#[async_trait]
impl AttendanceRepository for AttendanceStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Attendance>> {
        let result = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Attendance::from))
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        let result = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Attendance::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: AttendanceFilter,
    ) -> AppResult<(Vec<Attendance>, u64)> {
        let mut query = AttendanceEntity::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(attendance::Column::EmployeeId.eq(employee_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(attendance::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(attendance::Column::Date.lte(to));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_desc(attendance::Column::Date)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Attendance::from).collect(), total))
    }

    async fn for_month(
        &self,
        employee_id: i32,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<Attendance>> {
        let (first, last) = month_bounds(year, month)?;

        let models = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.gte(first))
            .filter(attendance::Column::Date.lte(last))
            .order_by_asc(attendance::Column::Date)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Attendance::from).collect())
    }

    async fn for_date(
        &self,
        date: NaiveDate,
        department_id: Option<i32>,
    ) -> AppResult<Vec<Attendance>> {
        let mut query = AttendanceEntity::find().filter(attendance::Column::Date.eq(date));

        if let Some(department_id) = department_id {
            query = query
                .join(JoinType::InnerJoin, attendance::Relation::Employee.def())
                .filter(employee::Column::DepartmentId.eq(department_id));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Attendance::from).collect())
    }

    async fn create(
        &self,
        employee_id: i32,
        date: NaiveDate,
        check_in_time: Option<NaiveTime>,
        check_out_time: Option<NaiveTime>,
        status: AttendanceStatus,
    ) -> AppResult<Attendance> {
        let active_model = ActiveModel {
            employee_id: Set(employee_id),
            date: Set(date),
            check_in_time: Set(check_in_time),
            check_out_time: Set(check_out_time),
            status: Set(status),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Attendance::from(model))
    }

    async fn update(&self, id: i32, data: UpdateAttendance) -> AppResult<Attendance> {
        let model = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(check_in_time) = data.check_in_time {
            active.check_in_time = Set(Some(check_in_time));
        }
        if let Some(check_out_time) = data.check_out_time {
            active.check_out_time = Set(Some(check_out_time));
        }
        if let Some(status) = data.status {
            active.status = Set(status);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Attendance::from(model))
    }

    async fn set_check_out(&self, id: i32, check_out_time: NaiveTime) -> AppResult<Attendance> {
        let model = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.check_out_time = Set(Some(check_out_time));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Attendance::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
