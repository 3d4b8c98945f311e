//! Salary repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::salary::{self, ActiveModel, Entity as SalaryEntity};
use crate::domain::{CreateSalary, Salary, SalaryFilter, UpdateSalary};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Salary repository trait for dependency injection.
///
/// The two-step rate change (close the open period, insert the new one)
/// lives on the unit of work instead, because it must run transactionally.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    /// Find salary record by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salary>>;

    /// List salary records with total count
    async fn list(
        &self,
        params: PageParams,
        filter: SalaryFilter,
    ) -> AppResult<(Vec<Salary>, u64)>;

    /// Full salary history for an employee, newest period first
    async fn history(&self, employee_id: i32) -> AppResult<Vec<Salary>>;

    /// The salary period covering a date, latest start wins
    async fn find_current(&self, employee_id: i32, as_of: NaiveDate) -> AppResult<Option<Salary>>;

    /// The open-ended period for an employee, if one exists
    async fn find_open(&self, employee_id: i32) -> AppResult<Option<Salary>>;

    /// Create a new salary record
    async fn create(&self, data: CreateSalary) -> AppResult<Salary>;

    /// Update salary fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdateSalary) -> AppResult<Salary>;

    /// Delete salary record by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of SalaryRepository
pub struct SalaryStore {
    db: DatabaseConnection,
}

impl SalaryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalaryRepository for SalaryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salary>> {
        let result = SalaryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Salary::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: SalaryFilter,
    ) -> AppResult<(Vec<Salary>, u64)> {
        let mut query = SalaryEntity::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(salary::Column::EmployeeId.eq(employee_id));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_desc(salary::Column::EffectiveFrom)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Salary::from).collect(), total))
    }

    async fn history(&self, employee_id: i32) -> AppResult<Vec<Salary>> {
        let models = SalaryEntity::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .order_by_desc(salary::Column::EffectiveFrom)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Salary::from).collect())
    }

    async fn find_current(&self, employee_id: i32, as_of: NaiveDate) -> AppResult<Option<Salary>> {
        let result = SalaryEntity::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .filter(salary::Column::EffectiveFrom.lte(as_of))
            .filter(
                Condition::any()
                    .add(salary::Column::EffectiveTo.is_null())
                    .add(salary::Column::EffectiveTo.gte(as_of)),
            )
            .order_by_desc(salary::Column::EffectiveFrom)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Salary::from))
    }

    async fn find_open(&self, employee_id: i32) -> AppResult<Option<Salary>> {
        let result = SalaryEntity::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .filter(salary::Column::EffectiveTo.is_null())
            .order_by_desc(salary::Column::EffectiveFrom)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Salary::from))
    }

    async fn create(&self, data: CreateSalary) -> AppResult<Salary> {
        let active_model = ActiveModel {
            employee_id: Set(data.employee_id),
            base_salary: Set(data.base_salary),
            effective_from: Set(data.effective_from),
            effective_to: Set(data.effective_to),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Salary::from(model))
    }

    async fn update(&self, id: i32, data: UpdateSalary) -> AppResult<Salary> {
        let model = SalaryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(base_salary) = data.base_salary {
            active.base_salary = Set(base_salary);
        }
        if let Some(effective_from) = data.effective_from {
            active.effective_from = Set(effective_from);
        }
        if let Some(effective_to) = data.effective_to {
            active.effective_to = Set(Some(effective_to));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Salary::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = SalaryEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
