//! Employee repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use crate::domain::{CreateEmployee, Employee, EmployeeFilter, EmploymentStatus, UpdateEmployee};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// Find employee by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Find employee by unique code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Employee>>;

    /// List employees with total count
    async fn list(
        &self,
        params: PageParams,
        filter: EmployeeFilter,
    ) -> AppResult<(Vec<Employee>, u64)>;

    /// Create a new employee
    async fn create(&self, data: CreateEmployee) -> AppResult<Employee>;

    /// Update employee fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee>;

    /// Soft delete: flip employment status to terminated
    async fn terminate(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::EmployeeCode.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: EmployeeFilter,
    ) -> AppResult<(Vec<Employee>, u64)> {
        let mut query = EmployeeEntity::find();

        if let Some(keyword) = &filter.keyword {
            query = query.filter(
                Condition::any()
                    .add(employee::Column::FullName.contains(keyword))
                    .add(employee::Column::EmployeeCode.contains(keyword))
                    .add(employee::Column::Email.contains(keyword)),
            );
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(employee::Column::DepartmentId.eq(department_id));
        }
        if let Some(position_id) = filter.position_id {
            query = query.filter(employee::Column::PositionId.eq(position_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(employee::Column::EmploymentStatus.eq(status));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_asc(employee::Column::Id)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Employee::from).collect(), total))
    }

    async fn create(&self, data: CreateEmployee) -> AppResult<Employee> {
        let active_model = ActiveModel {
            employee_code: Set(data.employee_code),
            full_name: Set(data.full_name),
            email: Set(data.email),
            phone: Set(data.phone),
            department_id: Set(data.department_id),
            position_id: Set(data.position_id),
            hire_date: Set(data.hire_date),
            employment_status: Set(data.employment_status),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Employee::from(model))
    }

    async fn update(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee> {
        let model = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(employee_code) = data.employee_code {
            active.employee_code = Set(employee_code);
        }
        if let Some(full_name) = data.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = data.email {
            active.email = Set(email);
        }
        if let Some(phone) = data.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(department_id) = data.department_id {
            active.department_id = Set(Some(department_id));
        }
        if let Some(position_id) = data.position_id {
            active.position_id = Set(Some(position_id));
        }
        if let Some(hire_date) = data.hire_date {
            active.hire_date = Set(hire_date);
        }
        if let Some(status) = data.employment_status {
            active.employment_status = Set(status);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Employee::from(model))
    }

    async fn terminate(&self, id: i32) -> AppResult<()> {
        let model = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.employment_status = Set(EmploymentStatus::Terminated);
        active.update(&self.db).await.map_err(AppError::from)?;

        Ok(())
    }
}
