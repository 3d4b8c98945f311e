//! Employee service - personnel record management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployee};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Get employee by ID
    async fn get_employee(&self, id: i32) -> AppResult<Employee>;

    /// List employees with total count
    async fn list_employees(
        &self,
        params: PageParams,
        filter: EmployeeFilter,
    ) -> AppResult<(Vec<Employee>, u64)>;

    /// Create an employee after uniqueness and reference checks
    async fn create_employee(&self, data: CreateEmployee) -> AppResult<Employee>;

    /// Update employee details; only supplied fields change
    async fn update_employee(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee>;

    /// Soft delete: flip the employment status to terminated
    async fn terminate_employee(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EmployeeService using Unit of Work.
pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    /// Create new employee service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Referenced department and position must exist
    async fn check_references(
        &self,
        department_id: Option<i32>,
        position_id: Option<i32>,
    ) -> AppResult<()> {
        if let Some(department_id) = department_id {
            if self
                .uow
                .departments()
                .find_by_id(department_id)
                .await?
                .is_none()
            {
                return Err(AppError::validation(format!(
                    "Department with id {} not found",
                    department_id
                )));
            }
        }
        if let Some(position_id) = position_id {
            if self.uow.positions().find_by_id(position_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Position with id {} not found",
                    position_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn get_employee(&self, id: i32) -> AppResult<Employee> {
        self.uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_employees(
        &self,
        params: PageParams,
        filter: EmployeeFilter,
    ) -> AppResult<(Vec<Employee>, u64)> {
        self.uow.employees().list(params, filter).await
    }

    async fn create_employee(&self, data: CreateEmployee) -> AppResult<Employee> {
        if self
            .uow
            .employees()
            .find_by_code(&data.employee_code)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Employee code"));
        }
        if self
            .uow
            .employees()
            .find_by_email(&data.email)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Email"));
        }

        self.check_references(data.department_id, data.position_id)
            .await?;

        self.uow.employees().create(data).await
    }

    async fn update_employee(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee> {
        let existing = self.get_employee(id).await?;

        if let Some(code) = &data.employee_code {
            if *code != existing.employee_code
                && self.uow.employees().find_by_code(code).await?.is_some()
            {
                return Err(AppError::duplicate("Employee code"));
            }
        }
        if let Some(email) = &data.email {
            if *email != existing.email
                && self.uow.employees().find_by_email(email).await?.is_some()
            {
                return Err(AppError::duplicate("Email"));
            }
        }

        self.check_references(data.department_id, data.position_id)
            .await?;

        self.uow.employees().update(id, data).await
    }

    async fn terminate_employee(&self, id: i32) -> AppResult<()> {
        self.uow.employees().terminate(id).await
    }
}
