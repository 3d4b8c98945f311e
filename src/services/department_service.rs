//! Department service - organizational unit management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateDepartment, Department, DepartmentFilter, UpdateDepartment};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Department service trait for dependency injection.
#[async_trait]
pub trait DepartmentService: Send + Sync {
    /// Get department by ID
    async fn get_department(&self, id: i32) -> AppResult<Department>;

    /// List departments with total count
    async fn list_departments(
        &self,
        params: PageParams,
        filter: DepartmentFilter,
    ) -> AppResult<(Vec<Department>, u64)>;

    /// Create a department after uniqueness checks
    async fn create_department(&self, data: CreateDepartment) -> AppResult<Department>;

    /// Update department details; only supplied fields change
    async fn update_department(&self, id: i32, data: UpdateDepartment) -> AppResult<Department>;

    /// Delete a department. Fails while employees are still assigned.
    async fn delete_department(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    /// Create new department service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn get_department(&self, id: i32) -> AppResult<Department> {
        self.uow
            .departments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_departments(
        &self,
        params: PageParams,
        filter: DepartmentFilter,
    ) -> AppResult<(Vec<Department>, u64)> {
        self.uow.departments().list(params, filter).await
    }

    async fn create_department(&self, data: CreateDepartment) -> AppResult<Department> {
        if self
            .uow
            .departments()
            .find_by_name(&data.name)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Department name"));
        }

        if let Some(code) = &data.code {
            if self.uow.departments().find_by_code(code).await?.is_some() {
                return Err(AppError::duplicate("Department code"));
            }
        }

        self.uow.departments().create(data).await
    }

    async fn update_department(&self, id: i32, data: UpdateDepartment) -> AppResult<Department> {
        let existing = self.get_department(id).await?;

        if let Some(name) = &data.name {
            if *name != existing.name
                && self.uow.departments().find_by_name(name).await?.is_some()
            {
                return Err(AppError::duplicate("Department name"));
            }
        }

        if let Some(code) = &data.code {
            if existing.code.as_deref() != Some(code)
                && self.uow.departments().find_by_code(code).await?.is_some()
            {
                return Err(AppError::duplicate("Department code"));
            }
        }

        self.uow.departments().update(id, data).await
    }

    async fn delete_department(&self, id: i32) -> AppResult<()> {
        // Block deletion while employees reference the department
        let employees = self.uow.departments().employee_count(id).await?;
        if employees > 0 {
            return Err(AppError::conflict(format!(
                "Department has {} employees assigned",
                employees
            )));
        }

        self.uow.departments().delete(id).await
    }
}
