//! Salary service - pay-period management.
//!
//! Rate changes are the only multi-step write in the system: the open
//! period is closed and its successor inserted within one transaction.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{CreateSalary, Salary, SalaryFilter, SalaryRevision, UpdateSalary};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Salary service trait for dependency injection.
#[async_trait]
pub trait SalaryService: Send + Sync {
    /// Get salary record by ID
    async fn get_salary(&self, id: i32) -> AppResult<Salary>;

    /// List salary records with total count
    async fn list_salaries(
        &self,
        params: PageParams,
        filter: SalaryFilter,
    ) -> AppResult<(Vec<Salary>, u64)>;

    /// Full salary history for an employee, newest period first
    async fn salary_history(&self, employee_id: i32) -> AppResult<Vec<Salary>>;

    /// The salary in effect for an employee on a date (today when omitted)
    async fn current_salary(
        &self,
        employee_id: i32,
        as_of: Option<NaiveDate>,
    ) -> AppResult<Salary>;

    /// Create a salary record after period validation
    async fn create_salary(&self, data: CreateSalary) -> AppResult<Salary>;

    /// Update salary details; only supplied fields change
    async fn update_salary(&self, id: i32, data: UpdateSalary) -> AppResult<Salary>;

    /// Delete salary record
    async fn delete_salary(&self, id: i32) -> AppResult<()>;

    /// Apply a rate change: close the open period on the revision date and
    /// open a new period at the new rate, atomically.
    async fn update_current_salary(
        &self,
        employee_id: i32,
        revision: SalaryRevision,
    ) -> AppResult<Salary>;
}

fn check_amount(amount: Decimal) -> AppResult<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation("base_salary must be greater than 0"));
    }
    Ok(())
}

fn check_period(from: NaiveDate, to: Option<NaiveDate>) -> AppResult<()> {
    if let Some(to) = to {
        if to < from {
            return Err(AppError::validation(
                "effective_to must be on or after effective_from",
            ));
        }
    }
    Ok(())
}

/// Concrete implementation of SalaryService using Unit of Work.
pub struct SalaryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SalaryManager<U> {
    /// Create new salary service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_employee_exists(&self, employee_id: i32) -> AppResult<()> {
        self.uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> SalaryService for SalaryManager<U> {
    async fn get_salary(&self, id: i32) -> AppResult<Salary> {
        self.uow
            .salaries()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_salaries(
        &self,
        params: PageParams,
        filter: SalaryFilter,
    ) -> AppResult<(Vec<Salary>, u64)> {
        self.uow.salaries().list(params, filter).await
    }

    async fn salary_history(&self, employee_id: i32) -> AppResult<Vec<Salary>> {
        self.check_employee_exists(employee_id).await?;
        self.uow.salaries().history(employee_id).await
    }

    async fn current_salary(
        &self,
        employee_id: i32,
        as_of: Option<NaiveDate>,
    ) -> AppResult<Salary> {
        self.check_employee_exists(employee_id).await?;
        let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
        self.uow
            .salaries()
            .find_current(employee_id, as_of)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_salary(&self, data: CreateSalary) -> AppResult<Salary> {
        check_amount(data.base_salary)?;
        check_period(data.effective_from, data.effective_to)?;
        self.check_employee_exists(data.employee_id).await?;

        // One open period per employee at a time
        if data.effective_to.is_none()
            && self
                .uow
                .salaries()
                .find_open(data.employee_id)
                .await?
                .is_some()
        {
            return Err(AppError::conflict(
                "Employee already has an open salary period",
            ));
        }

        self.uow.salaries().create(data).await
    }

    async fn update_salary(&self, id: i32, data: UpdateSalary) -> AppResult<Salary> {
        let existing = self.get_salary(id).await?;

        if let Some(amount) = data.base_salary {
            check_amount(amount)?;
        }
        // Validate the period as it will look after the merge
        let from = data.effective_from.unwrap_or(existing.effective_from);
        let to = data.effective_to.or(existing.effective_to);
        check_period(from, to)?;

        self.uow.salaries().update(id, data).await
    }

    async fn delete_salary(&self, id: i32) -> AppResult<()> {
        self.uow.salaries().delete(id).await
    }

    async fn update_current_salary(
        &self,
        employee_id: i32,
        revision: SalaryRevision,
    ) -> AppResult<Salary> {
        check_amount(revision.base_salary)?;
        self.check_employee_exists(employee_id).await?;

        let base_salary = revision.base_salary;
        let effective_from = revision.effective_from;

        // Close-old and insert-new must commit together; a crash in between
        // must leave the previous open period untouched.
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let salaries = ctx.salaries();

                    if let Some(open) = salaries.find_open(employee_id).await? {
                        salaries.close(open.id, effective_from).await?;
                    }

                    salaries
                        .insert_open(employee_id, base_salary, effective_from)
                        .await
                })
            })
            .await
    }
}
