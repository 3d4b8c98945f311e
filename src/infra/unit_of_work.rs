//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages transaction
//! lifecycle (begin, commit, rollback) for the operations that need
//! multi-step atomicity.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    AttendanceRepository, AttendanceStore, DepartmentRepository, DepartmentStore,
    EmployeeRepository, EmployeeStore, LeaveRepository, LeaveStore, PositionRepository,
    PositionStore, SalaryRepository, SalaryStore, UserRepository, UserStore,
};
use crate::domain::Salary;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic `transaction` method keeps this trait out of
/// `dyn` position; services are generic over it instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get department repository
    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    /// Get position repository
    fn positions(&self) -> Arc<dyn PositionRepository>;

    /// Get employee repository
    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get salary repository
    fn salaries(&self) -> Arc<dyn SalaryRepository>;

    /// Get attendance repository
    fn attendances(&self) -> Arc<dyn AttendanceRepository>;

    /// Get leave repository
    fn leaves(&self) -> Arc<dyn LeaveRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get salary repository for this transaction
    pub fn salaries(&self) -> TxSalaryRepository<'_> {
        TxSalaryRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    department_repo: Arc<DepartmentStore>,
    position_repo: Arc<PositionStore>,
    employee_repo: Arc<EmployeeStore>,
    user_repo: Arc<UserStore>,
    salary_repo: Arc<SalaryStore>,
    attendance_repo: Arc<AttendanceStore>,
    leave_repo: Arc<LeaveStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            department_repo: Arc::new(DepartmentStore::new(db.clone())),
            position_repo: Arc::new(PositionStore::new(db.clone())),
            employee_repo: Arc::new(EmployeeStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            salary_repo: Arc::new(SalaryStore::new(db.clone())),
            attendance_repo: Arc::new(AttendanceStore::new(db.clone())),
            leave_repo: Arc::new(LeaveStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.department_repo.clone()
    }

    fn positions(&self) -> Arc<dyn PositionRepository> {
        self.position_repo.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn salaries(&self) -> Arc<dyn SalaryRepository> {
        self.salary_repo.clone()
    }

    fn attendances(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance_repo.clone()
    }

    fn leaves(&self) -> Arc<dyn LeaveRepository> {
        self.leave_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Begin transaction
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        // Create context with borrowed transaction
        let ctx = TransactionContext::new(&txn);

        // Execute the closure
        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                // Rollback on error
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware salary repository.
///
/// Carries the two-step rate change: the open period is closed and the
/// successor inserted inside the same transaction, so a half-applied
/// succession is never visible.
pub struct TxSalaryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxSalaryRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// The open-ended salary period for an employee, if one exists
    pub async fn find_open(&self, employee_id: i32) -> AppResult<Option<Salary>> {
        use super::repositories::entities::salary::{self, Entity as SalaryEntity};

        let result = SalaryEntity::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .filter(salary::Column::EffectiveTo.is_null())
            .order_by_desc(salary::Column::EffectiveFrom)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Salary::from))
    }

    /// Close a period on the given date.
    ///
    /// The close date equals the successor's start date; the resulting
    /// one-day overlap at the boundary is the intended succession
    /// convention, resolved in favor of the later period on reads.
    pub async fn close(&self, id: i32, effective_to: NaiveDate) -> AppResult<Salary> {
        use super::repositories::entities::salary::{ActiveModel, Entity as SalaryEntity};

        let model = SalaryEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.effective_to = Set(Some(effective_to));

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(Salary::from(model))
    }

    /// Insert a new open-ended period starting on the given date
    pub async fn insert_open(
        &self,
        employee_id: i32,
        base_salary: Decimal,
        effective_from: NaiveDate,
    ) -> AppResult<Salary> {
        use super::repositories::entities::salary::ActiveModel;

        let active_model = ActiveModel {
            employee_id: Set(employee_id),
            base_salary: Set(base_salary),
            effective_from: Set(effective_from),
            effective_to: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Salary::from(model))
    }
}
