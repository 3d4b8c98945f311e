//! Service container - centralized service construction and access.

use std::sync::Arc;

use super::{
    AttendanceManager, AttendanceService, Authenticator, AuthService, DepartmentManager,
    DepartmentService, EmployeeManager, EmployeeService, LeaveManager, LeaveService,
    PositionManager, PositionService, SalaryManager, SalaryService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete bundle of all application services.
///
/// Built once from a database connection; every service shares the same
/// Unit of Work.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    department_service: Arc<dyn DepartmentService>,
    position_service: Arc<dyn PositionService>,
    employee_service: Arc<dyn EmployeeService>,
    salary_service: Arc<dyn SalaryService>,
    attendance_service: Arc<dyn AttendanceService>,
    leave_service: Arc<dyn LeaveService>,
}

impl Services {
    /// Create the full service set from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            department_service: Arc::new(DepartmentManager::new(uow.clone())),
            position_service: Arc::new(PositionManager::new(uow.clone())),
            employee_service: Arc::new(EmployeeManager::new(uow.clone())),
            salary_service: Arc::new(SalaryManager::new(uow.clone())),
            attendance_service: Arc::new(AttendanceManager::new(uow.clone())),
            leave_service: Arc::new(LeaveManager::new(uow)),
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get department service
    pub fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    /// Get position service
    pub fn positions(&self) -> Arc<dyn PositionService> {
        self.position_service.clone()
    }

    /// Get employee service
    pub fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    /// Get salary service
    pub fn salaries(&self) -> Arc<dyn SalaryService> {
        self.salary_service.clone()
    }

    /// Get attendance service
    pub fn attendances(&self) -> Arc<dyn AttendanceService> {
        self.attendance_service.clone()
    }

    /// Get leave service
    pub fn leaves(&self) -> Arc<dyn LeaveService> {
        self.leave_service.clone()
    }
}
