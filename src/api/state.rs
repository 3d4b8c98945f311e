//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::domain::AccessPolicy;
use crate::infra::Database;
use crate::services::{
    AttendanceService, AuthService, DepartmentService, EmployeeService, LeaveService,
    PositionService, SalaryService, Services, UserService,
};

/// Application state containing all services and the access policy.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub department_service: Arc<dyn DepartmentService>,
    pub position_service: Arc<dyn PositionService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub salary_service: Arc<dyn SalaryService>,
    pub attendance_service: Arc<dyn AttendanceService>,
    pub leave_service: Arc<dyn LeaveService>,
    /// Immutable role -> permission table, built once at startup
    pub policy: Arc<AccessPolicy>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            department_service: services.departments(),
            position_service: services.positions(),
            employee_service: services.employees(),
            salary_service: services.salaries(),
            attendance_service: services.attendances(),
            leave_service: services.leaves(),
            policy: Arc::new(AccessPolicy::with_default_roles()),
            database,
        }
    }
}
