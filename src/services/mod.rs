//! Service layer - Application use cases.
//!
//! One service per aggregate plus authentication; each is a trait with a
//! Unit-of-Work-backed implementation so handlers depend on abstractions.

mod attendance_service;
mod auth_service;
mod container;
mod department_service;
mod employee_service;
mod leave_service;
mod position_service;
mod salary_service;
mod user_service;

pub use attendance_service::{AttendanceManager, AttendanceService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
pub use department_service::{DepartmentManager, DepartmentService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use leave_service::{LeaveManager, LeaveService};
pub use position_service::{PositionManager, PositionService};
pub use salary_service::{SalaryManager, SalaryService};
pub use user_service::{UserManager, UserService};
