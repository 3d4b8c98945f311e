//! Repository layer - Data access abstraction
//!
//! One repository per aggregate, each a trait over a SeaORM-backed store
//! so services stay mockable.

pub(crate) mod entities;

mod attendance_repository;
mod department_repository;
mod employee_repository;
mod leave_repository;
mod position_repository;
mod salary_repository;
mod user_repository;

pub use attendance_repository::{AttendanceRepository, AttendanceStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use leave_repository::{LeaveRepository, LeaveStore};
pub use position_repository::{PositionRepository, PositionStore};
pub use salary_repository::{SalaryRepository, SalaryStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use department_repository::MockDepartmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use leave_repository::MockLeaveRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use position_repository::MockPositionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use salary_repository::MockSalaryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
