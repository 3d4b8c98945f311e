//! Domain layer - Business entities and rules.
//!
//! Pure types and predicates with no persistence or HTTP concerns:
//! the role/permission table, date-interval rules for leaves and salary
//! periods, attendance classification, and the password value object.

pub mod access;
pub mod attendance;
pub mod department;
pub mod employee;
pub mod leave;
pub mod password;
pub mod position;
pub mod salary;
pub mod user;

pub use access::{AccessPolicy, Actor, MenuAccess, Permission};
pub use attendance::{
    Attendance, AttendanceFilter, AttendanceStatus, CheckIn, CheckOut, CreateAttendance,
    DailyAttendanceSummary, MonthlyAttendanceReport, UpdateAttendance,
};
pub use department::{CreateDepartment, Department, DepartmentFilter, UpdateDepartment};
pub use employee::{
    CreateEmployee, Employee, EmployeeFilter, EmploymentStatus, UpdateEmployee,
};
pub use leave::{
    CreateLeave, Leave, LeaveBalance, LeaveCalendar, LeaveFilter, LeaveStatus, LeaveType,
    UpdateLeave,
};
pub use password::Password;
pub use position::{CreatePosition, Position, PositionFilter, PositionLevel, UpdatePosition};
pub use salary::{CreateSalary, Salary, SalaryFilter, SalaryRevision, UpdateSalary};
pub use user::{CreateUser, UpdateUser, User, UserResponse, UserRole};
