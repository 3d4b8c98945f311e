//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    attendance_handler, auth_handler, department_handler, employee_handler, leave_handler,
    position_handler, salary_handler, user_handler,
};
use crate::domain::{
    Attendance, AttendanceStatus, CheckIn, CheckOut, CreateAttendance, CreateDepartment,
    CreateEmployee, CreateLeave, CreatePosition, CreateSalary, CreateUser, DailyAttendanceSummary,
    Department, Employee, EmploymentStatus, Leave, LeaveBalance, LeaveCalendar, LeaveStatus,
    LeaveType, MenuAccess, MonthlyAttendanceReport, Permission, Position, PositionLevel, Salary,
    SalaryRevision, UpdateAttendance, UpdateDepartment, UpdateEmployee, UpdateLeave,
    UpdatePosition, UpdateSalary, UpdateUser, UserResponse, UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the HR Management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Management API",
        version = "0.1.0",
        description = "HR management REST API with Axum, SeaORM and role-based access control",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // Department endpoints
        department_handler::list_departments,
        department_handler::get_department,
        department_handler::create_department,
        department_handler::update_department,
        department_handler::delete_department,
        // Position endpoints
        position_handler::list_positions,
        position_handler::get_position,
        position_handler::create_position,
        position_handler::update_position,
        position_handler::delete_position,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::get_my_employee,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Salary endpoints
        salary_handler::list_salaries,
        salary_handler::get_salary,
        salary_handler::get_current_salary,
        salary_handler::get_salary_history,
        salary_handler::create_salary,
        salary_handler::update_salary,
        salary_handler::delete_salary,
        salary_handler::update_current_salary,
        // Attendance endpoints
        attendance_handler::list_attendances,
        attendance_handler::get_attendance,
        attendance_handler::create_attendance,
        attendance_handler::check_in,
        attendance_handler::check_out,
        attendance_handler::update_attendance,
        attendance_handler::delete_attendance,
        attendance_handler::monthly_report,
        attendance_handler::daily_summary,
        // Leave endpoints
        leave_handler::list_leaves,
        leave_handler::get_leave,
        leave_handler::create_leave,
        leave_handler::update_leave,
        leave_handler::delete_leave,
        leave_handler::approve_leave,
        leave_handler::reject_leave,
        leave_handler::cancel_leave,
        leave_handler::leave_balance,
        leave_handler::leave_calendar,
    ),
    components(
        schemas(
            // Domain enums
            UserRole,
            PositionLevel,
            EmploymentStatus,
            AttendanceStatus,
            LeaveType,
            LeaveStatus,
            Permission,
            // Entities and DTOs
            Department, CreateDepartment, UpdateDepartment,
            Position, CreatePosition, UpdatePosition,
            Employee, CreateEmployee, UpdateEmployee,
            UserResponse, CreateUser, UpdateUser,
            Salary, CreateSalary, UpdateSalary, SalaryRevision,
            Attendance, CreateAttendance, UpdateAttendance, CheckIn, CheckOut,
            MonthlyAttendanceReport, DailyAttendanceSummary,
            Leave, CreateLeave, UpdateLeave, LeaveBalance, LeaveCalendar,
            MenuAccess,
            // Auth types
            auth_handler::LoginRequest,
            auth_handler::ProfileResponse,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and profile"),
        (name = "Departments", description = "Department management"),
        (name = "Positions", description = "Position management"),
        (name = "Employees", description = "Employee management"),
        (name = "Users", description = "User account management"),
        (name = "Salaries", description = "Salary periods and rate changes"),
        (name = "Attendances", description = "Daily attendance tracking"),
        (name = "Leaves", description = "Leave requests and balances")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
