//! Shared test fixtures: in-memory repositories and a Unit of Work
//! wired to them, so services can be exercised without a database.

// Each test binary uses a different subset of these fixtures.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use hr_api::domain::leave::spans_overlap;
use hr_api::domain::salary::current_as_of;
use hr_api::domain::{
    Attendance, AttendanceFilter, AttendanceStatus, CreateDepartment, CreateEmployee, CreateLeave,
    CreatePosition, CreateSalary, Department, DepartmentFilter, Employee, EmployeeFilter,
    EmploymentStatus, Leave, LeaveFilter, LeaveStatus, LeaveType, Position, PositionFilter,
    Salary, UpdateAttendance, UpdateDepartment, UpdateEmployee, UpdateLeave, UpdatePosition,
    UpdateSalary, User, UserRole,
};
use hr_api::errors::{AppError, AppResult};
use hr_api::infra::{
    AttendanceRepository, DepartmentRepository, EmployeeRepository, LeaveRepository,
    PositionRepository, SalaryRepository, TransactionContext, UnitOfWork, UserRepository,
};
use hr_api::types::PageParams;

fn paginate<T: Clone>(rows: &[T], params: &PageParams) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let items = rows
        .iter()
        .skip(params.skip as usize)
        .take(params.limit() as usize)
        .cloned()
        .collect();
    (items, total)
}

// =============================================================================
// Departments
// =============================================================================

#[derive(Default)]
pub struct InMemoryDepartments {
    rows: Mutex<Vec<Department>>,
    next_id: AtomicI32,
    /// Employee counts per department, set by tests
    pub employee_counts: Mutex<std::collections::HashMap<i32, u64>>,
}

impl InMemoryDepartments {
    pub fn set_employee_count(&self, id: i32, count: u64) {
        self.employee_counts.lock().unwrap().insert(id, count);
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartments {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>> {
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.code.as_deref() == Some(code))
            .cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        _filter: DepartmentFilter,
    ) -> AppResult<(Vec<Department>, u64)> {
        Ok(paginate(&self.rows.lock().unwrap(), &params))
    }

    async fn create(&self, data: CreateDepartment) -> AppResult<Department> {
        let department = Department {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: data.name,
            code: data.code,
            description: data.description,
        };
        self.rows.lock().unwrap().push(department.clone());
        Ok(department)
    }

    async fn update(&self, id: i32, data: UpdateDepartment) -> AppResult<Department> {
        let mut rows = self.rows.lock().unwrap();
        let department = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(name) = data.name {
            department.name = name;
        }
        if let Some(code) = data.code {
            department.code = Some(code);
        }
        if let Some(description) = data.description {
            department.description = Some(description);
        }
        Ok(department.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| d.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn employee_count(&self, id: i32) -> AppResult<u64> {
        Ok(*self.employee_counts.lock().unwrap().get(&id).unwrap_or(&0))
    }
}

// =============================================================================
// Positions
// =============================================================================

#[derive(Default)]
pub struct InMemoryPositions {
    rows: Mutex<Vec<Position>>,
    next_id: AtomicI32,
    pub employee_counts: Mutex<std::collections::HashMap<i32, u64>>,
}

#[async_trait]
impl PositionRepository for InMemoryPositions {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Position>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Position>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.code == code)
            .cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        filter: PositionFilter,
    ) -> AppResult<(Vec<Position>, u64)> {
        let rows: Vec<Position> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.level.map_or(true, |level| p.level == level))
            .cloned()
            .collect();
        Ok(paginate(&rows, &params))
    }

    async fn create(&self, data: CreatePosition) -> AppResult<Position> {
        let position = Position {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: data.title,
            code: data.code,
            level: data.level,
            description: data.description,
        };
        self.rows.lock().unwrap().push(position.clone());
        Ok(position)
    }

    async fn update(&self, id: i32, data: UpdatePosition) -> AppResult<Position> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(title) = data.title {
            position.title = title;
        }
        if let Some(code) = data.code {
            position.code = code;
        }
        if let Some(level) = data.level {
            position.level = level;
        }
        if let Some(description) = data.description {
            position.description = Some(description);
        }
        Ok(position.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn employee_count(&self, id: i32) -> AppResult<u64> {
        Ok(*self.employee_counts.lock().unwrap().get(&id).unwrap_or(&0))
    }
}

// =============================================================================
// Employees
// =============================================================================

#[derive(Default)]
pub struct InMemoryEmployees {
    rows: Mutex<Vec<Employee>>,
    next_id: AtomicI32,
}

impl InMemoryEmployees {
    /// Seed an employee and return its id
    pub fn seed(&self, full_name: &str) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows.lock().unwrap().push(Employee {
            id,
            employee_code: format!("EMP{:04}", id),
            full_name: full_name.to_string(),
            email: format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
            phone: None,
            department_id: None,
            position_id: None,
            hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            employment_status: EmploymentStatus::Active,
        });
        id
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployees {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.employee_code == code)
            .cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        _filter: EmployeeFilter,
    ) -> AppResult<(Vec<Employee>, u64)> {
        Ok(paginate(&self.rows.lock().unwrap(), &params))
    }

    async fn create(&self, data: CreateEmployee) -> AppResult<Employee> {
        let employee = Employee {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_code: data.employee_code,
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            department_id: data.department_id,
            position_id: data.position_id,
            hire_date: data.hire_date,
            employment_status: data.employment_status,
        };
        self.rows.lock().unwrap().push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee> {
        let mut rows = self.rows.lock().unwrap();
        let employee = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(code) = data.employee_code {
            employee.employee_code = code;
        }
        if let Some(full_name) = data.full_name {
            employee.full_name = full_name;
        }
        if let Some(email) = data.email {
            employee.email = email;
        }
        if let Some(phone) = data.phone {
            employee.phone = Some(phone);
        }
        if let Some(department_id) = data.department_id {
            employee.department_id = Some(department_id);
        }
        if let Some(position_id) = data.position_id {
            employee.position_id = Some(position_id);
        }
        if let Some(hire_date) = data.hire_date {
            employee.hire_date = hire_date;
        }
        if let Some(status) = data.employment_status {
            employee.employment_status = status;
        }
        Ok(employee.clone())
    }

    async fn terminate(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let employee = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;
        employee.employment_status = EmploymentStatus::Terminated;
        Ok(())
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUsers {
    pub fn get(&self, id: i32) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    /// Seed a user and return it
    pub fn seed(
        &self,
        username: &str,
        hashed_password: &str,
        role: UserRole,
        employee_id: Option<i32>,
        is_active: bool,
    ) -> User {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_id,
            username: username.to_string(),
            hashed_password: hashed_password.to_string(),
            role,
            is_active,
            last_login: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_employee_id(&self, employee_id: i32) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.employee_id == Some(employee_id))
            .cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<(Vec<User>, u64)> {
        let rows: Vec<User> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .filter(|u| is_active.map_or(true, |a| u.is_active == a))
            .cloned()
            .collect();
        Ok(paginate(&rows, &params))
    }

    async fn create(
        &self,
        username: String,
        hashed_password: String,
        role: UserRole,
        employee_id: Option<i32>,
        is_active: bool,
    ) -> AppResult<User> {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_id,
            username,
            hashed_password,
            role,
            is_active,
            last_login: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        username: Option<String>,
        hashed_password: Option<String>,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(username) = username {
            user.username = username;
        }
        if let Some(hashed_password) = hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(is_active) = is_active {
            user.is_active = is_active;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn record_login(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.last_login = Some(Utc::now());
        Ok(())
    }
}

// =============================================================================
// Salaries
// =============================================================================

#[derive(Default)]
pub struct InMemorySalaries {
    rows: Mutex<Vec<Salary>>,
    next_id: AtomicI32,
}

impl InMemorySalaries {
    pub fn all(&self) -> Vec<Salary> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, salary: Salary) {
        self.rows.lock().unwrap().push(salary);
    }
}

#[async_trait]
impl SalaryRepository for InMemorySalaries {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salary>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        filter: hr_api::domain::SalaryFilter,
    ) -> AppResult<(Vec<Salary>, u64)> {
        let rows: Vec<Salary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| filter.employee_id.map_or(true, |e| s.employee_id == e))
            .cloned()
            .collect();
        Ok(paginate(&rows, &params))
    }

    async fn history(&self, employee_id: i32) -> AppResult<Vec<Salary>> {
        let mut rows: Vec<Salary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.effective_from.cmp(&a.effective_from));
        Ok(rows)
    }

    async fn find_current(&self, employee_id: i32, as_of: NaiveDate) -> AppResult<Option<Salary>> {
        let rows: Vec<Salary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect();
        Ok(current_as_of(&rows, as_of).cloned())
    }

    async fn find_open(&self, employee_id: i32) -> AppResult<Option<Salary>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.employee_id == employee_id && s.effective_to.is_none())
            .cloned())
    }

    async fn create(&self, data: CreateSalary) -> AppResult<Salary> {
        let salary = Salary {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_id: data.employee_id,
            base_salary: data.base_salary,
            effective_from: data.effective_from,
            effective_to: data.effective_to,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(salary.clone());
        Ok(salary)
    }

    async fn update(&self, id: i32, data: UpdateSalary) -> AppResult<Salary> {
        let mut rows = self.rows.lock().unwrap();
        let salary = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(base_salary) = data.base_salary {
            salary.base_salary = base_salary;
        }
        if let Some(effective_from) = data.effective_from {
            salary.effective_from = effective_from;
        }
        if let Some(effective_to) = data.effective_to {
            salary.effective_to = Some(effective_to);
        }
        Ok(salary.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Attendances
// =============================================================================

#[derive(Default)]
pub struct InMemoryAttendances {
    rows: Mutex<Vec<Attendance>>,
    next_id: AtomicI32,
}

impl InMemoryAttendances {
    pub fn all(&self) -> Vec<Attendance> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendances {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Attendance>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.employee_id == employee_id && a.date == date)
            .cloned())
    }

    async fn list(
        &self,
        params: PageParams,
        filter: AttendanceFilter,
    ) -> AppResult<(Vec<Attendance>, u64)> {
        let rows: Vec<Attendance> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.employee_id.map_or(true, |e| a.employee_id == e))
            .filter(|a| filter.from.map_or(true, |from| a.date >= from))
            .filter(|a| filter.to.map_or(true, |to| a.date <= to))
            .cloned()
            .collect();
        Ok(paginate(&rows, &params))
    }

    async fn for_month(
        &self,
        employee_id: i32,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<Attendance>> {
        use chrono::Datelike;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.employee_id == employee_id && a.date.year() == year && a.date.month() == month
            })
            .cloned()
            .collect())
    }

    async fn for_date(
        &self,
        date: NaiveDate,
        _department_id: Option<i32>,
    ) -> AppResult<Vec<Attendance>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        employee_id: i32,
        date: NaiveDate,
        check_in_time: Option<NaiveTime>,
        check_out_time: Option<NaiveTime>,
        status: AttendanceStatus,
    ) -> AppResult<Attendance> {
        let attendance = Attendance {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_id,
            date,
            check_in_time,
            check_out_time,
            status,
        };
        self.rows.lock().unwrap().push(attendance.clone());
        Ok(attendance)
    }

    async fn update(&self, id: i32, data: UpdateAttendance) -> AppResult<Attendance> {
        let mut rows = self.rows.lock().unwrap();
        let attendance = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(check_in_time) = data.check_in_time {
            attendance.check_in_time = Some(check_in_time);
        }
        if let Some(check_out_time) = data.check_out_time {
            attendance.check_out_time = Some(check_out_time);
        }
        if let Some(status) = data.status {
            attendance.status = status;
        }
        Ok(attendance.clone())
    }

    async fn set_check_out(&self, id: i32, check_out_time: NaiveTime) -> AppResult<Attendance> {
        let mut rows = self.rows.lock().unwrap();
        let attendance = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound)?;
        attendance.check_out_time = Some(check_out_time);
        Ok(attendance.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Leaves
// =============================================================================

#[derive(Default)]
pub struct InMemoryLeaves {
    rows: Mutex<Vec<Leave>>,
    next_id: AtomicI32,
}

impl InMemoryLeaves {
    pub fn get(&self, id: i32) -> Option<Leave> {
        self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    /// Seed a leave in the given status and return its id
    pub fn seed(
        &self,
        employee_id: i32,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_days: i32,
        status: LeaveStatus,
    ) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        self.rows.lock().unwrap().push(Leave {
            id,
            employee_id,
            leave_type,
            start_date,
            end_date,
            total_days,
            reason: None,
            status,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        });
        id
    }
}

#[async_trait]
impl LeaveRepository for InMemoryLeaves {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Leave>> {
        Ok(self.get(id))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: LeaveFilter,
    ) -> AppResult<(Vec<Leave>, u64)> {
        let rows: Vec<Leave> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| filter.employee_id.map_or(true, |e| l.employee_id == e))
            .filter(|l| filter.status.map_or(true, |s| l.status == s))
            .filter(|l| filter.leave_type.map_or(true, |t| l.leave_type == t))
            .cloned()
            .collect();
        Ok(paginate(&rows, &params))
    }

    async fn has_conflict(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|l| {
            l.employee_id == employee_id
                && l.status.blocks_calendar()
                && Some(l.id) != exclude_id
                && spans_overlap(start_date, end_date, l.start_date, l.end_date)
        }))
    }

    async fn create(&self, data: CreateLeave) -> AppResult<Leave> {
        let now = Utc::now();
        let leave = Leave {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            employee_id: data.employee_id,
            leave_type: data.leave_type,
            start_date: data.start_date,
            end_date: data.end_date,
            total_days: data.total_days,
            reason: data.reason,
            status: LeaveStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(leave.clone());
        Ok(leave)
    }

    async fn update(&self, id: i32, data: UpdateLeave) -> AppResult<Leave> {
        let mut rows = self.rows.lock().unwrap();
        let leave = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(leave_type) = data.leave_type {
            leave.leave_type = leave_type;
        }
        if let Some(start_date) = data.start_date {
            leave.start_date = start_date;
        }
        if let Some(end_date) = data.end_date {
            leave.end_date = end_date;
        }
        if let Some(total_days) = data.total_days {
            leave.total_days = total_days;
        }
        if let Some(reason) = data.reason {
            leave.reason = Some(reason);
        }
        leave.updated_at = Utc::now();
        Ok(leave.clone())
    }

    async fn set_status(
        &self,
        id: i32,
        status: LeaveStatus,
        approved_by: Option<i32>,
        approved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Leave> {
        let mut rows = self.rows.lock().unwrap();
        let leave = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound)?;
        leave.status = status;
        if approved_by.is_some() {
            leave.approved_by = approved_by;
        }
        if approved_at.is_some() {
            leave.approved_at = approved_at;
        }
        leave.updated_at = Utc::now();
        Ok(leave.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn sum_annual_days(
        &self,
        employee_id: i32,
        status: LeaveStatus,
        year: i32,
    ) -> AppResult<i64> {
        use chrono::Datelike;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| {
                l.employee_id == employee_id
                    && l.leave_type == LeaveType::Annual
                    && l.status == status
                    && l.start_date.year() == year
            })
            .map(|l| i64::from(l.total_days))
            .sum())
    }

    async fn approved_on(&self, date: NaiveDate) -> AppResult<Vec<Leave>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| {
                l.status == LeaveStatus::Approved && l.start_date <= date && l.end_date >= date
            })
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit of Work over the in-memory repositories
// =============================================================================

/// Test Unit of Work. Transactions are not supported; the transactional
/// salary succession is covered by database-backed tests.
#[derive(Default)]
pub struct TestUnitOfWork {
    pub departments: Arc<InMemoryDepartments>,
    pub positions: Arc<InMemoryPositions>,
    pub employees: Arc<InMemoryEmployees>,
    pub users: Arc<InMemoryUsers>,
    pub salaries: Arc<InMemorySalaries>,
    pub attendances: Arc<InMemoryAttendances>,
    pub leaves: Arc<InMemoryLeaves>,
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn positions(&self) -> Arc<dyn PositionRepository> {
        self.positions.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn salaries(&self) -> Arc<dyn SalaryRepository> {
        self.salaries.clone()
    }

    fn attendances(&self) -> Arc<dyn AttendanceRepository> {
        self.attendances.clone()
    }

    fn leaves(&self) -> Arc<dyn LeaveRepository> {
        self.leaves.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal(
            "Transactions are not supported in the test unit of work",
        ))
    }
}
