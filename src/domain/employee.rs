//! Employee entity and related types.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Employment lifecycle status. Deleting an employee flips the status to
/// `Terminated` instead of removing the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "probation")]
    Probation,
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

/// Employee domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    /// Unique code assigned by HR
    #[schema(example = "EMP0042")]
    pub employee_code: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    pub phone: Option<String>,
    /// Department reference; cleared when the department is removed
    pub department_id: Option<i32>,
    /// Position reference; cleared when the position is removed
    pub position_id: Option<i32>,
    pub hire_date: NaiveDate,
    pub employment_status: EmploymentStatus,
}

impl Employee {
    /// Check whether the employee has been terminated (soft deleted)
    pub fn is_terminated(&self) -> bool {
        matches!(self.employment_status, EmploymentStatus::Terminated)
    }
}

fn default_status() -> EmploymentStatus {
    EmploymentStatus::Active
}

/// Employee creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 20, message = "Employee code must be 1-20 characters"))]
    #[schema(example = "EMP0042")]
    pub employee_code: String,
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub hire_date: NaiveDate,
    #[serde(default = "default_status")]
    pub employment_status: EmploymentStatus,
}

/// Employee update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 20, message = "Employee code must be 1-20 characters"))]
    pub employee_code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub hire_date: Option<NaiveDate>,
    pub employment_status: Option<EmploymentStatus>,
}

/// List filter for employees
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EmployeeFilter {
    /// Case-insensitive substring match on name, code or email
    pub keyword: Option<String>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub status: Option<EmploymentStatus>,
}
