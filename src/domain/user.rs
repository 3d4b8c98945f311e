//! User account entity and related types.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Account roles. Fixed at creation; only admins may change it afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "employee")]
    Employee,
}

impl UserRole {
    /// Check if this role can act on other employees' records
    pub fn is_manager_or_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    /// Linked employee record, if any (at most one user per employee)
    pub employee_id: Option<i32>,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn default_role() -> UserRole {
    UserRole::Employee
}

fn default_active() -> bool {
    true
}

/// User creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Unique login name (stored lowercased)
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Plain-text password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Employee the account belongs to (must exist and be unclaimed)
    pub employee_id: Option<i32>,
    #[serde(default = "default_role")]
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// User update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
    /// New password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// User response (never exposes the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub employee_id: Option<i32>,
    #[schema(example = "jdoe")]
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            employee_id: user.employee_id,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}
