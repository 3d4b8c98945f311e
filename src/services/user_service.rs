//! User service - account management business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateUser, Password, UpdateUser, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List users with total count
    async fn list_users(
        &self,
        params: PageParams,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Create a user account after uniqueness and linkage checks
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    /// Update user details; only supplied fields change
    async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user account
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Shared user-creation rules, also used by registration.
///
/// Usernames are stored lowercased. When the account is linked to an
/// employee, the employee must exist and must not already have one.
pub(crate) async fn create_user_checked<U: UnitOfWork>(
    uow: &U,
    data: CreateUser,
) -> AppResult<User> {
    let username = data.username.to_lowercase();

    if uow.users().find_by_username(&username).await?.is_some() {
        return Err(AppError::duplicate("Username"));
    }

    if let Some(employee_id) = data.employee_id {
        if uow.employees().find_by_id(employee_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Employee with id {} not found",
                employee_id
            )));
        }
        if uow.users().find_by_employee_id(employee_id).await?.is_some() {
            return Err(AppError::conflict(
                "This employee already has a user account",
            ));
        }
    }

    let hashed_password = Password::new(&data.password)?.into_string();

    uow.users()
        .create(username, hashed_password, data.role, data.employee_id, data.is_active)
        .await
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(
        &self,
        params: PageParams,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<(Vec<User>, u64)> {
        self.uow.users().list(params, role, is_active).await
    }

    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        create_user_checked(self.uow.as_ref(), data).await
    }

    async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        let existing = self.get_user(id).await?;

        let username = match data.username {
            Some(username) => {
                let username = username.to_lowercase();
                if username != existing.username
                    && self.uow.users().find_by_username(&username).await?.is_some()
                {
                    return Err(AppError::duplicate("Username"));
                }
                Some(username)
            }
            None => None,
        };

        // Re-hash when a new password is supplied
        let hashed_password = match data.password {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        self.uow
            .users()
            .update(id, username, hashed_password, data.role, data.is_active)
            .await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await
    }
}
