//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find the user linked to an employee
    async fn find_by_employee_id(&self, employee_id: i32) -> AppResult<Option<User>>;

    /// List users with total count, optionally filtered by role and status
    async fn list(
        &self,
        params: PageParams,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Create a new user with an already-hashed password
    async fn create(
        &self,
        username: String,
        hashed_password: String,
        role: UserRole,
        employee_id: Option<i32>,
        is_active: bool,
    ) -> AppResult<User>;

    /// Update user fields; only supplied fields change
    async fn update(
        &self,
        id: i32,
        username: Option<String>,
        hashed_password: Option<String>,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Stamp the last-login timestamp
    async fn record_login(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_employee_id(&self, employee_id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(
        &self,
        params: PageParams,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut query = UserEntity::find();

        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role));
        }
        if let Some(is_active) = is_active {
            query = query.filter(user::Column::IsActive.eq(is_active));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_asc(user::Column::Id)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn create(
        &self,
        username: String,
        hashed_password: String,
        role: UserRole,
        employee_id: Option<i32>,
        is_active: bool,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            employee_id: Set(employee_id),
            username: Set(username),
            hashed_password: Set(hashed_password),
            role: Set(role),
            is_active: Set(is_active),
            last_login: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: i32,
        username: Option<String>,
        hashed_password: Option<String>,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(username) = username {
            active.username = Set(username);
        }
        if let Some(hashed_password) = hashed_password {
            active.hashed_password = Set(hashed_password);
        }
        if let Some(role) = role {
            active.role = Set(role);
        }
        if let Some(is_active) = is_active {
            active.is_active = Set(is_active);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn record_login(&self, id: i32) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.last_login = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(AppError::from)?;

        Ok(())
    }
}
