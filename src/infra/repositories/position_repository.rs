//! Position repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::employee;
use super::entities::position::{self, ActiveModel, Entity as PositionEntity};
use crate::domain::{CreatePosition, Position, PositionFilter, UpdatePosition};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Position repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Find position by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Position>>;

    /// Find position by code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Position>>;

    /// List positions with total count
    async fn list(
        &self,
        params: PageParams,
        filter: PositionFilter,
    ) -> AppResult<(Vec<Position>, u64)>;

    /// Create a new position
    async fn create(&self, data: CreatePosition) -> AppResult<Position>;

    /// Update position fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdatePosition) -> AppResult<Position>;

    /// Delete position by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Count employees holding the position
    async fn employee_count(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of PositionRepository
pub struct PositionStore {
    db: DatabaseConnection,
}

impl PositionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PositionRepository for PositionStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Position>> {
        let result = PositionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Position::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Position>> {
        let result = PositionEntity::find()
            .filter(position::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Position::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: PositionFilter,
    ) -> AppResult<(Vec<Position>, u64)> {
        let mut query = PositionEntity::find();

        if let Some(level) = filter.level {
            query = query.filter(position::Column::Level.eq(level));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_asc(position::Column::Id)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Position::from).collect(), total))
    }

    async fn create(&self, data: CreatePosition) -> AppResult<Position> {
        let active_model = ActiveModel {
            title: Set(data.title),
            code: Set(data.code),
            level: Set(data.level),
            description: Set(data.description),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Position::from(model))
    }

    async fn update(&self, id: i32, data: UpdatePosition) -> AppResult<Position> {
        let model = PositionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(code) = data.code {
            active.code = Set(code);
        }
        if let Some(level) = data.level {
            active.level = Set(level);
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Position::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = PositionEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn employee_count(&self, id: i32) -> AppResult<u64> {
        employee::Entity::find()
            .filter(employee::Column::PositionId.eq(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
