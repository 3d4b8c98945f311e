//! Position service - job title management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreatePosition, Position, PositionFilter, UpdatePosition};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PageParams;

/// Position service trait for dependency injection.
#[async_trait]
pub trait PositionService: Send + Sync {
    /// Get position by ID
    async fn get_position(&self, id: i32) -> AppResult<Position>;

    /// List positions with total count
    async fn list_positions(
        &self,
        params: PageParams,
        filter: PositionFilter,
    ) -> AppResult<(Vec<Position>, u64)>;

    /// Create a position after uniqueness checks
    async fn create_position(&self, data: CreatePosition) -> AppResult<Position>;

    /// Update position details; only supplied fields change
    async fn update_position(&self, id: i32, data: UpdatePosition) -> AppResult<Position>;

    /// Delete a position. Fails while employees still hold it.
    async fn delete_position(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of PositionService using Unit of Work.
pub struct PositionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PositionManager<U> {
    /// Create new position service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PositionService for PositionManager<U> {
    async fn get_position(&self, id: i32) -> AppResult<Position> {
        self.uow
            .positions()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_positions(
        &self,
        params: PageParams,
        filter: PositionFilter,
    ) -> AppResult<(Vec<Position>, u64)> {
        self.uow.positions().list(params, filter).await
    }

    async fn create_position(&self, data: CreatePosition) -> AppResult<Position> {
        if self
            .uow
            .positions()
            .find_by_code(&data.code)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate("Position code"));
        }

        self.uow.positions().create(data).await
    }

    async fn update_position(&self, id: i32, data: UpdatePosition) -> AppResult<Position> {
        let existing = self.get_position(id).await?;

        if let Some(code) = &data.code {
            if *code != existing.code
                && self.uow.positions().find_by_code(code).await?.is_some()
            {
                return Err(AppError::duplicate("Position code"));
            }
        }

        self.uow.positions().update(id, data).await
    }

    async fn delete_position(&self, id: i32) -> AppResult<()> {
        // Block deletion while employees reference the position
        let employees = self.uow.positions().employee_count(id).await?;
        if employees > 0 {
            return Err(AppError::conflict(format!(
                "Position has {} employees assigned",
                employees
            )));
        }

        self.uow.positions().delete(id).await
    }
}
