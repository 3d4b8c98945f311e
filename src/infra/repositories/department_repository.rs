//! Department repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::department::{self, ActiveModel, Entity as DepartmentEntity};
use super::entities::employee;
use crate::domain::{CreateDepartment, Department, DepartmentFilter, UpdateDepartment};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Department repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Find department by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>>;

    /// Find department by name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>>;

    /// Find department by code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Department>>;

    /// List departments with total count
    async fn list(
        &self,
        params: PageParams,
        filter: DepartmentFilter,
    ) -> AppResult<(Vec<Department>, u64)>;

    /// Create a new department
    async fn create(&self, data: CreateDepartment) -> AppResult<Department>;

    /// Update department fields; only supplied fields change
    async fn update(&self, id: i32, data: UpdateDepartment) -> AppResult<Department>;

    /// Delete department by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Count employees assigned to the department
    async fn employee_count(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of DepartmentRepository
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find()
            .filter(department::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find()
            .filter(department::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn list(
        &self,
        params: PageParams,
        filter: DepartmentFilter,
    ) -> AppResult<(Vec<Department>, u64)> {
        let mut query = DepartmentEntity::find();

        if let Some(keyword) = &filter.keyword {
            query = query.filter(
                Condition::any()
                    .add(department::Column::Name.contains(keyword))
                    .add(department::Column::Code.contains(keyword)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = query
            .order_by_asc(department::Column::Id)
            .offset(params.skip)
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Department::from).collect(), total))
    }

    async fn create(&self, data: CreateDepartment) -> AppResult<Department> {
        let active_model = ActiveModel {
            name: Set(data.name),
            code: Set(data.code),
            description: Set(data.description),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Department::from(model))
    }

    async fn update(&self, id: i32, data: UpdateDepartment) -> AppResult<Department> {
        let model = DepartmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(code) = data.code {
            active.code = Set(Some(code));
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Department::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = DepartmentEntity::delete_by_id(id)
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
            .filter(employee::Column::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
