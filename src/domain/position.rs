//! Position entity and related types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Seniority level of a position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PositionLevel {
    #[sea_orm(string_value = "junior")]
    Junior,
    #[sea_orm(string_value = "senior")]
    Senior,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "director")]
    Director,
    #[sea_orm(string_value = "executive")]
    Executive,
}

/// Position domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Position {
    pub id: i32,
    #[schema(example = "Software Engineer")]
    pub title: String,
    /// Short unique code
    #[schema(example = "SE")]
    pub code: String,
    pub level: PositionLevel,
    pub description: Option<String>,
}

/// Position creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePosition {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    #[schema(example = "Software Engineer")]
    pub title: String,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    #[schema(example = "SE")]
    pub code: String,
    pub level: PositionLevel,
    pub description: Option<String>,
}

/// Position update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePosition {
    #[validate(length(min = 1, max = 100, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: Option<String>,
    pub level: Option<PositionLevel>,
    pub description: Option<String>,
}

/// List filter for positions
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PositionFilter {
    /// Restrict to a seniority level
    pub level: Option<PositionLevel>,
}
