//! Department entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Department domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Department {
    pub id: i32,
    #[schema(example = "Engineering")]
    pub name: String,
    /// Short unique code, optional
    #[schema(example = "ENG")]
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Department creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    #[schema(example = "Engineering")]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    #[schema(example = "ENG")]
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Department update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: Option<String>,
    pub description: Option<String>,
}

/// List filter for departments
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DepartmentFilter {
    /// Case-insensitive substring match on name or code
    pub keyword: Option<String>,
}
