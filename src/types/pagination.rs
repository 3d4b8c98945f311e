//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Offset/limit query parameters shared by all list endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of records to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum records to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl PageParams {
    /// Get limit capped at the maximum page size
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_PAGE_LIMIT)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Paginated response wrapper, reusable for all list responses
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub skip: u64,
    pub limit: u64,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(items: Vec<T>, params: &PageParams, total: u64) -> Self {
        Self {
            items,
            meta: PageMeta {
                skip: params.skip,
                limit: params.limit(),
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_capped() {
        let params = PageParams {
            skip: 0,
            limit: 10_000,
        };
        assert_eq!(params.limit(), MAX_PAGE_LIMIT);
    }

    #[test]
    fn defaults_apply() {
        let params = PageParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit(), DEFAULT_PAGE_LIMIT);
    }
}
