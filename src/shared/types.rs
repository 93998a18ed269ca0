use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::query::Paged;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

/// Listing metadata: filtered total plus the applied window.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl Meta {
    pub fn of<T>(page: &Paged<T>) -> Self {
        Self {
            total: page.total,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// Serde defaults shared by the list-query DTOs.

pub fn default_page() -> i64 {
    1
}

pub fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}
