use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::users::models::{User, UserRole};
use crate::shared::types::{default_limit, default_page};
use crate::shared::validation::PHONE_REGEX;

/// Query parameters for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by name, email, or phone number
    #[serde(default)]
    pub search: String,
    /// Restrict to one role
    pub role: Option<UserRole>,
}

/// Request DTO for creating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 2, message = "Nama minimal 2 karakter"))]
    pub name: String,
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Format nomor telepon tidak valid"))]
    pub phone_number: String,
    pub role: UserRole,
}

/// Request DTO for updating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 2, message = "Nama minimal 2 karakter"))]
    pub name: Option<String>,
    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Format nomor telepon tidak valid"))]
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
}

/// Response DTO for user data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
        }
    }
}
