use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::store::Record;

/// Account role within the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

/// User account model
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}
