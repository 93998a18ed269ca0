use std::sync::Arc;

use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserListQuery};
use crate::features::users::models::User;
use crate::shared::query::{Paged, Query};

/// Service for user accounts
pub struct UserService {
    registry: Arc<Registry>,
}

impl UserService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// List users; search covers name, email, and phone number, newest id
    /// first
    pub async fn list(&self, query: &UserListQuery) -> Result<Paged<User>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.users.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.role, |user, role| user.role == *role)
            .search(&query.search, |user, needle| {
                user.name.to_lowercase().contains(needle)
                    || user.email.to_lowercase().contains(needle)
                    || user.phone_number.contains(needle)
            })
            .sort_desc_by(|user| user.id)
            .paginate(query.page, query.limit))
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.registry.simulate_latency().await;
        self.registry
            .users
            .find(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("User dengan ID {} tidak ditemukan", id)))
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<User> {
        self.registry.simulate_latency().await;
        self.ensure_email_unique(&dto.email, None).await?;

        let user = self
            .registry
            .users
            .insert(|id| User {
                id,
                name: dto.name,
                email: dto.email,
                phone_number: dto.phone_number,
                role: dto.role,
            })
            .await;
        tracing::info!("User created: id={}, email={}", user.id, user.email);
        Ok(user)
    }

    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<User> {
        self.registry.simulate_latency().await;
        if let Some(email) = &dto.email {
            self.ensure_email_unique(email, Some(id)).await?;
        }
        self.registry
            .users
            .update(id, |user| {
                if let Some(name) = dto.name {
                    user.name = name;
                }
                if let Some(email) = dto.email {
                    user.email = email;
                }
                if let Some(phone_number) = dto.phone_number {
                    user.phone_number = phone_number;
                }
                if let Some(role) = dto.role {
                    user.role = role;
                }
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("User dengan ID {} tidak ditemukan", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.users.remove(id).await {
            return Err(AppError::NotFound(format!(
                "User dengan ID {} tidak ditemukan",
                id
            )));
        }
        tracing::info!("User deleted: id={}", id);
        Ok(())
    }

    async fn ensure_email_unique(&self, email: &str, exclude_id: Option<i64>) -> Result<()> {
        let taken = self
            .registry
            .users
            .any(|user| user.email == email && Some(user.id) != exclude_id)
            .await;
        if taken {
            return Err(AppError::Conflict("Email sudah terdaftar".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::seeded_registry;

    fn list_query() -> UserListQuery {
        UserListQuery {
            page: 1,
            limit: 10,
            search: String::new(),
            role: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let registry = seeded_registry();
        let service = UserService::new(registry.clone());
        let before = registry.users.len().await;

        let err = service
            .create(CreateUserDto {
                name: "Peniru".to_string(),
                email: "admin@example.com".to_string(),
                phone_number: "081234560000".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(registry.users.len().await, before);
    }

    #[tokio::test]
    async fn updating_own_email_is_not_a_conflict() {
        let service = UserService::new(seeded_registry());
        let updated = service
            .update(
                1,
                UpdateUserDto {
                    name: None,
                    email: Some("admin@example.com".to_string()),
                    phone_number: None,
                    role: None,
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.email, "admin@example.com");
    }

    #[tokio::test]
    async fn role_scope_and_search_compose() {
        let service = UserService::new(seeded_registry());
        let admins = service
            .list(&UserListQuery {
                role: Some(UserRole::Admin),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(admins.total, 2);

        let narrowed = service
            .list(&UserListQuery {
                role: Some(UserRole::Admin),
                search: "SUPER".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(narrowed.total, 1);
        assert_eq!(narrowed.items[0].name, "Super Admin");
    }

    #[tokio::test]
    async fn search_matches_phone_numbers_too() {
        let service = UserService::new(seeded_registry());
        let page = service
            .list(&UserListQuery {
                search: "081234567894".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Regular User");
    }

    #[tokio::test]
    async fn delete_is_not_found_after_the_first_time() {
        let registry = seeded_registry();
        let service = UserService::new(registry.clone());
        service.delete(5).await.expect("delete");
        let err = service.delete(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(registry.users.len().await, 4);
    }
}
