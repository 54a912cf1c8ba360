//! In-Memory User Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::User,
    errors::DomainResult,
    repositories::UserRepository,
    value_objects::{normalize_email, Page, PageRequest, UserId},
};

use super::store::{replace_existing, MemoryStore};
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        self.store.write(|t| {
            if t.users.values().any(|u| u.email == user.email) {
                return Err(PersistenceError::unique("User", "email"));
            }
            t.users.insert(user.id, user.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        self.store.write(|t| {
            if t.users.values().any(|u| u.email == user.email && u.id != user.id) {
                return Err(PersistenceError::unique("User", "email"));
            }
            replace_existing(&mut t.users, user.id, user.clone(), "User", user.id)
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.store.read(|t| t.users.get(&id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .store
            .read(|t| t.users.values().find(|u| u.email == email).cloned()))
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Page<User>> {
        let mut users: Vec<User> = self.store.read(|t| t.users.values().cloned().collect());
        users.sort_by_key(|u| u.created_at);
        Ok(page.apply(users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megahr_domain::{errors::DomainError, roles::UserRole};

    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let repo = repo();
        let user = User::new("ada@example.com", "h".into(), "Ada", "L", UserRole::Standard);
        repo.insert(&user).await.unwrap();

        let found = repo.find_by_email("ADA@example.com ").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = repo();
        repo.insert(&User::new("a@x.io", "h".into(), "A", "B", UserRole::Standard))
            .await
            .unwrap();
        let err = repo
            .insert(&User::new("a@x.io", "h".into(), "C", "D", UserRole::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = repo();
        let user = User::new("a@x.io", "h".into(), "A", "B", UserRole::Standard);
        assert!(matches!(
            repo.update(&user).await.unwrap_err(),
            DomainError::EntityNotFound { .. }
        ));
    }
}
