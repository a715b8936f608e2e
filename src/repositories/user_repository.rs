// src/repositories/user_repository.rs
//
// Account collection

use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::user::{Role, User};
use crate::error::AppResult;

pub trait UserRepository: Send + Sync {
    /// Insert or replace by id
    fn save(&self, user: &User) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    fn list_admins(&self) -> AppResult<Vec<User>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
    /// Replace the whole collection (snapshot load)
    fn replace_all(&self, users: Vec<User>) -> AppResult<()>;
}

/// Registry state lives in memory; insertion order is preserved.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().expect("repository lock poisoned");
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().expect("repository lock poisoned");
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().expect("repository lock poisoned");
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().expect("repository lock poisoned");
        Ok(users.clone())
    }

    fn list_admins(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().expect("repository lock poisoned");
        Ok(users.iter().filter(|u| u.role == Role::Admin).cloned().collect())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let users = self.users.read().expect("repository lock poisoned");
        Ok(users.iter().any(|u| u.id == id))
    }

    fn replace_all(&self, replacement: Vec<User>) -> AppResult<()> {
        let mut users = self.users.write().expect("repository lock poisoned");
        *users = replacement;
        Ok(())
    }
}
