//! DashMap-backed stores for tests and local runs without Postgres.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::{RequestStore, StoreError, UserStore};
use crate::models::{ResetRequest, User};

#[derive(Default)]
pub struct MemoryRequestStore {
    requests: DashMap<String, ResetRequest>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, email: &str, expires: DateTime<Utc>) -> ResetRequest {
        let now = Utc::now();
        let request = ResetRequest {
            id: id.to_string(),
            email: email.to_string(),
            expires,
            created_at: now,
            updated_at: now,
        };
        self.requests.insert(request.id.clone(), request.clone());
        request
    }

    pub fn get(&self, id: &str) -> Option<ResetRequest> {
        self.requests.get(id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<ResetRequest>, StoreError> {
        Ok(self.get(id))
    }

    async fn update_expiry(&self, id: &str, expires: DateTime<Utc>) -> Result<(), StoreError> {
        let mut entry = self
            .requests
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("reset request {id}")))?;
        entry.expires = expires;
        entry.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, email: &str, password_hash: &str) -> User {
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;
        entry.password = password_hash.to_string();
        Ok(())
    }
}
