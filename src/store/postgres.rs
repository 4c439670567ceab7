use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{RequestStore, StoreError, UserStore};
use crate::db;
use crate::models::{ResetRequest, User};

#[derive(Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<ResetRequest>, StoreError> {
        Ok(db::reset_requests::find_by_id(&self.pool, id).await?)
    }

    async fn update_expiry(&self, id: &str, expires: DateTime<Utc>) -> Result<(), StoreError> {
        let updated = db::reset_requests::update_expiry(&self.pool, id, expires).await?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("reset request {id}")));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_email(&self.pool, email).await?)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let updated = db::users::update_password(&self.pool, id, password_hash).await?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("user {id}")));
        }
        Ok(())
    }
}
