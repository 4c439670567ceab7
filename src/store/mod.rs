pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{ResetRequest, User};

pub use memory::{MemoryRequestStore, MemoryUserStore};
pub use postgres::{PgRequestStore, PgUserStore};

#[derive(Debug)]
pub enum StoreError {
    /// An update targeted a record that does not exist.
    NotFound(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "Record not found: {what}"),
            StoreError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<ResetRequest>, StoreError>;

    /// Overwrites the expiry. Errors with `NotFound` when no request has this id.
    async fn update_expiry(&self, id: &str, expires: DateTime<Utc>) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Overwrites the stored hash. Errors with `NotFound` when no user has this id.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;
}
