use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// PHC-formatted hash, never the plaintext.
    pub password: String,
    pub created_at: DateTime<Utc>,
}
