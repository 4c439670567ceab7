use chrono::{DateTime, Utc};

/// A pending password reset, created by the forgot-password flow.
///
/// Completing a reset stamps `expires` with the completion time instead of
/// deleting the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResetRequest {
    pub id: String,
    pub email: String,
    pub expires: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
