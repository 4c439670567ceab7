use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::ResetRequest;

pub async fn create(
    pool: &PgPool,
    id: &str,
    email: &str,
    expires: DateTime<Utc>,
) -> Result<ResetRequest, sqlx::Error> {
    sqlx::query_as::<_, ResetRequest>(
        "INSERT INTO reset_password_requests (id, email, expires)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(id)
    .bind(email)
    .bind(expires)
    .fetch_one(pool)
    .await
}

/// Looks a request up by id only. Expiry is not filtered here.
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ResetRequest>, sqlx::Error> {
    sqlx::query_as::<_, ResetRequest>("SELECT * FROM reset_password_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_expiry(
    pool: &PgPool,
    id: &str,
    expires: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE reset_password_requests SET expires = $2, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(expires)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
