use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn create(pool: &PgPool, email: &str, password: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(email)
    .bind(password)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Returns the number of rows touched so callers can detect a missing user.
pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
        .bind(id)
        .bind(password)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
