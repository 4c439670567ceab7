use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::parser::{self, string_field};
use crate::error::AppError;
use crate::state::SharedState;

// Shared by the missing-field, unknown-request and unknown-user cases.
pub const ACCOUNT_NOT_FOUND: &str = "Couldn't find an account for this email";
pub const PASSWORD_REQUIREMENTS: &str = "Password does not meet the requirements";
pub const PASSWORD_RESET: &str = "Password reset.";

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn account_not_found() -> AppError {
    AppError::BadRequest(ACCOUNT_NOT_FOUND.to_string())
}

/// Completes a reset: `{ "password", "requestId" }` in, new credential stored and
/// the request stamped as expired.
///
/// Reset requests are looked up by id alone; an already expired request is still
/// honored. The credential write and the expiry write are two separate store calls.
pub async fn reset_password(
    State(state): State<SharedState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if method != Method::POST {
        return Err(AppError::BadRequest(String::new()));
    }

    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let data = parser::parse_body(content_type, &body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable reset-password body: {e}");
        Value::Null
    });

    let (Some(password), Some(request_id)) = (
        string_field(&data, "password"),
        string_field(&data, "requestId"),
    ) else {
        return Err(account_not_found());
    };

    let request = state
        .requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Unknown reset request {request_id}");
            account_not_found()
        })?;

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| {
            tracing::debug!("No user for reset request {request_id}");
            account_not_found()
        })?;

    if !state.policy.is_valid(password) {
        return Err(AppError::BadRequest(PASSWORD_REQUIREMENTS.to_string()));
    }

    let password_hash = state.hasher.hash(password).map_err(AppError::Internal)?;

    state.users.update_password(user.id, &password_hash).await?;

    if let Err(e) = state.requests.update_expiry(request_id, Utc::now()).await {
        tracing::warn!(
            "Password changed for user {} but reset request {request_id} is still open",
            user.id
        );
        return Err(e.into());
    }

    tracing::info!("Password reset for user {} via request {request_id}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: PASSWORD_RESET.to_string(),
        }),
    ))
}
