pub mod parser;
pub mod reset_password;

use axum::routing::any;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    // Every method reaches the handler; it answers non-POST itself.
    Router::new().route("/api/auth/reset-password", any(reset_password::reset_password))
}
