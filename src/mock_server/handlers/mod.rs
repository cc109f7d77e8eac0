//! HTTP request handlers for the mock server.

pub mod analysis;
pub mod jobs;
pub mod plugins;
pub mod tags;

pub use analysis::*;
pub use jobs::*;
pub use plugins::*;
pub use tags::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// State shared by all handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// The body IntelOwl answers unknown ids with.
pub(crate) fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not found.")
}

/// A `{"detail": "..."}` error response.
pub(crate) fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": message }))).into_response()
}

/// Reject requests without the configured `Authorization: Token ...` header.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();
    if let Some(token) = required {
        let expected = format!("Token {token}");
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return detail(StatusCode::UNAUTHORIZED, "Invalid token.");
        }
    }
    next.run(request).await
}
