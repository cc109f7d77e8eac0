//! Tag endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{not_found, SharedState};
use crate::{Tag, TagParams};

/// Incoming tag body; fields are optional so missing ones can be reported
/// the way the server does.
#[derive(Debug, Deserialize)]
pub struct TagBody {
    pub label: Option<String>,
    pub color: Option<String>,
}

impl TagBody {
    fn validate(self) -> Result<TagParams, Response> {
        let mut errors = serde_json::Map::new();
        let label = self.label.filter(|l| !l.is_empty());
        let color = self.color.filter(|c| !c.is_empty());
        if label.is_none() {
            errors.insert("label".into(), serde_json::json!(["This field is required."]));
        }
        if color.is_none() {
            errors.insert("color".into(), serde_json::json!(["This field is required."]));
        }
        match (label, color) {
            (Some(label), Some(color)) => Ok(TagParams { label, color }),
            _ => Err((StatusCode::BAD_REQUEST, Json(errors)).into_response()),
        }
    }
}

fn duplicate_label() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"label": ["tag with this label already exists."]})),
    )
        .into_response()
}

/// GET /api/tags
pub async fn list_tags(State(state): State<SharedState>) -> Json<Vec<Tag>> {
    let state = state.read().await;
    Json(state.tags.values().cloned().collect())
}

/// GET /api/tags/{id}
pub async fn get_tag(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;
    match state.tags.get(&id) {
        Some(tag) => (StatusCode::OK, Json(tag.clone())).into_response(),
        None => not_found(),
    }
}

/// POST /api/tags
pub async fn create_tag(State(state): State<SharedState>, Json(body): Json<TagBody>) -> Response {
    let params = match body.validate() {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let mut state = state.write().await;
    match state.create_tag(params) {
        Some(tag) => (StatusCode::CREATED, Json(tag)).into_response(),
        None => duplicate_label(),
    }
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<TagBody>,
) -> Response {
    let params = match body.validate() {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let mut state = state.write().await;
    match state.update_tag(id, params) {
        Ok(Some(tag)) => (StatusCode::OK, Json(tag)).into_response(),
        Ok(None) => not_found(),
        Err(()) => duplicate_label(),
    }
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;
    match state.tags.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
