//! Analyzer, connector and playbook endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{not_found, SharedState};
use crate::{Analyzer, Connector, Playbook};

/// GET /api/analyzer
pub async fn list_analyzers(State(state): State<SharedState>) -> Json<Vec<Analyzer>> {
    Json(state.read().await.analyzers.values().cloned().collect())
}

/// GET /api/analyzer/{name}
pub async fn get_analyzer(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.read().await.analyzers.get(&name) {
        Some(a) => (StatusCode::OK, Json(a.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/connector
pub async fn list_connectors(State(state): State<SharedState>) -> Json<Vec<Connector>> {
    Json(state.read().await.connectors.values().cloned().collect())
}

/// GET /api/connector/{name}
pub async fn get_connector(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.read().await.connectors.get(&name) {
        Some(c) => (StatusCode::OK, Json(c.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/{analyzer|connector}/{name}/health_check
pub async fn health_check(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.read().await.plugin_health(&name) {
        Some(status) => Json(serde_json::json!({ "status": status })).into_response(),
        None => not_found(),
    }
}

/// GET /api/playbook
pub async fn list_playbooks(State(state): State<SharedState>) -> Json<Vec<Playbook>> {
    Json(state.read().await.playbooks.values().cloned().collect())
}

/// GET /api/playbook/{name}
pub async fn get_playbook(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.read().await.playbooks.get(&name) {
        Some(p) => (StatusCode::OK, Json(p.clone())).into_response(),
        None => not_found(),
    }
}
