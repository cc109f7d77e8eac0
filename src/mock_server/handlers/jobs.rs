//! Job endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{detail, not_found, SharedState};
use crate::Job;

/// Query parameters for listing jobs.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Paginated job list.
#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub count: u64,
    pub total_pages: u32,
    pub results: Vec<Job>,
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<SharedState>,
    Query(query): Query<ListJobsQuery>,
) -> Json<ListJobsResponse> {
    let state = state.read().await;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).max(1);

    let count = state.jobs.len() as u64;
    let total_pages = count.div_ceil(u64::from(page_size)) as u32;

    // Apply pagination
    let results = state
        .jobs
        .values()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .cloned()
        .collect();

    Json(ListJobsResponse {
        count,
        total_pages,
        results,
    })
}

/// GET /api/jobs/{id}
pub async fn get_job(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;
    match state.jobs.get(&id) {
        Some(job) => (StatusCode::OK, Json(job.clone())).into_response(),
        None => not_found(),
    }
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;
    match state.jobs.remove(&id) {
        Some(_) => {
            state.samples.remove(&id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

/// PATCH /api/jobs/{id}/kill
pub async fn kill_job(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;
    match state.kill_job(id) {
        Some(true) => StatusCode::NO_CONTENT.into_response(),
        Some(false) => detail(StatusCode::BAD_REQUEST, "Job is not running"),
        None => not_found(),
    }
}

/// GET /api/jobs/{id}/download_sample
pub async fn download_sample(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;
    if !state.jobs.contains_key(&id) {
        return not_found();
    }
    match state.samples.get(&id) {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes.clone(),
        )
            .into_response(),
        None => detail(
            StatusCode::BAD_REQUEST,
            "Requested job does not have a sample associated.",
        ),
    }
}

/// PATCH /api/jobs/{id}/{analyzer|connector}/{name}/{kill|retry}
pub async fn plugin_action(
    State(state): State<SharedState>,
    Path((id, kind, name, action)): Path<(u64, String, String, String)>,
) -> Response {
    let state = state.read().await;
    let Some(job) = state.jobs.get(&id) else {
        return not_found();
    };
    let plugins = match kind.as_str() {
        "analyzer" => &job.analyzers_to_execute,
        "connector" => &job.connectors_to_execute,
        _ => return not_found(),
    };
    if !matches!(action.as_str(), "kill" | "retry") || !plugins.contains(&name) {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
