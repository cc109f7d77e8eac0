//! Analysis submission and user endpoint handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{detail, SharedState};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;
use crate::{AnalysisResponse, Job, JobStatus, Tlp, UserAccess};

/// Body of `POST /api/analyze_observable`.
#[derive(Debug, Deserialize)]
pub struct ObservableBody {
    pub observable_name: String,
    #[serde(default)]
    pub observable_classification: Option<String>,
    #[serde(default)]
    pub tlp: Option<Tlp>,
    #[serde(default)]
    pub analyzers_requested: Vec<String>,
    #[serde(default)]
    pub connectors_requested: Vec<String>,
    #[serde(default)]
    pub tags_labels: Vec<String>,
}

/// Fill in the plugin lists the way the server does: an empty request means
/// every known plugin.
fn resolve_plugins(state: &MockState, job: &mut Job) {
    job.analyzers_to_execute = if job.analyzers_requested.is_empty() {
        state.analyzers.keys().cloned().collect()
    } else {
        job.analyzers_requested.clone()
    };
    job.connectors_to_execute = if job.connectors_requested.is_empty() {
        state.connectors.keys().cloned().collect()
    } else {
        job.connectors_requested.clone()
    };
}

fn accepted(id: u64, job: &Job) -> Response {
    Json(AnalysisResponse {
        job_id: id,
        status: "accepted".to_string(),
        warnings: vec![],
        analyzers_running: job.analyzers_to_execute.clone(),
        connectors_running: job.connectors_to_execute.clone(),
    })
    .into_response()
}

/// POST /api/analyze_observable
pub async fn analyze_observable(
    State(state): State<SharedState>,
    Json(body): Json<ObservableBody>,
) -> Response {
    if body.observable_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"observable_name": ["This field may not be blank."]})),
        )
            .into_response();
    }

    let mut state = state.write().await;
    let mut job = Fixtures::observable_job(0, &body.observable_name, JobStatus::Pending);
    job.observable_classification = body
        .observable_classification
        .unwrap_or_else(|| "generic".to_string());
    job.tlp = body.tlp.unwrap_or_default();
    job.analyzers_requested = body.analyzers_requested;
    job.connectors_requested = body.connectors_requested;
    job.tags = state.tags_by_label(&body.tags_labels);
    resolve_plugins(&state, &mut job);

    let id = state.insert_job(job.clone());
    accepted(id, &job)
}

/// POST /api/analyze_file
pub async fn analyze_file(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut file_name = None;
    let mut tlp = Tlp::Clear;
    let mut analyzers = Vec::new();
    let mut connectors = Vec::new();
    let mut labels = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return detail(StatusCode::BAD_REQUEST, &e.body_text()),
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let uploaded_name = field.file_name().unwrap_or("file").to_string();
            match field.bytes().await {
                Ok(bytes) => file = Some((uploaded_name, bytes.to_vec())),
                Err(e) => return detail(StatusCode::BAD_REQUEST, &e.body_text()),
            }
            continue;
        }
        let value = match field.text().await {
            Ok(v) => v,
            Err(e) => return detail(StatusCode::BAD_REQUEST, &e.body_text()),
        };
        match name.as_str() {
            "file_name" => file_name = Some(value),
            "tlp" => tlp = serde_json::from_value(serde_json::Value::String(value)).unwrap_or_default(),
            "analyzers_requested" => analyzers.push(value),
            "connectors_requested" => connectors.push(value),
            "tags_labels" => labels.push(value),
            _ => {}
        }
    }

    let Some((uploaded_name, bytes)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"file": ["No file was submitted."]})),
        )
            .into_response();
    };

    let mut state = state.write().await;
    let mut job = Fixtures::sample_job(0, &file_name.unwrap_or(uploaded_name));
    job.status = JobStatus::Pending;
    job.finished_analysis_time = None;
    job.process_time = None;
    job.tlp = tlp;
    job.analyzers_requested = analyzers;
    job.connectors_requested = connectors;
    job.tags = state.tags_by_label(&labels);
    resolve_plugins(&state, &mut job);

    let id = state.insert_job(job.clone());
    state.samples.insert(id, bytes);
    accepted(id, &job)
}

/// GET /api/me/access
pub async fn user_access(State(state): State<SharedState>) -> Json<UserAccess> {
    Json(state.read().await.access.clone())
}
