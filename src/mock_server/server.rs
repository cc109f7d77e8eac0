//! Mock IntelOwl API server.
//!
//! Provides an axum-based HTTP server that simulates the IntelOwl REST API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// Content served by `download_sample` for jobs created from fixtures.
const FIXTURE_SAMPLE: &[u8] = b"%PDF-1.4 mock sample";

/// A mock IntelOwl API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// The default state with common test fixtures.
    pub fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Build state from a scenario. Sample jobs get placeholder file content.
    pub fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for tag in scenario.tags {
            state.tags.insert(tag.id, tag);
        }

        for job in scenario.jobs {
            if job.is_sample {
                state.samples.insert(job.id, FIXTURE_SAMPLE.to_vec());
            }
            state.jobs.insert(job.id, job);
        }

        for analyzer in scenario.analyzers {
            state.analyzers.insert(analyzer.name.clone(), analyzer);
        }

        for connector in scenario.connectors {
            state.connectors.insert(connector.name.clone(), connector);
        }

        for playbook in scenario.playbooks {
            state.playbooks.insert(playbook.name.clone(), playbook);
        }

        state
    }

    /// The axum router with every route.
    pub fn router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Tag routes
            .route("/api/tags", get(handlers::list_tags).post(handlers::create_tag))
            .route(
                "/api/tags/:id",
                get(handlers::get_tag)
                    .put(handlers::update_tag)
                    .delete(handlers::delete_tag),
            )
            // Job routes
            .route("/api/jobs", get(handlers::list_jobs))
            .route(
                "/api/jobs/:id",
                get(handlers::get_job).delete(handlers::delete_job),
            )
            .route("/api/jobs/:id/kill", patch(handlers::kill_job))
            .route("/api/jobs/:id/download_sample", get(handlers::download_sample))
            .route(
                "/api/jobs/:id/:kind/:name/:action",
                patch(handlers::plugin_action),
            )
            // Plugin routes
            .route("/api/analyzer", get(handlers::list_analyzers))
            .route("/api/analyzer/:name", get(handlers::get_analyzer))
            .route("/api/analyzer/:name/health_check", get(handlers::health_check))
            .route("/api/connector", get(handlers::list_connectors))
            .route("/api/connector/:name", get(handlers::get_connector))
            .route("/api/connector/:name/health_check", get(handlers::health_check))
            .route("/api/playbook", get(handlers::list_playbooks))
            .route("/api/playbook/:name", get(handlers::get_playbook))
            // Analysis and user routes
            .route("/api/analyze_observable", post(handlers::analyze_observable))
            .route("/api/analyze_file", post(handlers::analyze_file))
            .route("/api/me/access", get(handlers::user_access))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_token,
            ))
            // Liveness probe, outside authentication
            .route("/health", get(liveness))
            .with_state(state)
    }
}

async fn liveness() -> &'static str {
    "ok"
}
