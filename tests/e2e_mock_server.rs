//! E2E tests using the mock IntelOwl server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use intelowl::mock_server::{Fixtures, MockServer, MockState};
use intelowl::{
    ClientOptions, Context, FileAnalysisParams, IntelOwlClient, JobStatus,
    ObservableAnalysisParams, TagParams,
};

fn client_for(server: &MockServer) -> IntelOwlClient {
    IntelOwlClient::new(ClientOptions::new(server.url(), "test-token")).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, the client sees a transport failure
    let client = IntelOwlClient::new(ClientOptions::new(url, "test-token")).unwrap();
    let err = client.tags.list(&Context::background()).await.unwrap_err();

    assert!(err.is_transport());
}

// =============================================================================
// Tag Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_tag_crud_workflow() {
    let server = MockServer::start_empty().await;
    let client = client_for(&server);
    let ctx = Context::background();

    assert!(client.tags.list(&ctx).await.unwrap().is_empty());

    let created = client
        .tags
        .create(&ctx, &TagParams::new("TEST TAG", "#fffff"))
        .await
        .unwrap();
    assert_eq!(created.label, "TEST TAG");

    let fetched = client.tags.get(&ctx, created.id).await.unwrap();
    assert_eq!(fetched, created);

    let mut params = TagParams::from(&fetched);
    params.color = "#000000".to_string();
    let updated = client.tags.update(&ctx, created.id, &params).await.unwrap();
    assert_eq!(updated.color, "#000000");
    assert_eq!(updated.id, created.id);

    assert!(client.tags.delete(&ctx, created.id).await.unwrap());

    let err = client.tags.delete(&ctx, created.id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(
        err.as_client().unwrap().message,
        r#"{"detail":"Not found."}"#
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_tag_list_in_id_order() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let tags = client.tags.list(&Context::background()).await.unwrap();
    let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();

    assert_eq!(labels, vec!["TEST1", "TEST2", "TEST3"]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_update_to_taken_label_is_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .tags
        .update(&Context::background(), 2, &TagParams::new("TEST1", "#1c71d7"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));

    server.shutdown().await;
}

// =============================================================================
// Analysis Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_observable_analysis_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let ctx = Context::background();

    let before = client.users.access(&ctx).await.unwrap();

    let mut params = ObservableAnalysisParams::new("example.org");
    params.basic.tags_labels = vec!["TEST2".to_string()];
    let submitted = client.analyses.observable(&ctx, &params).await.unwrap();
    assert_eq!(submitted.status, "accepted");
    assert_eq!(submitted.analyzers_running, vec!["Classic_DNS", "Robtex"]);

    let job = client.jobs.get(&ctx, submitted.job_id).await.unwrap();
    assert_eq!(job.subject(), "example.org");
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.tags.len(), 1);
    assert_eq!(job.tags[0].label, "TEST2");

    assert!(client.jobs.kill(&ctx, job.id).await.unwrap());
    let killed = client.jobs.get(&ctx, job.id).await.unwrap();
    assert_eq!(killed.status, JobStatus::Killed);

    // A finished job cannot be killed again
    let err = client.jobs.kill(&ctx, job.id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));

    let after = client.users.access(&ctx).await.unwrap();
    assert_eq!(after.total_submissions, before.total_submissions + 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_file_analysis_and_download() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let ctx = Context::background();

    let content = b"MZ\x90\x00 fake executable".to_vec();
    let params = FileAnalysisParams::new("sample.exe", content.clone());
    let submitted = client.analyses.file(&ctx, &params).await.unwrap();

    let job = client.jobs.get(&ctx, submitted.job_id).await.unwrap();
    assert!(job.is_sample);
    assert_eq!(job.subject(), "sample.exe");

    let downloaded = client.jobs.download_sample(&ctx, job.id).await.unwrap();
    assert_eq!(downloaded, content);

    server.shutdown().await;
}

#[tokio::test]
async fn test_download_sample_of_observable_job_is_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .jobs
        .download_sample(&Context::background(), 1)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));

    server.shutdown().await;
}

// =============================================================================
// Job Paging Tests
// =============================================================================

#[tokio::test]
async fn test_list_all_jobs_across_pages() {
    let mut state = MockState::new();
    for id in 1..=25 {
        state = state.with_job(Fixtures::observable_job(
            id,
            &format!("host{id}.example"),
            JobStatus::ReportedWithoutFails,
        ));
    }
    let server = MockServer::with_state(state).await;
    let client = client_for(&server);
    let ctx = Context::background();

    let page = client.jobs.list_page(&ctx, 1, 10).await.unwrap();
    assert_eq!(page.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_more);

    let all = client.jobs.list_all(&ctx).await.unwrap();
    assert_eq!(all.len(), 25);

    server.shutdown().await;
}

#[tokio::test]
async fn test_plugin_actions_on_job() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let ctx = Context::background();

    assert!(client.jobs.retry_analyzer(&ctx, 1, "Classic_DNS").await.unwrap());

    let err = client
        .jobs
        .kill_connector(&ctx, 1, "NotAConnector")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

// =============================================================================
// Plugin Tests
// =============================================================================

#[tokio::test]
async fn test_plugins_and_health() {
    let mut state = MockServer::default_state();
    state.unhealthy.push("OpenCTI".to_string());
    let server = MockServer::with_state(state).await;
    let client = client_for(&server);
    let ctx = Context::background();

    let analyzers = client.analyzers.list(&ctx).await.unwrap();
    assert_eq!(analyzers.len(), 2);

    assert!(client.connectors.health_check(&ctx, "MISP").await.unwrap());
    assert!(!client.connectors.health_check(&ctx, "OpenCTI").await.unwrap());

    let err = client
        .analyzers
        .health_check(&ctx, "Missing")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    let playbook = client
        .playbooks
        .get(&ctx, "FREE_TO_USE_ANALYZERS".to_string())
        .await
        .unwrap();
    assert_eq!(playbook.analyzers, vec!["Classic_DNS"]);

    server.shutdown().await;
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_wrong_token_is_client_error() {
    let state = MockServer::default_state().with_required_token("right-token");
    let server = MockServer::with_state(state).await;

    let wrong = IntelOwlClient::new(ClientOptions::new(server.url(), "wrong-token")).unwrap();
    let err = wrong.tags.list(&Context::background()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(
        err.as_client().unwrap().detail().as_deref(),
        Some("Invalid token.")
    );

    let right = IntelOwlClient::new(ClientOptions::new(server.url(), "right-token")).unwrap();
    assert_eq!(right.tags.list(&Context::background()).await.unwrap().len(), 3);

    server.shutdown().await;
}
