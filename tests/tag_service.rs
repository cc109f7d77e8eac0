//! Tag service tests against a wiremock IntelOwl API.
//!
//! Covers the CRUD contract end to end: request shape, success statuses and
//! how rejected requests surface as client errors.

use intelowl::{ClientError, ClientOptions, Context, IntelOwlClient, Tag, TagParams};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntelOwlClient {
    IntelOwlClient::new(ClientOptions::new(server.uri(), "test-token")).unwrap()
}

fn tag(id: u64, label: &str, color: &str) -> Tag {
    Tag {
        id,
        label: label.to_string(),
        color: color.to_string(),
    }
}

#[tokio::test]
async fn test_list_tags_preserves_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "label": "TEST1", "color": "#1c71d8"},
            {"id": 2, "label": "TEST2", "color": "#1c71d7"},
            {"id": 3, "label": "TEST3", "color": "#1c71d6"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tags = client.tags.list(&Context::background()).await.unwrap();

    assert_eq!(
        tags,
        vec![
            tag(1, "TEST1", "#1c71d8"),
            tag(2, "TEST2", "#1c71d7"),
            tag(3, "TEST3", "#1c71d6"),
        ]
    );
}

#[tokio::test]
async fn test_list_tags_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tags = client.tags.list(&Context::background()).await.unwrap();

    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_list_tags_empty_body_is_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tags = client.tags.list(&Context::background()).await.unwrap();

    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_get_tag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 1, "label": "TEST1", "color": "#1c71d8"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let got = client.tags.get(&Context::background(), 1).await.unwrap();

    assert_eq!(got, tag(1, "TEST1", "#1c71d8"));
}

#[tokio::test]
async fn test_get_missing_tag_is_client_error_with_raw_body() {
    let mock_server = MockServer::start().await;
    let body = r#"{"detail": "Not found."}"#;

    Mock::given(method("GET"))
        .and(path("/api/tags/9000"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.tags.get(&Context::background(), 9000).await.unwrap_err();

    assert!(err.is_client());
    assert_eq!(err.as_client(), Some(&ClientError::new(404, body)));
    assert!(err.as_client().unwrap().is_not_found());
    assert_eq!(err.as_client().unwrap().detail().as_deref(), Some("Not found."));
}

#[tokio::test]
async fn test_create_tag_sends_params_and_decodes_echo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"label": "TEST TAG", "color": "#fffff"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 1, "label": "TEST TAG", "color": "#fffff"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .tags
        .create(&Context::background(), &TagParams::new("TEST TAG", "#fffff"))
        .await
        .unwrap();

    assert_eq!(created, tag(1, "TEST TAG", "#fffff"));
}

#[tokio::test]
async fn test_create_tag_accepts_201() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"id": 5, "label": "new", "color": "#000000"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .tags
        .create(&Context::background(), &TagParams::new("new", "#000000"))
        .await
        .unwrap();

    assert_eq!(created.id, 5);
}

#[tokio::test]
async fn test_create_duplicate_tag_keeps_validation_body_verbatim() {
    let mock_server = MockServer::start().await;
    let body = r#"{"label":["tag with this label already exists."]}"#;

    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .tags
        .create(&Context::background(), &TagParams::new("TEST1", "#1c71d8"))
        .await
        .unwrap_err();

    let client_err = err.as_client().expect("expected client error");
    assert_eq!(client_err.status_code, 400);
    assert_eq!(client_err.message, body);
}

#[tokio::test]
async fn test_update_tag_uses_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/tags/2"))
        .and(body_json(serde_json::json!({"label": "renamed", "color": "#1c71d7"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 2, "label": "renamed", "color": "#1c71d7"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let updated = client
        .tags
        .update(
            &Context::background(),
            2,
            &TagParams::new("renamed", "#1c71d7"),
        )
        .await
        .unwrap();

    assert_eq!(updated, tag(2, "renamed", "#1c71d7"));
}

#[tokio::test]
async fn test_delete_tag_returns_true_on_204() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tags/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let deleted = client.tags.delete(&Context::background(), 1).await.unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn test_delete_tag_rejects_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tags/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.tags.delete(&Context::background(), 1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_delete_already_deleted_tag_is_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tags/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"Not found."}"#))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.tags.delete(&Context::background(), 1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_get_tag_empty_body_is_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let got = client.tags.get(&Context::background(), 1).await.unwrap();

    assert_eq!(got, Tag::default());
}
