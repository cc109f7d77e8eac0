//! Mock IntelOwl API server for E2E testing.
//!
//! An in-memory server that speaks the IntelOwl REST API. Unlike wiremock,
//! which mocks single exchanges per test, this server keeps state across
//! requests, so a test can create a tag, submit an analysis with it and read
//! the job back.
//!
//! # Example
//!
//! ```ignore
//! use intelowl::mock_server::MockServer;
//! use intelowl::{ClientOptions, Context, IntelOwlClient, TagParams};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = IntelOwlClient::new(ClientOptions::new(server.url(), "test-token")).unwrap();
//!     let ctx = Context::background();
//!
//!     // Server comes with default fixtures
//!     let tag = client.tags.get(&ctx, 1).await.unwrap();
//!     assert_eq!(tag.label, "TEST1");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
