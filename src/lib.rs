//! IntelOwl API client library.
//!
//! A Rust library for the IntelOwl threat-intelligence platform REST API.
//! Every call goes through one executor that sends the request, reads the
//! response and classifies failures; resources share a generic CRUD service
//! parameterised by capability traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use intelowl::{Context, IntelOwlClient, ObservableAnalysisParams, TagParams};
//!
//! #[tokio::main]
//! async fn main() -> intelowl::Result<()> {
//!     // Create client from environment variables
//!     let client = IntelOwlClient::from_env()?;
//!     let ctx = Context::background();
//!
//!     // Create and list tags
//!     let tag = client.tags.create(&ctx, &TagParams::new("phishing", "#ff0000")).await?;
//!     let tags = client.tags.list(&ctx).await?;
//!     println!("Found {} tags", tags.len());
//!
//!     // Submit an observable and look at the resulting job
//!     let mut params = ObservableAnalysisParams::new("8.8.8.8");
//!     params.basic.tags_labels = vec![tag.label];
//!     let submitted = client.analyses.observable(&ctx, &params).await?;
//!     let job = client.jobs.get(&ctx, submitted.job_id).await?;
//!     println!("Job {} is {:?}", job.id, job.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ApiClient`] - builds, sends and classifies one request
//! - [`ResourceService`] - `list`/`get`/`create`/`update`/`delete` for any
//!   resource, enabled by [`Resource`], [`Listable`], [`Creatable`],
//!   [`Updatable`] and [`Deletable`]
//! - [`IntelOwlClient`] - one service per resource type
//!
//! # Errors
//!
//! [`IntelOwlError::Transport`] means no usable response arrived (network,
//! cancellation, decode). [`IntelOwlError::Client`] means the server
//! answered with an unexpected status; the [`ClientError`] carries the code
//! and the raw body.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `INTELOWL_TOKEN` (required) - Your IntelOwl API token
//! - `INTELOWL_URL` (optional) - Base URL (defaults to `http://localhost:80`)
//! - `INTELOWL_TIMEOUT_SECS` (optional) - Request timeout in seconds

pub mod cli;
mod client;
mod config;
mod context;
mod error;
mod facade;
mod models;
pub mod output;
mod pagination;
mod request;
mod service;
mod traits;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::ApiClient;
pub use config::{ClientOptions, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use context::Context;
pub use error::{ClientError, IntelOwlError, ResponseMeta, Result, TransportError};
pub use facade::IntelOwlClient;
pub use pagination::Page;
pub use request::{ApiRequest, ApiResponse};
pub use service::ResourceService;
pub use transport::HttpSender;

// Re-export traits
pub use traits::{Creatable, Deletable, HealthChecked, Listable, Resource, Updatable};

// Re-export models
pub use models::{
    // Tags
    Tag,
    TagParams,
    TagService,
    // Jobs
    Job,
    JobService,
    JobStatus,
    JobUser,
    PluginReport,
    ReportStatus,
    DEFAULT_PAGE_SIZE,
    // Plugins
    Analyzer,
    AnalyzerService,
    AnalyzerType,
    Connector,
    ConnectorService,
    ExecutionConfig,
    Playbook,
    PlaybookService,
    // Analysis
    AnalysisResponse,
    AnalysisService,
    BasicAnalysisParams,
    FileAnalysisParams,
    ObservableAnalysisParams,
    Tlp,
    // Users
    UserAccess,
    UserService,
};
