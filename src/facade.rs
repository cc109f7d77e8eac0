//! Client facade.

use crate::client::ApiClient;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::models::{
    AnalysisService, AnalyzerService, ConnectorService, JobService, PlaybookService, TagService,
    UserService,
};
use crate::transport::HttpSender;

/// Entry point to the IntelOwl API: one service per resource type, all
/// sharing a single [`ApiClient`].
///
/// Cheap to clone and safe to share between tasks; it holds no per-call
/// state.
///
/// # Example
///
/// ```no_run
/// use intelowl::{Context, IntelOwlClient};
///
/// # async fn example() -> intelowl::Result<()> {
/// let client = IntelOwlClient::from_env()?;
/// let ctx = Context::background();
///
/// for tag in client.tags.list(&ctx).await? {
///     println!("{} {}", tag.id, tag.label);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntelOwlClient {
    pub tags: TagService,
    pub jobs: JobService,
    pub analyzers: AnalyzerService,
    pub connectors: ConnectorService,
    pub playbooks: PlaybookService,
    pub users: UserService,
    pub analyses: AnalysisService,
    api: ApiClient,
}

impl IntelOwlClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientOptions::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `INTELOWL_TOKEN` is not set or the URL is invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    /// Create a client sending requests with `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is invalid.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self::from_api(ApiClient::new(options)?))
    }

    /// Create a client sending requests through a custom transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is invalid.
    pub fn with_sender(options: ClientOptions, sender: impl HttpSender) -> Result<Self> {
        Ok(Self::from_api(ApiClient::with_sender(options, sender)?))
    }

    /// Wrap an existing low-level client.
    pub fn from_api(api: ApiClient) -> Self {
        Self {
            tags: TagService::new(api.clone()),
            jobs: JobService::new(api.clone()),
            analyzers: AnalyzerService::new(api.clone()),
            connectors: ConnectorService::new(api.clone()),
            playbooks: PlaybookService::new(api.clone()),
            users: UserService::new(api.clone()),
            analyses: AnalysisService::new(api.clone()),
            api,
        }
    }

    /// The low-level client, for endpoints without a typed service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

// Shared across tasks without extra synchronization.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IntelOwlClient>();
};
