//! Pluggable HTTP transport.

use async_trait::async_trait;
use reqwest::{Request, Response};

/// Sends a fully built request and returns the raw response.
///
/// The default implementation is [`reqwest::Client`]. Provide your own to
/// route requests through a proxy layer, record traffic, or fake the network
/// in tests. Implementations must not inspect the status code; that is the
/// executor's job.
#[async_trait]
pub trait HttpSender: Send + Sync + 'static {
    /// Send `request`, failing only when no response was obtained.
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl HttpSender for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.execute(request).await
    }
}
