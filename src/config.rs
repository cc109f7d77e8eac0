//! Client configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{IntelOwlError, Result};

/// Base URL used when `INTELOWL_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:80";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("intelowl-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for an IntelOwl instance.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use intelowl::ClientOptions;
///
/// let options = ClientOptions::new("https://intelowl.example.com", "my-token")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(options.url, "https://intelowl.example.com");
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    /// Base URL of the IntelOwl instance (without the `api/` prefix).
    pub url: String,
    /// API token, sent as `Authorization: Token <token>`.
    pub token: String,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ClientOptions {
    /// Options for `url` authenticated with `token`, with default timeout.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Read options from environment variables.
    ///
    /// - `INTELOWL_TOKEN` (required)
    /// - `INTELOWL_URL` (optional, defaults to [`DEFAULT_API_URL`])
    /// - `INTELOWL_TIMEOUT_SECS` (optional, defaults to 30)
    ///
    /// # Errors
    ///
    /// Returns [`IntelOwlError::ConfigMissing`] if `INTELOWL_TOKEN` is not set
    /// or `INTELOWL_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        let token = env::var("INTELOWL_TOKEN").map_err(|_| {
            IntelOwlError::ConfigMissing("INTELOWL_TOKEN environment variable not set".to_string())
        })?;

        let url = env::var("INTELOWL_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let mut options = Self::new(url, token);
        if let Ok(secs) = env::var("INTELOWL_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                IntelOwlError::ConfigMissing(format!(
                    "INTELOWL_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            options.timeout = Duration::from_secs(secs);
        }
        Ok(options)
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse the base URL, making sure it ends with `/` so relative paths
    /// join below it.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let base = if self.url.ends_with('/') {
            self.url.clone()
        } else {
            format!("{}/", self.url)
        };
        Ok(Url::parse(&base)?)
    }
}
