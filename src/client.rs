//! Low-level IntelOwl API client.
//!
//! Owns the transport, base URL and credentials, and runs every request
//! through one code path that sends, reads and classifies the response.
//! Resource operations are built on top in [`ResourceService`](crate::ResourceService).

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientOptions;
use crate::context::Context;
use crate::error::{ClientError, IntelOwlError, ResponseMeta, Result, TransportError};
use crate::request::{ApiRequest, ApiResponse, RequestBody};
use crate::transport::HttpSender;

/// Low-level IntelOwl API client.
///
/// Performs exactly one HTTP round trip per call and never retries. This
/// struct is cheaply cloneable; clones share the same transport.
///
/// # Example
///
/// ```no_run
/// use intelowl::{ApiClient, ApiRequest, ClientOptions, Context, Tag};
///
/// # async fn example() -> intelowl::Result<()> {
/// let client = ApiClient::new(ClientOptions::new("http://localhost", "token"))?;
/// let tags: Vec<Tag> = client
///     .fetch(&Context::background(), ApiRequest::get("api/tags"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    sender: Arc<dyn HttpSender>,
    base_url: Arc<Url>,
    headers: Arc<HeaderMap>,
    options: Arc<ClientOptions>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.options.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that sends requests with `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is invalid, or the HTTP
    /// client cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = Self::build_http(&options)?;
        Self::assemble(options, http.clone(), Arc::new(http))
    }

    /// Create a client that sends requests through `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is invalid.
    pub fn with_sender(options: ClientOptions, sender: impl HttpSender) -> Result<Self> {
        let http = Self::build_http(&options)?;
        Self::assemble(options, http, Arc::new(sender))
    }

    fn build_http(options: &ClientOptions) -> Result<Client> {
        Client::builder()
            .user_agent(options.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(options.timeout)
            .build()
            .map_err(|e| IntelOwlError::Transport(TransportError::Http(e)))
    }

    fn assemble(options: ClientOptions, http: Client, sender: Arc<dyn HttpSender>) -> Result<Self> {
        let base_url = options.base_url()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", options.token)).map_err(|_| {
            IntelOwlError::ConfigMissing("token contains characters not allowed in a header".into())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http,
            sender,
            base_url: Arc::new(base_url),
            headers: Arc::new(headers),
            options: Arc::new(options),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the options this client was built from.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Send `request` and return the response if its status is expected.
    ///
    /// # Errors
    ///
    /// - [`IntelOwlError::Transport`] if no response was obtained or its body
    ///   could not be read, including when `ctx` is cancelled or expires
    ///   first.
    /// - [`IntelOwlError::Client`] if the status code is not one the request
    ///   expects. The message is the raw body.
    #[tracing::instrument(
        skip(self, ctx, request),
        fields(method = %request.method, path = %request.path)
    )]
    pub async fn execute(&self, ctx: &Context, request: ApiRequest) -> Result<ApiResponse> {
        let expected = request.expect.clone();
        let http_request = self.build(request)?;
        tracing::debug!(url = %http_request.url(), "sending request");

        let round_trip = async {
            let response = self.sender.send(http_request).await?;
            let meta = ResponseMeta {
                status: response.status(),
                headers: response.headers().clone(),
                url: response.url().clone(),
            };
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((meta, body.to_vec()))
        };

        let (meta, body) = match ctx.run(round_trip).await {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => return Err(TransportError::Http(e).into()),
            Err(aborted) => {
                tracing::warn!(error = %aborted, "request aborted by context");
                return Err(aborted.into());
            }
        };

        tracing::debug!(status = meta.status.as_u16(), bytes = body.len(), "received response");

        if expected.contains(&meta.status) {
            return Ok(ApiResponse::new(meta.status, body));
        }

        Err(ClientError {
            status_code: meta.status.as_u16(),
            message: String::from_utf8_lossy(&body).into_owned(),
            response: Some(meta),
        }
        .into())
    }

    /// Send `request` and decode the JSON body into `T`.
    ///
    /// A success response with an empty body yields `T::default()`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`]; additionally a non-empty body that does
    /// not decode into `T` is a [`TransportError::Decode`].
    pub async fn fetch<T: DeserializeOwned + Default>(
        &self,
        ctx: &Context,
        request: ApiRequest,
    ) -> Result<T> {
        let response = self.execute(ctx, request).await?;
        Ok(response.json_or_default()?)
    }

    /// Send a request whose success carries no body, returning `true`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn no_content(&self, ctx: &Context, request: ApiRequest) -> Result<bool> {
        self.execute(ctx, request).await?;
        Ok(true)
    }

    /// Build the transport request: base URL, path, query, default headers,
    /// body and timeout.
    fn build(&self, request: ApiRequest) -> Result<Request> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let builder = self
            .http
            .request(request.method, url)
            .headers((*self.headers).clone())
            .timeout(self.options.timeout);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        builder
            .build()
            .map_err(|e| IntelOwlError::Transport(TransportError::Http(e)))
    }
}
