//! Request and response values passed through the executor.

use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{IntelOwlError, Result, TransportError};

/// Body of an outgoing request.
#[derive(Debug, Default)]
pub(crate) enum RequestBody {
    #[default]
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

/// One API call: method, relative path, query, body and the status codes
/// that count as success.
///
/// Bodies are serialized when attached, so an unencodable body fails before
/// any network activity.
///
/// # Example
///
/// ```
/// use intelowl::ApiRequest;
/// use reqwest::StatusCode;
///
/// # fn main() -> intelowl::Result<()> {
/// let request = ApiRequest::post("api/tags")
///     .json(&serde_json::json!({"label": "malware", "color": "#ff0000"}))?
///     .expect(&[StatusCode::OK, StatusCode::CREATED]);
/// assert_eq!(request.path(), "api/tags");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: RequestBody,
    pub(crate) expect: Vec<StatusCode>,
}

impl ApiRequest {
    /// A request expecting `200 OK`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            expect: vec![StatusCode::OK],
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`IntelOwlError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(IntelOwlError::Encode)?;
        self.body = RequestBody::Json(bytes);
        Ok(self)
    }

    /// Attach a multipart form body.
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Replace the set of success status codes.
    #[must_use]
    pub fn expect(mut self, codes: &[StatusCode]) -> Self {
        self.expect = codes.to_vec();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expected(&self) -> &[StatusCode] {
        &self.expect
    }
}

/// A response whose status was in the request's success set, with the body
/// fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Returns true when the body is empty or only whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decode the body as JSON.
    ///
    /// An empty body decodes as JSON `null`, so `Option<T>` and `()` targets
    /// accept it while struct targets fail.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> core::result::Result<T, TransportError> {
        let decoded = if self.is_empty() {
            T::deserialize(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };
        decoded.map_err(|source| TransportError::Decode {
            source,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }

    /// Decode the body as JSON, using `T::default()` for an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if a non-empty body does not
    /// match `T`.
    pub fn json_or_default<T: DeserializeOwned + Default>(
        &self,
    ) -> core::result::Result<T, TransportError> {
        if self.is_empty() {
            return Ok(T::default());
        }
        self.json()
    }
}
