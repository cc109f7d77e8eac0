//! Creating resources.

use reqwest::StatusCode;
use serde::Serialize;

use super::Resource;

/// A resource that can be created by `POST`ing to its collection.
pub trait Creatable: Resource {
    /// Caller-settable fields sent as the request body.
    type CreateParams: Serialize + Send + Sync;

    /// Status codes the create endpoint answers with on success.
    const CREATE_STATUS: &'static [StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
}
