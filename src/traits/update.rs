//! Update trait for modifying resources.

use reqwest::{Method, StatusCode};
use serde::Serialize;

use super::Resource;

/// A resource that can be modified after creation.
///
/// # Example
///
/// ```ignore
/// impl Updatable for Tag {
///     type UpdateParams = TagParams;
/// }
/// ```
pub trait Updatable: Resource {
    /// Fields sent as the request body.
    type UpdateParams: Serialize + Send + Sync;

    /// `PUT` for full replacement, `PATCH` for partial updates.
    const UPDATE_METHOD: Method = Method::PUT;

    /// Status codes the update endpoint answers with on success.
    const UPDATE_STATUS: &'static [StatusCode] = &[StatusCode::OK];
}
