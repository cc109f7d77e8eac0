//! Base trait for addressable resources.

use std::fmt::Display;

use serde::de::DeserializeOwned;

/// A server-owned entity addressable by a collection path and an id.
///
/// `Default` is the value an empty success body decodes to.
///
/// Implementing this trait is all a resource needs for
/// [`ResourceService::get`](crate::ResourceService::get).
///
/// # Example
///
/// ```ignore
/// impl Resource for Tag {
///     type Id = u64;
///     const COLLECTION: &'static str = "api/tags";
/// }
/// ```
pub trait Resource: DeserializeOwned + Default + Send + Sync + 'static {
    /// The identifier type (integer id or name).
    type Id: Display + Send + Sync;

    /// Collection path relative to the base URL, without trailing slash.
    const COLLECTION: &'static str;

    /// Path of a single item in the collection.
    ///
    /// The id is percent-encoded so names containing `/` or spaces stay in
    /// one path segment.
    fn item_path(id: &Self::Id) -> String {
        format!(
            "{}/{}",
            Self::COLLECTION,
            urlencoding::encode(&id.to_string())
        )
    }
}
