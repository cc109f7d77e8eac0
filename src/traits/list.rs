//! Listing a whole collection.

use super::Resource;

/// A resource whose collection endpoint returns a bare JSON array.
///
/// Paginated collections (like jobs) do not implement this trait and expose
/// their own page-based listing instead.
pub trait Listable: Resource {}
