//! Deleting resources.

use super::Resource;

/// A resource removable with `DELETE` on its item path.
///
/// Success is always `204 No Content`.
pub trait Deletable: Resource {}
