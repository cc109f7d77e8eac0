//! Health checks for plugin resources.

use super::Resource;

/// A plugin (analyzer, connector) exposing `{collection}/{name}/health_check`.
pub trait HealthChecked: Resource<Id = String> {}
