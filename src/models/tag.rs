//! Tag model.
//!
//! Tags are coloured labels attached to jobs.

use serde::{Deserialize, Serialize};

use crate::service::ResourceService;
use crate::traits::{Creatable, Deletable, Listable, Resource, Updatable};

/// A job tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned id.
    pub id: u64,
    /// Unique label.
    pub label: String,
    /// Display colour, usually a hex string like `#1c71d8`.
    pub color: String,
}

/// Fields a caller sets when creating or updating a [`Tag`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagParams {
    pub label: String,
    pub color: String,
}

impl TagParams {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

impl From<&Tag> for TagParams {
    fn from(tag: &Tag) -> Self {
        Self {
            label: tag.label.clone(),
            color: tag.color.clone(),
        }
    }
}

impl Resource for Tag {
    type Id = u64;
    const COLLECTION: &'static str = "api/tags";
}

impl Listable for Tag {}

impl Creatable for Tag {
    type CreateParams = TagParams;
}

impl Updatable for Tag {
    type UpdateParams = TagParams;
}

impl Deletable for Tag {}

/// Service for `api/tags`.
pub type TagService = ResourceService<Tag>;
