//! Capability traits for IntelOwl resources.
//!
//! Every resource type implements [`Resource`], which makes it fetchable by
//! id. The remaining traits opt a resource into the other CRUD operations
//! its endpoints support; [`ResourceService`](crate::ResourceService) turns
//! them into methods.

mod create;
mod delete;
mod health;
mod list;
mod resource;
mod update;

pub use create::Creatable;
pub use delete::Deletable;
pub use health::HealthChecked;
pub use list::Listable;
pub use resource::Resource;
pub use update::Updatable;
