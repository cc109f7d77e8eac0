//! IntelOwl API model types.

mod analysis;
mod job;
mod plugin;
mod tag;
mod user;

pub use analysis::*;
pub use job::*;
pub use plugin::*;
pub use tag::*;
pub use user::*;
