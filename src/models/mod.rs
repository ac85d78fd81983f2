//! Hangar API model types.

mod page;
mod project;
mod stats;
mod user;
mod version;

pub use page::*;
pub use project::*;
pub use stats::*;
pub use user::*;
pub use version::*;
