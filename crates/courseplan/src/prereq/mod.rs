//! Prerequisite requirement trees and their display text.

mod cache;
mod error;
mod render;
mod tree;
mod types;

pub use cache::{CacheStats, ClauseKey, RenderCache};
pub use error::ClauseError;
pub use render::serialize;
pub use types::{CourseRef, Operator, PrerequisiteClause};
