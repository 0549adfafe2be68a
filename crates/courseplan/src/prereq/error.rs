//! Error types for prerequisite clause validation.

use thiserror::Error;

/// Malformations found by [`PrerequisiteClause::validate`](super::PrerequisiteClause::validate).
///
/// `path` locates the offending node: `$` is the root and each `[n]` steps
/// into the n-th sub-clause of a compound.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClauseError {
    /// A compound group with no sub-clauses
    #[error("Empty prerequisite group at {path}")]
    EmptyCompound { path: String },

    /// A compound group whose operator is neither "and" nor "or"
    #[error("Unrecognized operator {operator:?} at {path}")]
    UnrecognizedOperator { operator: String, path: String },

    /// A course reference with a blank identifier
    #[error("Empty course id at {path}")]
    EmptyCourseId { path: String },
}

impl ClauseError {
    /// Returns the location of the offending node.
    pub fn path(&self) -> &str {
        match self {
            ClauseError::EmptyCompound { path }
            | ClauseError::UnrecognizedOperator { path, .. }
            | ClauseError::EmptyCourseId { path } => path,
        }
    }
}
