//! Error types for project search

use std::fmt;
use thiserror::Error;

/// Which pattern collection a filter pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Exclude,
    Include,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Exclude => f.write_str("exclude"),
            PatternKind::Include => f.write_str("include"),
        }
    }
}

/// Errors returned by [`find`](crate::core::find)
///
/// Per-directory I/O failures are not represented here: they are logged and
/// the affected branch simply contributes no projects.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A filter pattern failed to compile. Raised before any traversal.
    #[error("unable to compile {kind} patterns [{patterns}]: {source}")]
    InvalidPattern {
        kind: PatternKind,
        patterns: String,
        #[source]
        source: regex::Error,
    },

    /// The project callback failed; the search was cancelled and unwound.
    #[error(transparent)]
    Consumer(#[from] anyhow::Error),
}

impl SearchError {
    /// Returns true for errors raised before traversal started
    pub fn is_configuration(&self) -> bool {
        matches!(self, SearchError::InvalidPattern { .. })
    }
}
