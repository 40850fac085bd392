//! Error types for the library layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::classify::VoteTypeError;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Which reference table a [`TallyError::MissingReference`] failed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Legislator,
    Bill,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Legislator => write!(f, "legislator"),
            ReferenceKind::Bill => write!(f, "bill"),
        }
    }
}

/// Unrecoverable failures. Row-level problems are never raised through this
/// type; they are recorded as [`crate::diagnostics::Issue`]s instead.
#[derive(Debug, Error)]
pub enum TallyError {
    /// A required input file is absent.
    #[error("Missing required file: {}", .0.display())]
    MissingInput(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer failed in a way that is not attributable to a single row.
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The vote-type classification table could not be loaded.
    #[error("Invalid vote-type table: {0}")]
    VoteTypes(#[from] VoteTypeError),

    /// A tally refers to an id that the reference index does not hold.
    /// Aggregation only tallies resolved ids, so this indicates a bug.
    #[error("Internal integrity error: tally references unknown {kind} id {id}")]
    MissingReference { kind: ReferenceKind, id: i64 },
}

impl TallyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
