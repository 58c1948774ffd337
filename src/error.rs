//! Error types for wptscore

use std::fmt;
use thiserror::Error;

/// What made two metadata trees unmergeable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeConflictKind {
    /// An array value was encountered; arrays are never merged, positionally
    /// or by concatenation
    Array,
    /// The same key carries a leaf value in both trees
    Overlap,
}

impl fmt::Display for MergeConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeConflictKind::Array => write!(f, "arrays can't be merged"),
            MergeConflictKind::Overlap => write!(f, "overlaps"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Two metadata trees collided during a non-overlapping merge. `key` is
    /// the slash-joined path from the root to the offending key. No partial
    /// result is produced.
    #[error("key {key}: {kind}")]
    MergeConflict {
        key: String,
        kind: MergeConflictKind,
    },

    /// A wptreport document violated the expected structure (`results` not an
    /// array, an entry missing `status`, a non-object `run_info`, ...)
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// IO error from the file-loading path
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON (de)serialization error from the file-loading path
    #[error("json error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Conflict constructor used by the merge walk; `path` is outermost-first.
    pub(crate) fn merge_conflict(path: &[&str], kind: MergeConflictKind) -> Self {
        Error::MergeConflict {
            key: path.join("/"),
            kind,
        }
    }
}

/// Result type for wptscore operations
pub type Result<T> = std::result::Result<T, Error>;
