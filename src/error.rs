//! Crate error type.
//!
//! Only conditions that indicate corrupted input or configuration are errors.
//! Unplaceable matches and schedule rule violations are reported as data
//! (see [`Schedule`](crate::models::Schedule)), never as `Err`.

use std::path::PathBuf;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors raised while building the match graph or loading inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("division {division}: malformed player slot {label:?}")]
    MalformedSlot { division: String, label: String },

    #[error("division {division}: unrecognized draw format {format:?}")]
    UnknownFormat { division: String, format: String },

    #[error("match {match_id}: slot {label:?} references a match that does not exist")]
    UnknownFeeder { match_id: String, label: String },

    #[error("match graph failed integrity checks ({} problem(s))", .0.len())]
    InvalidGraph(Vec<ValidationError>),

    #[error("cyclic dependency detected at match {match_id}")]
    CyclicDependency { match_id: String },

    #[error("threshold for {scope} must be within [0, 1], got {value}")]
    InvalidThreshold { scope: String, value: f64 },

    #[error("seeding probability {key:?} must be within [0, 1], got {value}")]
    InvalidProbability { key: String, value: f64 },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
