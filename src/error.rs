//! Error types.
//!
//! Alignment itself is total and never fails; errors only come from
//! configuration, registry construction and corpus loading.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid [`AlignerBuilder`](crate::AlignerBuilder) settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("gap penalty must be non-negative, got {0}")]
    NegativeGap(i32),

    #[error("thread count must be positive")]
    ZeroThreads,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Rejected [`IntervalRegistry`](crate::IntervalRegistry) insertion.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("interval [{start}, {stop}) overlaps registered [{existing_start}, {existing_stop})")]
    Overlap {
        start: usize,
        stop: usize,
        existing_start: usize,
        existing_stop: usize,
    },

    #[error("interval [{start}, {stop}) is empty")]
    Empty { start: usize, stop: usize },
}

/// Failure while building a [`Corpus`](crate::Corpus).
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("corpus directory not found: {path}")]
    MissingDir { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed track list in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("track {track_index} of {artist}/{song}: delta {value} at position {position} is outside [-127, 127]")]
    DeltaOutOfRange {
        artist: String,
        song: String,
        track_index: i64,
        position: usize,
        value: i64,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
