//! Error types for the decomposition pipeline.
//!
//! Source-level failures ([`Error::SourceNotFound`], [`Error::MissingChannel`],
//! [`Error::SourceRead`]) are recoverable: the loader records them and skips the
//! source. Everything else aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, assembling, decomposing or exporting.
#[derive(Debug, Error)]
pub enum Error {
    /// A nominal source does not exist in storage.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Path of the missing source.
        path: PathBuf,
    },

    /// The source exists but lacks the expected vector field.
    #[error("vector field '{field}' not found in {}", path.display())]
    MissingChannel {
        /// Path of the offending source.
        path: PathBuf,
        /// Name of the field that was looked up.
        field: String,
    },

    /// The source exists but could not be read or parsed.
    #[error("failed to read {}: {detail}", path.display())]
    SourceRead {
        /// Path of the offending source.
        path: PathBuf,
        /// Description of the reader failure.
        detail: String,
    },

    /// Snapshots disagree on the number of mesh points.
    ///
    /// `index` is the position of the first snapshot whose point count
    /// differs from snapshot 0.
    #[error("snapshot {index} has {found} points but snapshot 0 has {expected}")]
    ShapeMismatch {
        /// Index of the offending snapshot.
        index: usize,
        /// Point count of the first snapshot.
        expected: usize,
        /// Point count of the offending snapshot.
        found: usize,
    },

    /// No snapshots were supplied to the assembler.
    #[error("no snapshots to decompose")]
    EmptyInput,

    /// The singular value decomposition did not converge.
    #[error("singular value decomposition failed: {0}")]
    NumericalFailure(String),

    /// The requested number of modes is outside `1..=available`.
    #[error("cannot select {requested} modes: between 1 and {available} are available")]
    InvalidModeCount {
        /// Number of modes requested.
        requested: usize,
        /// Number of left singular vectors available.
        available: usize,
    },

    /// Writing one of the output artifacts failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Artifact that could not be written.
        path: PathBuf,
        /// Underlying adapter error.
        #[source]
        source: crate::io::Error,
    },

    /// Failed to parse a TOML run configuration.
    #[error("failed to parse run configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// Creates a [`ShapeMismatch`](Error::ShapeMismatch) error.
    pub fn shape_mismatch(index: usize, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            index,
            expected,
            found,
        }
    }

    /// Creates a [`Write`](Error::Write) error for the artifact at `path`.
    pub fn write(path: impl Into<PathBuf>, source: crate::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures the loader absorbs by skipping the source.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::SourceNotFound { .. } | Error::MissingChannel { .. } | Error::SourceRead { .. }
        )
    }
}
