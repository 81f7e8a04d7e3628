//! Error types for model analysis and code generation
//!
//! One failure taxonomy for the whole pipeline. Malformed member text inside
//! a source file is never an error: the extractor silently skips what it
//! cannot match, and the validator reports problems as plain strings rather
//! than failing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ClassifierId;

/// Which end of a relationship failed endpoint validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Error types for diagram analysis and generation
#[derive(Error, Debug)]
pub enum DiagramError {
    /// A source file could not be read. Batch extraction skips the file and
    /// continues; single-file extraction surfaces this immediately.
    #[error("unreadable input {}: {}", .path.display(), .source)]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relationship referenced a classifier that is not part of the
    /// diagram. The diagram is left unchanged.
    #[error("relationship {endpoint} endpoint {id} is not part of the diagram")]
    DanglingEndpoint {
        endpoint: Endpoint,
        id: ClassifierId,
    },

    /// The generation output root exists as a non-directory or could not be
    /// created. Raised before any file is written.
    #[error("output target {} is not a usable directory", .path.display())]
    UnsupportedOutputTarget { path: PathBuf },

    /// A write failed partway through a multi-file generation run. Files
    /// already written are not rolled back; `written` counts them.
    #[error("write failed after {written} generated files: {source}")]
    Io {
        written: usize,
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create an `UnreadableInput` error for the given path
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableInput {
            path: path.into(),
            source,
        }
    }

    /// Create a `DanglingEndpoint` error
    pub fn dangling(endpoint: Endpoint, id: ClassifierId) -> Self {
        Self::DanglingEndpoint { endpoint, id }
    }
}
