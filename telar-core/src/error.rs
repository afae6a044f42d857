//! Error types for telar.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for telar operations.
pub type Result<T> = std::result::Result<T, TelarError>;

/// How an error should be surfaced to the operator.
///
/// Validation and precondition failures are local and leave all state
/// untouched; transport and malformed-data failures involved an external
/// input and are reported without partially applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A candidate VM specification was rejected before touching the graph.
    Validation,
    /// An operation was refused before any request was issued.
    Precondition,
    /// The provisioning service could not be reached or rejected a request.
    Transport,
    /// External data (template file, backend payload) did not decode.
    MalformedData,
}

/// Main error type for telar.
#[derive(Error, Debug)]
pub enum TelarError {
    // VM form validation errors
    #[error("VM name cannot be empty")]
    EmptyName,

    #[error("A VM named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Invalid resources: {}", fields.join(", "))]
    InvalidResources { fields: Vec<String> },

    #[error("Unknown image id: {image_id}")]
    UnknownImage { image_id: i64 },

    #[error("No images available from the provisioning service")]
    EmptyCatalog,

    // Graph errors
    #[error("No VM named '{name}' in the topology")]
    UnknownNode { name: String },

    #[error("{reason}")]
    Selection { reason: String },

    // Save/deploy preconditions
    #[error("The topology is empty, add at least one VM first")]
    EmptyTopology,

    #[error("The slice has not been saved yet, save it before deploying")]
    NotSaved,

    #[error("There are unsaved changes, save the slice before deploying")]
    PendingChanges,

    // Template codec errors
    #[error("Malformed template: {reason}")]
    MalformedTemplate { reason: String },

    // Transport errors
    #[error("Provisioning service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request to provisioning service failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    // Configuration and file errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TelarError {
    /// Classify this error for display purposes.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyName
            | Self::DuplicateName { .. }
            | Self::InvalidResources { .. }
            | Self::UnknownImage { .. }
            | Self::EmptyCatalog => ErrorClass::Validation,
            Self::UnknownNode { .. }
            | Self::Selection { .. }
            | Self::EmptyTopology
            | Self::NotSaved
            | Self::PendingChanges => ErrorClass::Precondition,
            Self::Api { .. } | Self::Transport { .. } => ErrorClass::Transport,
            Self::MalformedTemplate { .. }
            | Self::Io { .. }
            | Self::InvalidConfig { .. }
            | Self::Other(_) => ErrorClass::MalformedData,
        }
    }

    /// Create a [`TelarError::Selection`] with the given reason.
    pub fn selection(reason: impl Into<String>) -> Self {
        Self::Selection { reason: reason.into() }
    }

    /// Create a [`TelarError::MalformedTemplate`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTemplate { reason: reason.into() }
    }

    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

impl From<reqwest::Error> for TelarError {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }
}
