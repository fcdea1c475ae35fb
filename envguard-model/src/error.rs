//! Error types for schema construction.

use thiserror::Error;

/// Schema declaration errors, raised when a schema is built.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The same name was declared in more than one place.
    #[error("variable {0} is declared more than once")]
    DuplicateVariable(String),

    /// Client variables were declared without a client prefix.
    #[error("client variables require a client prefix")]
    MissingClientPrefix,

    /// A client variable does not start with the client prefix.
    #[error("{name} is not prefixed with {prefix}")]
    ClientNotPrefixed { name: String, prefix: String },

    /// A server variable starts with the client prefix.
    #[error("{name} should not be prefixed with {prefix}")]
    ServerPrefixed { name: String, prefix: String },

    /// Manifest JSON is malformed or has unsupported values.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
