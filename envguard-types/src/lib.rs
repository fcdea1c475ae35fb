//! Core type definitions for envguard.
//!
//! This crate defines the fundamental types shared by the schema model and
//! the validation pipeline:
//! - [`EnvValue`] and [`EnvMap`]: raw environment input and validated data
//! - [`Context`]: which side (server or client) a validation run targets
//! - [`FieldIssue`], [`FlagIssue`] and [`ValidationErrors`]: the two disjoint
//!   issue taxonomies reported by the pipeline
//!
//! "Undefined" is never a value here. A variable is undefined when its name
//! is absent from the map.

mod context;
mod issue;
mod value;

pub use context::Context;
pub use issue::{FieldIssue, FlagIssue, ValidationErrors};
pub use value::{EnvMap, EnvValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported value for {name}: {reason}")]
    UnsupportedValue { name: String, reason: String },
}
