//! Error types for the validation pipeline.

use envguard_model::SchemaError;
use envguard_types::{FlagIssue, ValidationErrors};
use thiserror::Error;

/// Errors produced by [`create_env`](crate::create_env) and by reads through
/// a [`GuardedEnv`](crate::GuardedEnv).
#[derive(Debug, Error)]
pub enum EnvError {
    /// One or more declared variables failed validation.
    #[error("Invalid environment variables: {0}")]
    InvalidEnvironment(ValidationErrors),

    /// One or more enabled feature flags have undefined dependents.
    #[error("Invalid feature flags: {}", describe_flag_issues(.0))]
    InvalidFeatureFlags(Vec<FlagIssue>),

    /// A server-side variable was read from a client context.
    #[error("Attempted to access a server-side environment variable on the client: {variable}")]
    InvalidAccess { variable: String },

    /// A required read found no value.
    #[error("environment variable {0} is not set")]
    Missing(String),

    /// A typed read found a value of another type.
    #[error("environment variable {name} is not a {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Raised by caller-supplied handlers.
    #[error("{0}")]
    Custom(String),
}

/// Result type for pipeline operations.
pub type EnvResult<T> = Result<T, EnvError>;

fn describe_flag_issues(issues: &[FlagIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
