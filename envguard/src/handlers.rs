//! Failure handlers and their defaults.
//!
//! A handler never hands back data. Whatever error it returns becomes the
//! result of the failed run (or of the blocked read).

use envguard_types::{FlagIssue, ValidationErrors};
use std::sync::Arc;
use tracing::error;

use crate::EnvError;

/// Called with every field issue when validation fails.
pub type ValidationErrorHandler = Arc<dyn Fn(&ValidationErrors) -> EnvError + Send + Sync>;

/// Called with every flag issue when a feature-flag check fails.
pub type FlagErrorHandler = Arc<dyn Fn(&[FlagIssue]) -> EnvError + Send + Sync>;

/// Called with the variable name when the guard blocks a client read.
pub type InvalidAccessHandler = Arc<dyn Fn(&str) -> EnvError + Send + Sync>;

pub(crate) fn on_validation_error(errors: &ValidationErrors) -> EnvError {
    error!(field_errors = ?errors.field_errors(), "invalid environment variables");
    EnvError::InvalidEnvironment(errors.clone())
}

pub(crate) fn on_flag_error(issues: &[FlagIssue]) -> EnvError {
    let violations: Vec<(&str, &str)> = issues
        .iter()
        .map(|i| (i.flag.as_str(), i.dependent.as_str()))
        .collect();
    error!(?violations, "invalid feature flags");
    EnvError::InvalidFeatureFlags(issues.to_vec())
}

pub(crate) fn on_invalid_access(variable: &str) -> EnvError {
    error!(variable, "attempted to access a server-side environment variable on the client");
    EnvError::InvalidAccess {
        variable: variable.to_string(),
    }
}
