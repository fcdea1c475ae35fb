//! Environment validation split by execution context.
//!
//! Declares environment variables in three groups (shared, client, server),
//! validates a raw environment against the part of the schema the current
//! [`Context`] may see, applies an optional transform, enforces feature-flag
//! dependencies and returns a [`GuardedEnv`] whose reads are checked against
//! the context on every access.
//!
//! ```no_run
//! use envguard::{EnvOptions, EnvSchema, FeatureFlags, FieldRule, create_env};
//!
//! # fn main() -> Result<(), envguard::EnvError> {
//! let schema = EnvSchema::builder()
//!     .client_prefix("PUBLIC_")
//!     .shared("NODE_ENV", FieldRule::enumeration(["development", "production"]))
//!     .client("PUBLIC_API_URL", FieldRule::url())
//!     .server("BILLING", FieldRule::boolean().default_value("false"))
//!     .server("BILLING_KEY", FieldRule::string().optional())
//!     .build()?;
//!
//! let env = create_env(
//!     EnvOptions::new(schema).feature_flags(FeatureFlags::new().flag("BILLING", ["BILLING_KEY"])),
//! )?;
//! let api = env.get_str("PUBLIC_API_URL")?;
//! # let _ = api;
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! raw env → schema partition → dual-context validation → transform →
//! feature-flag check → [`GuardedEnv`]. Each stage either hands its output to
//! the next or terminates the run through the matching error handler; no
//! partially valid data is ever returned.

mod env;
mod error;
mod flags;
mod guard;
mod handlers;
mod options;
mod source;
mod validate;

pub use env::create_env;
pub use error::{EnvError, EnvResult};
pub use flags::check_feature_flags;
pub use guard::GuardedEnv;
pub use handlers::{FlagErrorHandler, InvalidAccessHandler, ValidationErrorHandler};
pub use options::EnvOptions;
pub use source::{EnvSource, ProcessEnv};
pub use validate::validate;

pub use envguard_model::{
    EnvManifest, EnvSchema, EnvSchemaBuilder, FeatureFlags, FieldKind, FieldRule, FieldValidator,
    FnValidator, SchemaError, Scope, VariableDeclaration, from_fn,
};
pub use envguard_types::{Context, EnvMap, EnvValue, FieldIssue, FlagIssue, ValidationErrors};
