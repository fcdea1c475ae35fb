//! Schema model for envguard.
//!
//! Defines what a caller declares before a validation run:
//! - [`FieldValidator`]: the per-variable parse capability
//! - [`FieldRule`]: the built-in declarative validators
//! - [`EnvSchema`]: shared, client and server declaration groups, plus the
//!   client prefix and the partitioning into client- and server-visible sets
//! - [`FeatureFlags`]: which variables become mandatory when a flag is on
//! - [`EnvManifest`]: the JSON form of a schema and its flags
//!
//! Nothing here reads the process environment or runs the pipeline; that
//! lives in the `envguard` crate.

mod error;
mod flags;
mod manifest;
mod rule;
mod schema;
mod validator;

pub use error::{SchemaError, SchemaResult};
pub use flags::FeatureFlags;
pub use manifest::EnvManifest;
pub use rule::{FieldKind, FieldRule};
pub use schema::{EnvSchema, EnvSchemaBuilder, Scope, VariableDeclaration};
pub use validator::{FieldValidator, FnValidator, from_fn};
