use envguard_model::{EnvManifest, EnvSchema, FeatureFlags, SchemaResult};
use envguard_types::{EnvMap, FlagIssue, ValidationErrors};
use std::fmt;
use std::sync::Arc;

use crate::EnvError;
use crate::handlers::{FlagErrorHandler, InvalidAccessHandler, ValidationErrorHandler};
use crate::source::EnvSource;

pub(crate) type Transform = Box<dyn FnOnce(EnvMap) -> EnvMap>;

/// Everything one [`create_env`](crate::create_env) run needs.
///
/// Only the schema is mandatory. Unset options fall back to:
/// the process environment ([`ProcessEnv`](crate::ProcessEnv)), the context
/// inferred by [`Context::detect`](envguard_types::Context::detect), no
/// transform, no feature flags, and handlers that log through `tracing` and
/// fail the run.
pub struct EnvOptions {
    pub(crate) schema: EnvSchema,
    pub(crate) source: Option<Box<dyn EnvSource>>,
    pub(crate) is_server: Option<bool>,
    pub(crate) transform: Option<Transform>,
    pub(crate) feature_flags: FeatureFlags,
    pub(crate) skip_validation: bool,
    pub(crate) on_validation_error: Option<ValidationErrorHandler>,
    pub(crate) on_flag_error: Option<FlagErrorHandler>,
    pub(crate) on_invalid_access: Option<InvalidAccessHandler>,
}

impl EnvOptions {
    pub fn new(schema: EnvSchema) -> Self {
        Self {
            schema,
            source: None,
            is_server: None,
            transform: None,
            feature_flags: FeatureFlags::default(),
            skip_validation: false,
            on_validation_error: None,
            on_flag_error: None,
            on_invalid_access: None,
        }
    }

    /// Options for a manifest's schema and feature flags.
    pub fn from_manifest(manifest: EnvManifest) -> SchemaResult<Self> {
        let (schema, flags) = manifest.into_parts()?;
        Ok(Self::new(schema).feature_flags(flags))
    }

    /// Validates this fixed map instead of the process environment.
    #[must_use]
    pub fn runtime_env(self, env: EnvMap) -> Self {
        self.source(env)
    }

    #[must_use]
    pub fn source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Overrides context inference.
    #[must_use]
    pub fn is_server(mut self, is_server: bool) -> Self {
        self.is_server = Some(is_server);
        self
    }

    /// Replaces the validated data before flags are checked. The output is
    /// trusted as-is.
    #[must_use]
    pub fn transform(mut self, f: impl FnOnce(EnvMap) -> EnvMap + 'static) -> Self {
        self.transform = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn feature_flags(mut self, flags: FeatureFlags) -> Self {
        self.feature_flags = flags;
        self
    }

    /// Returns the raw environment unvalidated (still guarded).
    #[must_use]
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    #[must_use]
    pub fn on_validation_error(
        mut self,
        handler: impl Fn(&ValidationErrors) -> EnvError + Send + Sync + 'static,
    ) -> Self {
        self.on_validation_error = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn on_flag_error(
        mut self,
        handler: impl Fn(&[FlagIssue]) -> EnvError + Send + Sync + 'static,
    ) -> Self {
        self.on_flag_error = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn on_invalid_access(
        mut self,
        handler: impl Fn(&str) -> EnvError + Send + Sync + 'static,
    ) -> Self {
        self.on_invalid_access = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for EnvOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOptions")
            .field("schema", &self.schema)
            .field("custom_source", &self.source.is_some())
            .field("is_server", &self.is_server)
            .field("transform", &self.transform.is_some())
            .field("feature_flags", &self.feature_flags)
            .field("skip_validation", &self.skip_validation)
            .finish_non_exhaustive()
    }
}
