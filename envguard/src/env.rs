use envguard_types::{Context, EnvMap};
use std::sync::Arc;
use tracing::debug;

use crate::handlers::{self, InvalidAccessHandler};
use crate::source::{EnvSource, ProcessEnv};
use crate::{EnvOptions, EnvResult, GuardedEnv, check_feature_flags, validate};

/// Validates the environment described by `options` and returns the guarded
/// result.
///
/// # Errors
///
/// Whatever the validation-error handler returns when any visible variable
/// fails (by default [`EnvError::InvalidEnvironment`](crate::EnvError::InvalidEnvironment)),
/// or whatever the flag-error handler returns when an enabled flag has an
/// undefined dependent (by default
/// [`EnvError::InvalidFeatureFlags`](crate::EnvError::InvalidFeatureFlags)).
pub fn create_env(options: EnvOptions) -> EnvResult<GuardedEnv> {
    let EnvOptions {
        schema,
        source,
        is_server,
        transform,
        feature_flags,
        skip_validation,
        on_validation_error,
        on_flag_error,
        on_invalid_access,
    } = options;

    let context = Context::resolve(is_server);
    let raw = match source {
        Some(source) => source.snapshot(),
        None => ProcessEnv.snapshot(),
    };
    let on_invalid_access: InvalidAccessHandler =
        on_invalid_access.unwrap_or_else(|| Arc::new(handlers::on_invalid_access));

    let guard = |data: EnvMap| {
        GuardedEnv::new(
            data,
            context,
            schema.client_prefix(),
            schema.shared_names(),
            on_invalid_access,
        )
    };

    if skip_validation {
        debug!(%context, variables = raw.len(), "skipping environment validation");
        return Ok(guard(raw));
    }

    let mut data = match validate(&schema, context, &raw) {
        Ok(data) => data,
        Err(errors) => {
            return Err(match on_validation_error {
                Some(handler) => handler(&errors),
                None => handlers::on_validation_error(&errors),
            });
        }
    };

    if let Some(transform) = transform {
        data = transform(data);
        debug!(variables = data.len(), "applied environment transform");
    }

    if !feature_flags.is_empty() {
        if let Err(issues) = check_feature_flags(&feature_flags, &data) {
            return Err(match on_flag_error {
                Some(handler) => handler(&issues),
                None => handlers::on_flag_error(&issues),
            });
        }
    }

    Ok(guard(data))
}
