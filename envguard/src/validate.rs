use envguard_model::EnvSchema;
use envguard_types::{Context, EnvMap, FieldIssue, ValidationErrors};
use tracing::debug;

/// Validates `raw` against the part of `schema` visible in `context`.
///
/// Every visible variable is checked; all issues are collected before
/// returning. Variables outside the visible schema are neither required nor
/// copied into the result. A variable whose validator yields no value (an
/// optional one left unset) is absent from the result.
pub fn validate(
    schema: &EnvSchema,
    context: Context,
    raw: &EnvMap,
) -> Result<EnvMap, ValidationErrors> {
    let visible = schema.visible_to(context);
    debug!(%context, variables = visible.len(), "validating environment");

    let mut data = EnvMap::new();
    let mut errors = ValidationErrors::new();

    for (name, decl) in visible {
        match decl.validate(raw.get(name)) {
            Ok(Some(value)) => {
                data.insert(name.to_string(), value);
            }
            Ok(None) => {}
            Err(messages) if messages.is_empty() => {
                errors.push(FieldIssue::new(name, "Invalid value"));
            }
            Err(messages) => {
                for message in messages {
                    errors.push(FieldIssue::new(name, message));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(data)
    } else {
        debug!(issues = errors.len(), "environment validation failed");
        Err(errors)
    }
}
