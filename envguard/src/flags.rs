use envguard_model::FeatureFlags;
use envguard_types::{EnvMap, EnvValue, FlagIssue};
use tracing::{debug, warn};

/// Checks conditional requiredness against validated data.
///
/// A flag whose value is exactly `true` requires every dependent to be
/// defined. Any other value, including an absent flag, leaves the dependents
/// optional. Issues from all flags are collected before returning.
pub fn check_feature_flags(flags: &FeatureFlags, data: &EnvMap) -> Result<(), Vec<FlagIssue>> {
    let mut issues = Vec::new();

    for (flag, dependents) in flags.iter() {
        match data.get(flag) {
            Some(EnvValue::Bool(true)) => {
                issues.extend(
                    dependents
                        .iter()
                        .filter(|dep| !data.contains_key(dep.as_str()))
                        .map(|dep| FlagIssue::undefined_dependent(flag, dep.as_str())),
                );
            }
            Some(EnvValue::Bool(false)) | None => {}
            Some(other) => {
                warn!(
                    flag,
                    value_type = other.type_name(),
                    "feature flag is not a boolean, dependents stay optional"
                );
            }
        }
    }

    debug!(flags = flags.len(), issues = issues.len(), "checked feature flags");
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
