//! Report types and checks behind the `envguard` binary.

use anyhow::{Context as _, Result};
use envguard::{
    Context, EnvError, EnvManifest, EnvMap, EnvOptions, EnvValue, FlagIssue, Scope, create_env,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and parses a JSON manifest.
pub fn load_manifest(path: &Path) -> Result<EnvManifest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest = EnvManifest::from_json(&json)
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;
    debug!(path = %path.display(), "loaded manifest");
    Ok(manifest)
}

/// Reads a JSON object of variable values to check instead of the process
/// environment. `null` entries count as unset.
pub fn load_env_file(path: &Path) -> Result<EnvMap> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read env file {}", path.display()))?;
    let env = EnvValue::parse_map(&json)
        .with_context(|| format!("failed to parse env file {}", path.display()))?;
    debug!(path = %path.display(), variables = env.len(), "loaded env file");
    Ok(env)
}

/// One declared variable in a report. Values are never included.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VariableStatus {
    pub name: String,
    pub scope: Scope,
    pub set: bool,
}

/// Outcome of checking an environment against a manifest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CheckReport {
    pub context: Context,
    pub ok: bool,
    pub variables: Vec<VariableStatus>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flag_issues: Vec<FlagIssue>,
}

/// Validates `raw` against `manifest` in the given context.
///
/// Validation failures are part of the report. Only a manifest that cannot
/// be turned into a schema is an error.
pub fn check_environment(
    manifest: &EnvManifest,
    raw: EnvMap,
    context: Context,
    skip_validation: bool,
) -> Result<CheckReport> {
    let schema = manifest.to_schema().context("invalid manifest schema")?;
    let declared: Vec<(String, Scope)> = schema
        .visible_to(context)
        .into_iter()
        .map(|(name, decl)| (name.to_string(), decl.scope()))
        .collect();
    let options = EnvOptions::new(schema)
        .feature_flags(manifest.feature_flags.clone())
        .runtime_env(raw)
        .is_server(context.is_server())
        .skip_validation(skip_validation);

    let mut report = CheckReport {
        context,
        ok: true,
        variables: Vec::new(),
        field_errors: BTreeMap::new(),
        flag_issues: Vec::new(),
    };

    match create_env(options) {
        Ok(env) => {
            for (name, scope) in declared {
                let set = env.contains(&name)?;
                report.variables.push(VariableStatus { name, scope, set });
            }
        }
        Err(EnvError::InvalidEnvironment(errors)) => {
            report.ok = false;
            report.field_errors = errors.field_errors();
        }
        Err(EnvError::InvalidFeatureFlags(issues)) => {
            report.ok = false;
            report.flag_issues = issues;
        }
        Err(other) => return Err(other.into()),
    }

    Ok(report)
}

/// Human-readable rendering of a report.
pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();
    if report.ok {
        out.push_str(&format!("environment OK ({} context)\n", report.context));
        for var in &report.variables {
            let state = if var.set { "set" } else { "unset" };
            out.push_str(&format!("  {:<7} {:<6} {}\n", var.scope, state, var.name));
        }
        return out;
    }

    out.push_str(&format!("environment INVALID ({} context)\n", report.context));
    for (name, messages) in &report.field_errors {
        out.push_str(&format!("  {name}: {}\n", messages.join(", ")));
    }
    for issue in &report.flag_issues {
        out.push_str(&format!("  {issue}\n"));
    }
    out
}
