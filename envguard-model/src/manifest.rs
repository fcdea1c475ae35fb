use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{EnvSchema, FeatureFlags, FieldRule, SchemaResult};

/// JSON form of a schema and its feature flags.
///
/// ```json
/// {
///   "client_prefix": "PUBLIC_",
///   "shared": { "NODE_ENV": { "type": "enum", "options": ["development", "production"] } },
///   "client": { "PUBLIC_API_URL": { "type": "url" } },
///   "server": {
///     "BILLING": { "type": "boolean", "default": "false" },
///     "BILLING_KEY": { "type": "string", "optional": true }
///   },
///   "feature_flags": { "BILLING": ["BILLING_KEY"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,
    #[serde(default)]
    pub shared: BTreeMap<String, FieldRule>,
    #[serde(default)]
    pub client: BTreeMap<String, FieldRule>,
    #[serde(default)]
    pub server: BTreeMap<String, FieldRule>,
    #[serde(default, skip_serializing_if = "FeatureFlags::is_empty")]
    pub feature_flags: FeatureFlags,
}

impl EnvManifest {
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the schema, applying the same checks as [`EnvSchema::builder`].
    pub fn to_schema(&self) -> SchemaResult<EnvSchema> {
        let mut builder = EnvSchema::builder();
        if let Some(prefix) = &self.client_prefix {
            builder = builder.client_prefix(prefix.clone());
        }
        for (name, rule) in &self.shared {
            builder = builder.shared(name.clone(), rule.clone());
        }
        for (name, rule) in &self.client {
            builder = builder.client(name.clone(), rule.clone());
        }
        for (name, rule) in &self.server {
            builder = builder.server(name.clone(), rule.clone());
        }
        builder.build()
    }

    pub fn into_parts(self) -> SchemaResult<(EnvSchema, FeatureFlags)> {
        let schema = self.to_schema()?;
        Ok((schema, self.feature_flags))
    }
}
