use envguard_types::{Context, EnvValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::{FieldValidator, SchemaError, SchemaResult};

/// Which declaration group a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Unprefixed, visible to both server and client.
    Shared,
    /// Carries the client prefix, safe to expose to the client.
    Client,
    /// Server-only.
    Server,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.pad("shared"),
            Self::Client => f.pad("client"),
            Self::Server => f.pad("server"),
        }
    }
}

/// A declared variable: name, group and the validator for its raw value.
#[derive(Clone)]
pub struct VariableDeclaration {
    name: String,
    scope: Scope,
    validator: Arc<dyn FieldValidator>,
}

impl VariableDeclaration {
    pub fn new(
        name: impl Into<String>,
        scope: Scope,
        validator: impl FieldValidator + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            validator: Arc::new(validator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Runs the declared validator against `raw`.
    pub fn validate(&self, raw: Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>> {
        self.validator.validate(raw)
    }
}

impl fmt::Debug for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableDeclaration")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

type Group = BTreeMap<String, VariableDeclaration>;

/// The three declaration groups plus the client prefix.
///
/// Built through [`EnvSchema::builder`], which enforces that names are unique
/// across groups, that client names carry the prefix and that server names
/// do not.
#[derive(Debug, Clone, Default)]
pub struct EnvSchema {
    client_prefix: Option<String>,
    shared: Group,
    client: Group,
    server: Group,
}

impl EnvSchema {
    pub fn builder() -> EnvSchemaBuilder {
        EnvSchemaBuilder::default()
    }

    pub fn client_prefix(&self) -> Option<&str> {
        self.client_prefix.as_deref()
    }

    /// Declarations of one group, ordered by name.
    pub fn group(&self, scope: Scope) -> impl Iterator<Item = &VariableDeclaration> {
        match scope {
            Scope::Shared => self.shared.values(),
            Scope::Client => self.client.values(),
            Scope::Server => self.server.values(),
        }
    }

    /// Names declared in the shared group.
    pub fn shared_names(&self) -> BTreeSet<String> {
        self.shared.keys().cloned().collect()
    }

    pub fn is_shared(&self, name: &str) -> bool {
        self.shared.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.shared
            .get(name)
            .or_else(|| self.client.get(name))
            .or_else(|| self.server.get(name))
    }

    /// Total number of declared variables.
    pub fn len(&self) -> usize {
        self.shared.len() + self.client.len() + self.server.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Client-visible schema: client ∪ shared.
    pub fn client_visible(&self) -> BTreeMap<&str, &VariableDeclaration> {
        merge(&[&self.client, &self.shared])
    }

    /// Server-visible schema: server ∪ shared ∪ client.
    ///
    /// The server validates client variables too, since a server process can
    /// read everything a build would inject for the client.
    pub fn server_visible(&self) -> BTreeMap<&str, &VariableDeclaration> {
        merge(&[&self.server, &self.shared, &self.client])
    }

    /// The schema validated in `context`.
    pub fn visible_to(&self, context: Context) -> BTreeMap<&str, &VariableDeclaration> {
        match context {
            Context::Server => self.server_visible(),
            Context::Client => self.client_visible(),
        }
    }
}

// Later groups win on a repeated name; the builder rejects repeats.
fn merge<'a>(groups: &[&'a Group]) -> BTreeMap<&'a str, &'a VariableDeclaration> {
    let mut merged = BTreeMap::new();
    for group in groups {
        for (name, decl) in group.iter() {
            merged.insert(name.as_str(), decl);
        }
    }
    merged
}

/// Collects declarations and checks them in [`build`](Self::build).
#[derive(Default)]
pub struct EnvSchemaBuilder {
    client_prefix: Option<String>,
    declarations: Vec<VariableDeclaration>,
}

impl EnvSchemaBuilder {
    #[must_use]
    pub fn client_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.client_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn shared(self, name: impl Into<String>, validator: impl FieldValidator + 'static) -> Self {
        self.declare(VariableDeclaration::new(name, Scope::Shared, validator))
    }

    #[must_use]
    pub fn client(self, name: impl Into<String>, validator: impl FieldValidator + 'static) -> Self {
        self.declare(VariableDeclaration::new(name, Scope::Client, validator))
    }

    #[must_use]
    pub fn server(self, name: impl Into<String>, validator: impl FieldValidator + 'static) -> Self {
        self.declare(VariableDeclaration::new(name, Scope::Server, validator))
    }

    #[must_use]
    pub fn declare(mut self, declaration: VariableDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Checks every declaration and assembles the schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicateVariable`] when a name appears twice, in the
    ///   same group or across groups
    /// - [`SchemaError::MissingClientPrefix`] when client variables exist but
    ///   no prefix was set
    /// - [`SchemaError::ClientNotPrefixed`] / [`SchemaError::ServerPrefixed`]
    ///   when a name is on the wrong side of the prefix
    pub fn build(self) -> SchemaResult<EnvSchema> {
        let mut schema = EnvSchema {
            client_prefix: self.client_prefix,
            ..EnvSchema::default()
        };
        let prefix = schema.client_prefix.clone();

        for decl in self.declarations {
            if schema.get(decl.name()).is_some() {
                return Err(SchemaError::DuplicateVariable(decl.name().to_string()));
            }

            match (decl.scope(), prefix.as_deref()) {
                (Scope::Client, None) => return Err(SchemaError::MissingClientPrefix),
                (Scope::Client, Some(p)) if !decl.name().starts_with(p) => {
                    return Err(SchemaError::ClientNotPrefixed {
                        name: decl.name().to_string(),
                        prefix: p.to_string(),
                    });
                }
                (Scope::Server, Some(p)) if !p.is_empty() && decl.name().starts_with(p) => {
                    return Err(SchemaError::ServerPrefixed {
                        name: decl.name().to_string(),
                        prefix: p.to_string(),
                    });
                }
                _ => {}
            }

            let group = match decl.scope() {
                Scope::Shared => &mut schema.shared,
                Scope::Client => &mut schema.client,
                Scope::Server => &mut schema.server,
            };
            group.insert(decl.name().to_string(), decl);
        }

        Ok(schema)
    }
}
