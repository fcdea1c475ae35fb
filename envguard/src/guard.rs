use envguard_types::{Context, EnvMap, EnvValue};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::handlers::InvalidAccessHandler;
use crate::{EnvError, EnvResult};

/// Validated environment data behind a per-read access check.
///
/// In a client context with a non-empty client prefix, reading a name that
/// neither carries the prefix nor is a shared declaration calls the
/// invalid-access handler and returns its error. Everything else returns the
/// stored value, `None` for unset names.
///
/// The check runs on every read, not once at construction. Clones share the
/// underlying data.
#[derive(Clone)]
pub struct GuardedEnv {
    data: Arc<EnvMap>,
    context: Context,
    client_prefix: Option<String>,
    shared: Arc<BTreeSet<String>>,
    on_invalid_access: InvalidAccessHandler,
}

impl GuardedEnv {
    pub(crate) fn new(
        data: EnvMap,
        context: Context,
        client_prefix: Option<&str>,
        shared: BTreeSet<String>,
        on_invalid_access: InvalidAccessHandler,
    ) -> Self {
        Self {
            data: Arc::new(data),
            context,
            client_prefix: client_prefix.filter(|p| !p.is_empty()).map(str::to_string),
            shared: Arc::new(shared),
            on_invalid_access,
        }
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// Whether a read of `name` passes the guard. Does not call the handler.
    pub fn is_accessible(&self, name: &str) -> bool {
        match (&self.context, &self.client_prefix) {
            (Context::Client, Some(prefix)) => {
                name.starts_with(prefix.as_str()) || self.shared.contains(name)
            }
            _ => true,
        }
    }

    fn check(&self, name: &str) -> EnvResult<()> {
        if self.is_accessible(name) {
            Ok(())
        } else {
            Err((self.on_invalid_access)(name))
        }
    }

    /// Reads `name` through the guard.
    pub fn get(&self, name: &str) -> EnvResult<Option<&EnvValue>> {
        self.check(name)?;
        Ok(self.data.get(name))
    }

    /// Reads `name` and fails when it is unset.
    pub fn require(&self, name: &str) -> EnvResult<&EnvValue> {
        self.get(name)?
            .ok_or_else(|| EnvError::Missing(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> EnvResult<bool> {
        Ok(self.get(name)?.is_some())
    }

    pub fn get_str(&self, name: &str) -> EnvResult<Option<&str>> {
        self.typed(name, "string", EnvValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> EnvResult<Option<bool>> {
        self.typed(name, "boolean", EnvValue::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> EnvResult<Option<i64>> {
        self.typed(name, "integer", EnvValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> EnvResult<Option<f64>> {
        self.typed(name, "number", EnvValue::as_f64)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a EnvValue) -> Option<T>,
    ) -> EnvResult<Option<T>> {
        match self.get(name)? {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| EnvError::WrongType {
                name: name.to_string(),
                expected,
            }),
        }
    }

    /// Names that pass the guard, in order.
    pub fn accessible_keys(&self) -> impl Iterator<Item = &str> {
        self.data
            .keys()
            .map(String::as_str)
            .filter(|name| self.is_accessible(name))
    }

    /// Entries that pass the guard, in order. Blocked names are skipped
    /// without calling the handler.
    pub fn accessible(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.data
            .iter()
            .filter(|(name, _)| self.is_accessible(name))
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of stored entries, including ones the guard would block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Values may be secrets; only names are printed.
impl fmt::Debug for GuardedEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedEnv")
            .field("context", &self.context)
            .field("client_prefix", &self.client_prefix)
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
