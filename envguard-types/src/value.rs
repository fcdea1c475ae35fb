//! Environment values.
//!
//! Raw input and validated output share one scalar type. Callers may hand in
//! booleans or numbers they already coerced; validators may produce them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, Result};

/// Mapping from variable name to value. Used both for the raw environment
/// and for validated data. An absent key is an undefined variable.
pub type EnvMap = BTreeMap<String, EnvValue>;

/// A single environment value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl EnvValue {
    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns any numeric payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Name of the value's type, as used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
        }
    }

    /// Converts a JSON scalar. `null` maps to `None` (undefined).
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Option<Self>> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Self::Bool(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Some(Self::Integer(i))),
                None => n.as_f64().map(|f| Some(Self::Float(f))).ok_or_else(|| {
                    Error::UnsupportedValue {
                        name: name.to_string(),
                        reason: format!("number {n} is out of range"),
                    }
                }),
            },
            Value::String(s) => Ok(Some(Self::String(s.clone()))),
            Value::Array(_) | Value::Object(_) => Err(Error::UnsupportedValue {
                name: name.to_string(),
                reason: "expected a string, boolean or number".to_string(),
            }),
        }
    }

    /// Parses a JSON object into an [`EnvMap`], dropping `null` entries.
    pub fn parse_map(json: &str) -> Result<EnvMap> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut map = EnvMap::new();
        for (name, value) in &object {
            if let Some(v) = Self::from_json(name, value)? {
                map.insert(name.clone(), v);
            }
        }
        Ok(map)
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for EnvValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for EnvValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}
