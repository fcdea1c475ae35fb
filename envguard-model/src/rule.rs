use envguard_types::EnvValue;
use serde::{Deserialize, Serialize};

use crate::FieldValidator;

/// A declarative field validator.
///
/// The JSON form is flat: `{"type": "boolean", "default": "false"}`,
/// `{"type": "string", "min_length": 1, "optional": true}`. Unknown keys,
/// and keys that belong to another kind, are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldRule")]
pub struct FieldRule {
    #[serde(flatten)]
    pub kind: FieldKind,
    /// An undefined value is accepted and stays undefined.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Raw value substituted when the variable is undefined. It goes through
    /// the same parsing as a supplied value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<EnvValue>,
}

/// What a raw value must look like, and what it parses into.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Any string, optionally bounded in length (counted in chars).
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// An absolute URL. The output is the original string.
    Url,
    /// One of a fixed set of strings.
    Enum { options: Vec<String> },
    /// `"true"` / `"false"` (or an already coerced boolean), parsed to a bool.
    Boolean,
    /// A number or numeric string.
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default)]
        integer: bool,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum KindTag {
    String,
    Url,
    Enum,
    Boolean,
    Number,
}

impl KindTag {
    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Url => "url",
            Self::Enum => "enum",
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }
}

/// Every key any rule kind accepts, checked against the tag on conversion.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldRule {
    #[serde(rename = "type")]
    tag: KindTag,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    default: Option<EnvValue>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    integer: Option<bool>,
}

impl TryFrom<RawFieldRule> for FieldRule {
    type Error = String;

    fn try_from(raw: RawFieldRule) -> Result<Self, Self::Error> {
        let tag = raw.tag;
        let reject = |key: &str, present: bool| {
            if present {
                Err(format!("`{key}` does not apply to {} rules", tag.name()))
            } else {
                Ok(())
            }
        };

        if !matches!(tag, KindTag::String) {
            reject("min_length", raw.min_length.is_some())?;
            reject("max_length", raw.max_length.is_some())?;
        }
        if !matches!(tag, KindTag::Enum) {
            reject("options", raw.options.is_some())?;
        }
        if !matches!(tag, KindTag::Number) {
            reject("min", raw.min.is_some())?;
            reject("max", raw.max.is_some())?;
            reject("integer", raw.integer.is_some())?;
        }

        let kind = match tag {
            KindTag::String => FieldKind::String {
                min_length: raw.min_length,
                max_length: raw.max_length,
            },
            KindTag::Url => FieldKind::Url,
            KindTag::Enum => FieldKind::Enum {
                options: raw
                    .options
                    .ok_or_else(|| "enum rules require `options`".to_string())?,
            },
            KindTag::Boolean => FieldKind::Boolean,
            KindTag::Number => FieldKind::Number {
                min: raw.min,
                max: raw.max,
                integer: raw.integer.unwrap_or(false),
            },
        };

        Ok(Self {
            kind,
            optional: raw.optional,
            default: raw.default,
        })
    }
}

impl FieldRule {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
        }
    }

    /// Shorthand for an unbounded string.
    pub fn string() -> Self {
        Self::of(FieldKind::String {
            min_length: None,
            max_length: None,
        })
    }

    /// Shorthand for an absolute URL.
    pub fn url() -> Self {
        Self::of(FieldKind::Url)
    }

    /// Shorthand for a string restricted to `options`.
    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(FieldKind::Enum {
            options: options.into_iter().map(Into::into).collect(),
        })
    }

    /// Shorthand for a `"true"`/`"false"` flag.
    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    /// Shorthand for a floating-point number.
    pub fn number() -> Self {
        Self::of(FieldKind::Number {
            min: None,
            max: None,
            integer: false,
        })
    }

    /// Shorthand for an integer.
    pub fn integer() -> Self {
        Self::of(FieldKind::Number {
            min: None,
            max: None,
            integer: true,
        })
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<EnvValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Minimum string length. No effect on other kinds.
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        if let FieldKind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(n);
        }
        self
    }

    /// Maximum string length. No effect on other kinds.
    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        if let FieldKind::String { max_length, .. } = &mut self.kind {
            *max_length = Some(n);
        }
        self
    }

    /// Inclusive lower bound. No effect on non-numeric kinds.
    #[must_use]
    pub fn min(mut self, bound: f64) -> Self {
        if let FieldKind::Number { min, .. } = &mut self.kind {
            *min = Some(bound);
        }
        self
    }

    /// Inclusive upper bound. No effect on non-numeric kinds.
    #[must_use]
    pub fn max(mut self, bound: f64) -> Self {
        if let FieldKind::Number { max, .. } = &mut self.kind {
            *max = Some(bound);
        }
        self
    }
}

impl FieldValidator for FieldRule {
    fn validate(&self, raw: Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>> {
        match raw.or(self.default.as_ref()) {
            Some(value) => self.kind.parse(value).map(Some),
            None if self.optional => Ok(None),
            None => Err(vec!["Required".to_string()]),
        }
    }
}

impl FieldKind {
    fn parse(&self, raw: &EnvValue) -> Result<EnvValue, Vec<String>> {
        match self {
            Self::String {
                min_length,
                max_length,
            } => {
                let s = expect_string(raw)?;
                let len = s.chars().count();
                let mut errors = Vec::new();
                if let Some(min) = min_length.filter(|min| len < *min) {
                    errors.push(format!("String must contain at least {min} character(s)"));
                }
                if let Some(max) = max_length.filter(|max| len > *max) {
                    errors.push(format!("String must contain at most {max} character(s)"));
                }
                if errors.is_empty() {
                    Ok(raw.clone())
                } else {
                    Err(errors)
                }
            }
            Self::Url => {
                let s = expect_string(raw)?;
                url::Url::parse(s)
                    .map(|_| raw.clone())
                    .map_err(|_| vec!["Invalid url".to_string()])
            }
            Self::Enum { options } => {
                let s = expect_string(raw)?;
                if options.iter().any(|o| o == s) {
                    Ok(raw.clone())
                } else {
                    let expected: Vec<String> = options.iter().map(|o| format!("'{o}'")).collect();
                    Err(vec![format!(
                        "Invalid enum value. Expected {}, received '{s}'",
                        expected.join(" | ")
                    )])
                }
            }
            Self::Boolean => match raw {
                EnvValue::Bool(_) => Ok(raw.clone()),
                EnvValue::String(s) if s == "true" => Ok(EnvValue::Bool(true)),
                EnvValue::String(s) if s == "false" => Ok(EnvValue::Bool(false)),
                EnvValue::String(s) => Err(vec![format!(
                    "Invalid boolean. Expected 'true' | 'false', received '{s}'"
                )]),
                other => Err(vec![format!(
                    "Expected boolean, received {}",
                    other.type_name()
                )]),
            },
            Self::Number { min, max, integer } => {
                let value = parse_number(raw, *integer)?;
                let n = value.as_f64().unwrap_or_default();
                let mut errors = Vec::new();
                if let Some(min) = min.filter(|min| n < *min) {
                    errors.push(format!("Number must be greater than or equal to {min}"));
                }
                if let Some(max) = max.filter(|max| n > *max) {
                    errors.push(format!("Number must be less than or equal to {max}"));
                }
                if errors.is_empty() {
                    Ok(value)
                } else {
                    Err(errors)
                }
            }
        }
    }
}

fn expect_string(raw: &EnvValue) -> Result<&str, Vec<String>> {
    raw.as_str()
        .ok_or_else(|| vec![format!("Expected string, received {}", raw.type_name())])
}

fn parse_number(raw: &EnvValue, integer: bool) -> Result<EnvValue, Vec<String>> {
    let float = match raw {
        EnvValue::Integer(i) if integer => return Ok(EnvValue::Integer(*i)),
        EnvValue::Integer(i) => return Ok(EnvValue::Float(*i as f64)),
        EnvValue::Float(f) => *f,
        EnvValue::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(if integer {
                    EnvValue::Integer(i)
                } else {
                    EnvValue::Float(i as f64)
                });
            }
            s.parse::<f64>()
                .map_err(|_| vec![format!("Expected number, received '{s}'")])?
        }
        EnvValue::Bool(_) => {
            return Err(vec![format!(
                "Expected number, received {}",
                raw.type_name()
            )]);
        }
    };

    if !float.is_finite() {
        return Err(vec!["Expected a finite number".to_string()]);
    }
    if !integer {
        return Ok(EnvValue::Float(float));
    }
    if float.fract() != 0.0 {
        return Err(vec!["Expected integer, received float".to_string()]);
    }
    if float.abs() >= i64::MAX as f64 {
        return Err(vec!["Integer is out of range".to_string()]);
    }
    Ok(EnvValue::Integer(float as i64))
}
