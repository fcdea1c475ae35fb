//! Issue types reported by the validation pipeline.
//!
//! Field issues and flag issues are separate taxonomies. They are produced by
//! different stages and are never collected into one list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A declared variable failed its field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub variable: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variable, self.message)
    }
}

/// A feature flag resolved `true` while one of its dependents was undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagIssue {
    pub flag: String,
    pub dependent: String,
    pub message: String,
}

impl FlagIssue {
    /// Message used when a dependent of an enabled flag is undefined.
    pub const UNDEFINED_DEPENDENT: &'static str =
        "Expected non-undefined value, received undefined";

    /// Issue for a dependent that is undefined while `flag` is enabled.
    pub fn undefined_dependent(flag: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            dependent: dependent.into(),
            message: Self::UNDEFINED_DEPENDENT.to_string(),
        }
    }
}

impl fmt::Display for FlagIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (required by {}): {}", self.dependent, self.flag, self.message)
    }
}

/// The complete set of field issues from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether any issue names `variable`.
    pub fn contains(&self, variable: &str) -> bool {
        self.issues.iter().any(|i| i.variable == variable)
    }

    /// Groups messages by variable name.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &self.issues {
            grouped
                .entry(issue.variable.clone())
                .or_default()
                .push(issue.message.clone());
        }
        grouped
    }
}

impl From<Vec<FieldIssue>> for ValidationErrors {
    fn from(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldIssue;
    type IntoIter = std::vec::IntoIter<FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (variable, messages) in self.field_errors() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{variable}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}
