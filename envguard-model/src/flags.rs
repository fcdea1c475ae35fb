use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Feature-flag declarations: flag name → variables that become mandatory
/// when the flag resolves to `true`.
///
/// Names may refer to any key of the (post-transform) validated data, not
/// only to declared variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, BTreeSet<String>>);

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `flag` with its dependents. Repeated calls for the same flag
    /// add to its dependent set.
    #[must_use]
    pub fn flag<I, S>(mut self, flag: impl Into<String>, dependents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(flag.into())
            .or_default()
            .extend(dependents.into_iter().map(Into::into));
        self
    }

    pub fn dependents(&self, flag: &str) -> Option<&BTreeSet<String>> {
        self.0.get(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(flag, deps)| (flag.as_str(), deps))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
