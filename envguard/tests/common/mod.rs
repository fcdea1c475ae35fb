#![allow(dead_code)]

use envguard::{EnvMap, EnvValue};

/// Builds a raw environment from string pairs.
pub fn env(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), EnvValue::from(*v)))
        .collect()
}
