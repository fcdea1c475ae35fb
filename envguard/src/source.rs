use envguard_types::{EnvMap, EnvValue};

/// Supplies the raw environment for a validation run.
///
/// The pipeline reads the environment only through this trait, so tests and
/// embedders can hand in a fixed map instead of process state.
pub trait EnvSource {
    fn snapshot(&self) -> EnvMap;
}

/// The current process environment.
///
/// Entries whose name or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn snapshot(&self) -> EnvMap {
        std::env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((name, EnvValue::String(value)))
            })
            .collect()
    }
}

impl EnvSource for EnvMap {
    fn snapshot(&self) -> EnvMap {
        self.clone()
    }
}
