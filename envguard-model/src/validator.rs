use envguard_types::EnvValue;

/// Parses one raw value against one declared rule.
///
/// `raw` is `None` when the variable is undefined. On success the typed
/// output is returned, and `Ok(None)` leaves the variable undefined in the
/// validated data. On failure every problem found is returned as a message.
///
/// [`FieldRule`](crate::FieldRule) covers the common cases. Implement this
/// trait (or wrap a closure with [`from_fn`]) for anything else.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, raw: Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>>;
}

/// A [`FieldValidator`] backed by a closure.
pub struct FnValidator<F>(F);

impl<F> FieldValidator for FnValidator<F>
where
    F: Fn(Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>> + Send + Sync,
{
    fn validate(&self, raw: Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>> {
        (self.0)(raw)
    }
}

/// Wraps a closure as a [`FieldValidator`].
pub fn from_fn<F>(f: F) -> FnValidator<F>
where
    F: Fn(Option<&EnvValue>) -> Result<Option<EnvValue>, Vec<String>> + Send + Sync,
{
    FnValidator(f)
}
