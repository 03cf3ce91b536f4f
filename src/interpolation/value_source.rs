//! Value sources consulted by the interpolator.

use std::collections::BTreeMap;

/// A named provider of variable bindings.
pub trait ValueSource {
    /// Return the value bound to `expression`, if this source knows it.
    fn value(&self, expression: &str) -> Option<String>;
}

impl<F> ValueSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn value(&self, expression: &str) -> Option<String> {
        self(expression)
    }
}

/// Strip the first matching prefix from `expression`.
///
/// Returns `None` when no prefix matches.
pub fn strip_prefix<'e, P: AsRef<str>>(prefixes: &[P], expression: &'e str) -> Option<&'e str> {
    prefixes
        .iter()
        .find_map(|prefix| expression.strip_prefix(prefix.as_ref()))
}

/// A flat key/value map.
#[derive(Debug, Clone, Default)]
pub struct PropertiesValueSource {
    values: BTreeMap<String, String>,
}

impl PropertiesValueSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, replacing any previous binding.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl ValueSource for PropertiesValueSource {
    fn value(&self, expression: &str) -> Option<String> {
        self.values.get(expression).cloned()
    }
}

/// Restricts an inner source to expressions under a set of prefixes.
///
/// The matched prefix is removed before the inner source is consulted, so
/// `artifact.version` reaches the inner source as `version`. When
/// `allow_unprefixed` is set, expressions that match no prefix are passed
/// through unchanged.
#[derive(Debug, Clone)]
pub struct PrefixedValueSource<S> {
    prefixes: Vec<String>,
    allow_unprefixed: bool,
    inner: S,
}

impl<S: ValueSource> PrefixedValueSource<S> {
    pub fn new<P: AsRef<str>>(prefixes: &[P], inner: S, allow_unprefixed: bool) -> Self {
        Self {
            prefixes: prefixes.iter().map(|p| p.as_ref().to_string()).collect(),
            allow_unprefixed,
            inner,
        }
    }
}

impl<S: ValueSource> ValueSource for PrefixedValueSource<S> {
    fn value(&self, expression: &str) -> Option<String> {
        match strip_prefix(&self.prefixes, expression) {
            Some(stripped) => self.inner.value(stripped),
            None if self.allow_unprefixed => self.inner.value(expression),
            None => None,
        }
    }
}
