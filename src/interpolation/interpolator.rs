//! Template expansion over an ordered list of value sources.
//!
//! # Syntax
//!
//! - `${name}` - Substitutes the first value any source returns for `name`
//! - `${name?}` - Same, but expands to an empty string when nothing resolves
//! - `${` without a closing `}` is copied literally
//!
//! # Recursion
//!
//! Resolved values are expanded again, so a value may itself contain tokens.
//! Expressions are tracked on a stack while they are being expanded; meeting
//! the same expression again is reported as a cycle instead of recursing
//! forever. Expressions are compared after stripping the recursion prefixes,
//! so `${artifact.version}` and `${version}` count as the same variable.

use super::value_source::{ValueSource, strip_prefix};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}").unwrap_or_else(|e| panic!("invalid token pattern: {e}"))
});

/// Error type for interpolation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// A required expression was not resolved by any value source.
    #[error("unresolved expression '${{{expression}}}'")]
    Unresolved {
        /// The expression as written between `${` and `}`.
        expression: String,
    },

    /// An expression's expansion referenced itself.
    #[error("expression cycle detected: {}", .chain.join(" -> "))]
    Cycle {
        /// Expressions on the expansion stack, ending with the repeated one.
        chain: Vec<String>,
    },

    /// A `${}` token with nothing inside.
    #[error("empty expression '${{}}' at position {position}")]
    EmptyExpression {
        /// Byte offset of the token in the template being expanded.
        position: usize,
    },
}

/// Expands templates against the value sources registered on it.
///
/// An interpolator borrows its sources, so it is meant to be built for a
/// single expansion scope (one artifact) and dropped afterwards. Nothing
/// registered on it outlives that scope.
#[derive(Default)]
pub struct Interpolator<'a> {
    sources: Vec<Box<dyn ValueSource + 'a>>,
}

impl<'a> Interpolator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. Sources are consulted in registration order.
    pub fn add_value_source<S: ValueSource + 'a>(&mut self, source: S) {
        self.sources.push(Box::new(source));
    }

    /// Builder-style variant of [`Interpolator::add_value_source`].
    pub fn with_value_source<S: ValueSource + 'a>(mut self, source: S) -> Self {
        self.add_value_source(source);
        self
    }

    /// Expand every `${...}` token in `template`.
    ///
    /// `recursion_prefixes` are stripped from expressions before cycle
    /// detection compares them.
    pub fn interpolate<P: AsRef<str>>(
        &self,
        template: &str,
        recursion_prefixes: &[P],
    ) -> Result<String, InterpolationError> {
        let mut stack = Vec::new();
        self.expand(template, recursion_prefixes, &mut stack)
    }

    fn expand<P: AsRef<str>>(
        &self,
        text: &str,
        prefixes: &[P],
        stack: &mut Vec<String>,
    ) -> Result<String, InterpolationError> {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;

        for caps in TOKEN.captures_iter(text) {
            let (Some(token), Some(expression)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            result.push_str(&text[last..token.start()]);

            if expression.as_str().is_empty() {
                return Err(InterpolationError::EmptyExpression {
                    position: token.start(),
                });
            }

            let value = self.resolve(expression.as_str(), prefixes, stack)?;
            result.push_str(&value);
            last = token.end();
        }

        result.push_str(&text[last..]);
        Ok(result)
    }

    fn resolve<P: AsRef<str>>(
        &self,
        expression: &str,
        prefixes: &[P],
        stack: &mut Vec<String>,
    ) -> Result<String, InterpolationError> {
        let optional = expression.strip_suffix('?');
        let base = optional.unwrap_or(expression);
        let key = strip_prefix(prefixes, base).unwrap_or(base).to_string();

        if stack.contains(&key) {
            let mut chain = stack.clone();
            chain.push(key);
            return Err(InterpolationError::Cycle { chain });
        }

        // The literal `name?` form is looked up first; sources may bind it explicitly.
        let raw = match optional {
            Some(base) => self.lookup(expression).or_else(|| self.lookup(base)),
            None => self.lookup(expression),
        };

        let Some(raw) = raw else {
            return match optional {
                Some(_) => Ok(String::new()),
                None => Err(InterpolationError::Unresolved {
                    expression: expression.to_string(),
                }),
            };
        };

        stack.push(key);
        let expanded = self.expand(&raw, prefixes, stack);
        stack.pop();
        expanded
    }

    fn lookup(&self, expression: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.value(expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{PrefixedValueSource, PropertiesValueSource};

    const PREFIXES: [&str; 1] = ["artifact."];

    fn props(pairs: &[(&str, &str)]) -> PropertiesValueSource {
        let mut source = PropertiesValueSource::new();
        for (k, v) in pairs {
            source.set(*k, *v);
        }
        source
    }

    fn artifact_scope(pairs: &[(&str, &str)]) -> PrefixedValueSource<PropertiesValueSource> {
        PrefixedValueSource::new(&PREFIXES, props(pairs), true)
    }

    #[test]
    fn test_simple_substitution() {
        let interpolator = Interpolator::new()
            .with_value_source(artifact_scope(&[("artifactId", "foo"), ("version", "1.0")]));
        let result = interpolator
            .interpolate("${artifact.artifactId}-${artifact.version}.jar", &PREFIXES)
            .unwrap();
        assert_eq!(result, "foo-1.0.jar");
    }

    #[test]
    fn test_no_tokens() {
        let interpolator = Interpolator::new();
        let result = interpolator.interpolate("lib/plain.jar", &PREFIXES).unwrap();
        assert_eq!(result, "lib/plain.jar");
    }

    #[test]
    fn test_first_source_wins() {
        let interpolator = Interpolator::new()
            .with_value_source(props(&[("version", "first")]))
            .with_value_source(props(&[("version", "second")]));
        let result = interpolator.interpolate("${version}", &PREFIXES).unwrap();
        assert_eq!(result, "first");
    }

    #[test]
    fn test_later_source_fills_gaps() {
        let interpolator = Interpolator::new()
            .with_value_source(props(&[("a", "A")]))
            .with_value_source(props(&[("b", "B")]));
        let result = interpolator.interpolate("${a}${b}", &PREFIXES).unwrap();
        assert_eq!(result, "AB");
    }

    #[test]
    fn test_unresolved_required_fails() {
        let interpolator = Interpolator::new().with_value_source(artifact_scope(&[]));
        let err = interpolator
            .interpolate("${artifact.unknown}.jar", &PREFIXES)
            .unwrap_err();
        assert_eq!(
            err,
            InterpolationError::Unresolved {
                expression: "artifact.unknown".to_string()
            }
        );
    }

    #[test]
    fn test_unresolved_optional_is_empty() {
        let interpolator = Interpolator::new().with_value_source(artifact_scope(&[]));
        let result = interpolator
            .interpolate("lib${artifact.unknown?}.jar", &PREFIXES)
            .unwrap();
        assert_eq!(result, "lib.jar");
    }

    #[test]
    fn test_optional_falls_back_to_base_name() {
        let interpolator =
            Interpolator::new().with_value_source(artifact_scope(&[("classifier", "tests")]));
        let result = interpolator.interpolate("${classifier?}", &PREFIXES).unwrap();
        assert_eq!(result, "tests");
    }

    #[test]
    fn test_optional_literal_binding_preferred() {
        let interpolator = Interpolator::new().with_value_source(props(&[
            ("dashClassifier?", "-literal"),
            ("dashClassifier", "-base"),
        ]));
        let result = interpolator
            .interpolate("${dashClassifier?}", &PREFIXES)
            .unwrap();
        assert_eq!(result, "-literal");
    }

    #[test]
    fn test_unclosed_token_is_literal() {
        let interpolator = Interpolator::new().with_value_source(props(&[("a", "A")]));
        let result = interpolator.interpolate("${a}/${broken", &PREFIXES).unwrap();
        assert_eq!(result, "A/${broken");
    }

    #[test]
    fn test_empty_expression_error() {
        let interpolator = Interpolator::new();
        let err = interpolator.interpolate("lib/${}", &PREFIXES).unwrap_err();
        assert_eq!(err, InterpolationError::EmptyExpression { position: 4 });
    }

    #[test]
    fn test_nested_values_are_expanded() {
        let interpolator = Interpolator::new().with_value_source(artifact_scope(&[
            ("fileName", "${artifactId}-${version}"),
            ("artifactId", "foo"),
            ("version", "2.0"),
        ]));
        let result = interpolator
            .interpolate("${artifact.fileName}.jar", &PREFIXES)
            .unwrap();
        assert_eq!(result, "foo-2.0.jar");
    }

    #[test]
    fn test_direct_cycle_detected() {
        let interpolator =
            Interpolator::new().with_value_source(artifact_scope(&[("version", "${version}")]));
        let err = interpolator
            .interpolate("${artifact.version}", &PREFIXES)
            .unwrap_err();
        assert_eq!(
            err,
            InterpolationError::Cycle {
                chain: vec!["version".to_string(), "version".to_string()]
            }
        );
    }

    #[test]
    fn test_cycle_through_prefixed_alias() {
        let interpolator = Interpolator::new().with_value_source(artifact_scope(&[
            ("a", "${artifact.b}"),
            ("b", "${a}"),
        ]));
        let err = interpolator.interpolate("${artifact.a}", &PREFIXES).unwrap_err();
        match err {
            InterpolationError::Cycle { chain } => assert_eq!(chain, vec!["a", "b", "a"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_use_is_not_a_cycle() {
        let interpolator =
            Interpolator::new().with_value_source(artifact_scope(&[("artifactId", "foo")]));
        let result = interpolator
            .interpolate("${artifactId}/${artifact.artifactId}", &PREFIXES)
            .unwrap();
        assert_eq!(result, "foo/foo");
    }

    #[test]
    fn test_error_display() {
        let err = InterpolationError::Unresolved {
            expression: "artifact.nope".to_string(),
        };
        assert_eq!(err.to_string(), "unresolved expression '${artifact.nope}'");

        let err = InterpolationError::Cycle {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "expression cycle detected: a -> b -> a");

        let err = InterpolationError::EmptyExpression { position: 3 };
        assert_eq!(err.to_string(), "empty expression '${}' at position 3");
    }
}
