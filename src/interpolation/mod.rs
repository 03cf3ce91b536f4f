//! String interpolation for classpath layout templates.
//!
//! This module provides:
//!
//! - **Interpolator**: expands `${expression}` tokens against value sources
//! - **Value sources**: flat property maps and prefix-scoped wrappers
//!
//! # Template Syntax
//!
//! ```text
//! ${artifact.groupIdPath}/${artifact.artifactId}-${artifact.version}${dashClassifier?}.jar
//! ```
//!
//! A trailing `?` marks a token as optional: when nothing resolves it, the
//! token expands to an empty string instead of failing.

mod interpolator;
mod value_source;

pub use interpolator::{InterpolationError, Interpolator};
pub use value_source::{PrefixedValueSource, PropertiesValueSource, ValueSource, strip_prefix};
