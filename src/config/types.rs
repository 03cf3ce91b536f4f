//! Configuration types and defaults for jar-archiver.
//!
//! This module defines enums, constants, and default value functions
//! used by the configuration structs.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Layout name for `artifactId-version.ext` entries.
pub const CLASSPATH_LAYOUT_TYPE_SIMPLE: &str = "simple";

/// Layout name for `groupId/artifactId/baseVersion/file` entries.
pub const CLASSPATH_LAYOUT_TYPE_REPOSITORY: &str = "repository";

/// Layout name for a user-supplied template.
pub const CLASSPATH_LAYOUT_TYPE_CUSTOM: &str = "custom";

/// How classpath entries are named in the `Class-Path` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClasspathLayout {
    /// Flat `artifactId-version[-classifier].ext` (default).
    Simple,
    /// Maven repository tree `groupIdPath/artifactId/baseVersion/file`.
    Repository,
    /// The `custom_classpath_layout` template.
    Custom,
}

impl ClasspathLayout {
    /// Parse a layout type from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            CLASSPATH_LAYOUT_TYPE_SIMPLE => Some(Self::Simple),
            CLASSPATH_LAYOUT_TYPE_REPOSITORY => Some(Self::Repository),
            CLASSPATH_LAYOUT_TYPE_CUSTOM => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => CLASSPATH_LAYOUT_TYPE_SIMPLE,
            Self::Repository => CLASSPATH_LAYOUT_TYPE_REPOSITORY,
            Self::Custom => CLASSPATH_LAYOUT_TYPE_CUSTOM,
        }
    }
}

// Default value functions for serde
pub(crate) fn default_layout_type() -> Option<String> {
    Some(CLASSPATH_LAYOUT_TYPE_SIMPLE.to_string())
}
pub(crate) fn default_true() -> bool {
    true
}

/// Deserialize a string map whose values may be YAML `null`.
///
/// Absent values become empty strings so that the attribute is still written.
pub(crate) fn null_values_as_empty<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}

/// Order-preserving variant of [`null_values_as_empty`] for section entries.
pub(crate) fn ordered_null_values_as_empty<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}
