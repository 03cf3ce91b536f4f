//! Resolved dependency artifacts.
//!
//! Artifacts are supplied by the surrounding build (the resolver is not part
//! of this crate). This module gives them the read-only views the classpath
//! layouts need: an explicit accessor table for template variables, handler
//! defaults for the file extension, and snapshot detection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Version suffix used by unresolved snapshot versions.
pub const SNAPSHOT_VERSION: &str = "SNAPSHOT";

/// Scope name for test-only dependencies.
pub const SCOPE_TEST: &str = "test";

/// Matches timestamped snapshot versions such as `1.0-20230101.010101-1`.
static TIMESTAMPED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)-(\d{8}\.\d{6})-(\d+)$")
        .unwrap_or_else(|e| panic!("invalid snapshot pattern: {e}"))
});

/// The repository an artifact was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub url: String,
}

/// A dependency artifact as resolved by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub group_id: String,
    pub artifact_id: String,

    /// Resolved version; timestamped for deployed snapshots.
    pub version: String,

    /// Declared version (`1.0-SNAPSHOT`). Derived from `version` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,

    /// File extension. Falls back to the type's handler default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Location of the resolved file on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

fn default_type() -> String {
    "jar".to_string()
}

impl ResolvedArtifact {
    /// Create a plain `jar` artifact with no classifier, scope or file.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            base_version: None,
            classifier: None,
            artifact_type: default_type(),
            extension: None,
            scope: None,
            file: None,
            repository: None,
        }
    }

    /// Whether this artifact refers to a snapshot version.
    ///
    /// This is a pure read: it never rewrites `version` or `base_version`.
    pub fn is_snapshot(&self) -> bool {
        let declared = self.base_version.as_deref().unwrap_or(&self.version);
        declared.ends_with(SNAPSHOT_VERSION) || TIMESTAMPED_VERSION.is_match(&self.version)
    }

    /// The declared version.
    ///
    /// Uses the explicit `base_version` when set. Otherwise a timestamped
    /// snapshot version (`1.0-20230101.010101-1`) maps back to `1.0-SNAPSHOT`,
    /// and anything else is returned unchanged.
    pub fn base_version(&self) -> String {
        if let Some(base) = &self.base_version {
            return base.clone();
        }
        match TIMESTAMPED_VERSION.captures(&self.version) {
            Some(caps) => format!("{}-{}", &caps[1], SNAPSHOT_VERSION),
            None => self.version.clone(),
        }
    }

    /// The file extension, from the artifact itself or its type's handler.
    pub fn extension(&self) -> String {
        self.extension
            .clone()
            .unwrap_or_else(|| handler_extension(&self.artifact_type).to_string())
    }

    /// Classifier, treating an empty string as absent.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_test_scoped(&self) -> bool {
        self.scope.as_deref() == Some(SCOPE_TEST)
    }

    /// Look up a template variable by name.
    ///
    /// This is the fixed vocabulary exposed to classpath layouts under the
    /// `artifact.` prefix.
    pub fn property(&self, name: &str) -> Option<String> {
        match name {
            "groupId" => Some(self.group_id.clone()),
            "artifactId" => Some(self.artifact_id.clone()),
            "version" => Some(self.version.clone()),
            "baseVersion" => Some(self.base_version()),
            "classifier" => self.classifier().map(str::to_string),
            "type" => Some(self.artifact_type.clone()),
            "extension" => Some(self.extension()),
            "scope" => self.scope.clone(),
            "id" => Some(self.to_string()),
            "file" => self.file.as_ref().map(|f| f.display().to_string()),
            _ => None,
        }
    }
}

/// Default extension for a dependency type.
///
/// Mirrors the standard artifact handlers: most packaging types are shipped
/// as `.jar`, the remaining known types use their own name.
pub fn handler_extension(artifact_type: &str) -> &str {
    match artifact_type {
        "test-jar" | "maven-plugin" | "ejb" | "ejb-client" | "java-source" | "javadoc" => "jar",
        other => other,
    }
}

impl fmt::Display for ResolvedArtifact {
    /// `groupId:artifactId:type[:classifier]:baseVersion[:scope]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type)?;
        if let Some(classifier) = self.classifier() {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.base_version())?;
        if let Some(scope) = &self.scope {
            write!(f, ":{}", scope)?;
        }
        Ok(())
    }
}
