//! Project model and execution context.
//!
//! `Project` is the read-only view of the module being packaged. The CLI
//! loads it from the `project:` section of the build descriptor; library
//! callers construct it directly.

use crate::artifact::ResolvedArtifact;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The organization that owns a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The project being archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,

    /// Display name; used for specification/implementation titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    /// The project's `pom.xml`, copied into the archive descriptor directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pom_file: Option<PathBuf>,

    /// Build output directory (default: `target`).
    #[serde(default = "default_build_directory")]
    pub build_directory: PathBuf,

    /// Runtime classpath, in resolved dependency order.
    #[serde(default)]
    pub runtime_classpath: Vec<PathBuf>,

    /// Resolved dependency set.
    #[serde(default)]
    pub artifacts: Vec<ResolvedArtifact>,

    /// Resolved version of the project's own artifact.
    ///
    /// For a deployed snapshot this is the timestamped version that replaces
    /// `version` in the generated descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_version: Option<String>,
}

fn default_build_directory() -> PathBuf {
    PathBuf::from("target")
}

impl Project {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            name: None,
            organization: None,
            pom_file: None,
            build_directory: default_build_directory(),
            runtime_classpath: Vec::new(),
            artifacts: Vec::new(),
            artifact_version: None,
        }
    }

    /// Organization name, if an organization with a name is declared.
    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_ref().and_then(|o| o.name.as_deref())
    }

    /// Whether the project's own artifact is a snapshot.
    pub fn is_snapshot(&self) -> bool {
        self.as_artifact().is_snapshot()
    }

    /// The project's own artifact, carrying its resolved version.
    pub fn as_artifact(&self) -> ResolvedArtifact {
        let mut artifact = ResolvedArtifact::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.artifact_version.clone().unwrap_or_else(|| self.version.clone()),
        );
        artifact.base_version = Some(self.version.clone());
        artifact
    }

    /// Find the dependency whose resolved file is `file`.
    pub fn find_artifact_with_file(&self, file: &std::path::Path) -> Option<&ResolvedArtifact> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.file.as_deref() == Some(file))
    }

    /// A copy with `version` replaced by the resolved snapshot version.
    ///
    /// Descriptors record the deployed version; the caller's project is left
    /// untouched.
    pub fn with_effective_version(&self) -> Project {
        let mut working = self.clone();
        if self.is_snapshot()
            && let Some(resolved) = &self.artifact_version
        {
            working.version = resolved.clone();
        }
        working
    }
}

/// Execution context for one build invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSession {
    /// Version of the build tool, appended to `Created-By`.
    pub tool_version: Option<String>,

    /// Overrides the `USER`/`USERNAME` environment lookup for `Built-By`.
    pub user_name: Option<String>,

    /// Overrides the `JAVA_VERSION` environment lookup for `Build-Jdk`.
    pub jdk_version: Option<String>,
}

impl BuildSession {
    pub fn with_tool_version(version: impl Into<String>) -> Self {
        Self {
            tool_version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// User name for `Built-By`, from the session or the environment.
pub fn build_user(session: Option<&BuildSession>) -> Option<String> {
    session
        .and_then(|s| s.user_name.clone())
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
}

/// JDK version for `Build-Jdk`, from the session or the environment.
pub fn build_jdk(session: Option<&BuildSession>) -> Option<String> {
    session
        .and_then(|s| s.jdk_version.clone())
        .or_else(|| std::env::var("JAVA_VERSION").ok())
}
