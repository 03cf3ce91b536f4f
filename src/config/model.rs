//! Archive configuration structs and default implementations.

use super::types::*;
use crate::project::Project;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Controls which default manifest attributes are generated.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfiguration {
    /// Generate a `Class-Path` attribute from the runtime classpath.
    pub add_classpath: bool,

    /// Emit `Specification-Title`/`-Version`/`-Vendor`.
    pub add_default_specification_entries: bool,

    /// Emit `Implementation-Title`/`-Version`/`-Vendor-Id`/`-Vendor`.
    pub add_default_implementation_entries: bool,

    /// Emit `Extension-List` and per-dependency extension attributes.
    pub add_extensions: bool,

    /// Layout of classpath entries (`simple`, `repository` or `custom`).
    ///
    /// Kept as a string so that an unknown value is reported when the
    /// classpath is computed. `null` disables layouts: entries are the bare
    /// file names.
    #[serde(default = "default_layout_type")]
    pub classpath_layout_type: Option<String>,

    /// Template used by the `custom` layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_classpath_layout: Option<String>,

    /// Prepended to every classpath entry (e.g. `lib/`).
    pub classpath_prefix: String,

    /// Use resolved (timestamped) snapshot versions in entry file names.
    #[serde(default = "default_true")]
    pub use_unique_versions: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

impl Default for ManifestConfiguration {
    fn default() -> Self {
        Self {
            add_classpath: false,
            add_default_specification_entries: false,
            add_default_implementation_entries: false,
            add_extensions: false,
            classpath_layout_type: default_layout_type(),
            custom_classpath_layout: None,
            classpath_prefix: String::new(),
            use_unique_versions: default_true(),
            main_class: None,
            package_name: None,
        }
    }
}

/// A named manifest section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestSection {
    pub name: String,

    /// Attributes written in declaration order.
    #[serde(default, deserialize_with = "ordered_null_values_as_empty")]
    pub manifest_entries: IndexMap<String, String>,
}

impl ManifestSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manifest_entries: IndexMap::new(),
        }
    }

    pub fn add_manifest_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.manifest_entries.insert(key.into(), value.into());
    }
}

/// Configuration for one archive build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfiguration {
    #[serde(default = "default_true")]
    pub compress: bool,

    /// Ask the archiver to write a jar index.
    pub index: bool,

    /// Add `pom.xml` and `pom.properties` under `META-INF/maven/`.
    #[serde(default = "default_true")]
    pub add_maven_descriptor: bool,

    /// Rebuild even when the archiver considers the output up to date.
    #[serde(default = "default_true")]
    pub forced: bool,

    /// Use this manifest file instead of the generated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_file: Option<PathBuf>,

    /// Use this `pom.properties` instead of generating one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pom_properties_file: Option<PathBuf>,

    pub manifest: ManifestConfiguration,

    /// Extra main-section attributes; these override generated defaults.
    #[serde(deserialize_with = "null_values_as_empty")]
    pub manifest_entries: BTreeMap<String, String>,

    pub manifest_sections: Vec<ManifestSection>,
}

impl Default for ArchiveConfiguration {
    fn default() -> Self {
        Self {
            compress: default_true(),
            index: false,
            add_maven_descriptor: default_true(),
            forced: default_true(),
            manifest_file: None,
            pom_properties_file: None,
            manifest: ManifestConfiguration::default(),
            manifest_entries: BTreeMap::new(),
            manifest_sections: Vec::new(),
        }
    }
}

impl ArchiveConfiguration {
    pub fn add_manifest_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.manifest_entries.insert(key.into(), value.into());
    }

    pub fn add_manifest_section(&mut self, section: ManifestSection) {
        self.manifest_sections.push(section);
    }
}

/// The YAML build descriptor consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDescriptor {
    pub project: Project,

    #[serde(default)]
    pub archive: ArchiveConfiguration,
}
