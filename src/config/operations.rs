//! Build descriptor loading, validation, and layout selection.

use super::model::{BuildDescriptor, ManifestConfiguration};
use super::types::{CLASSPATH_LAYOUT_TYPE_CUSTOM, ClasspathLayout};
use crate::error::{ArchiverError, Result};
use std::path::Path;

impl BuildDescriptor {
    /// Load a build descriptor from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildDescriptor)` - Successfully loaded and validated descriptor
    /// * `Err(ArchiverError::Io)` - The file could not be read
    /// * `Err(ArchiverError::UserError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ArchiverError::Io(format!(
                "failed to read build descriptor '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a build descriptor from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let descriptor: BuildDescriptor = serde_yaml::from_str(yaml).map_err(|e| {
            ArchiverError::UserError(format!("failed to parse build descriptor YAML: {}", e))
        })?;

        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Validate the descriptor.
    ///
    /// Validation rules:
    /// - project `group_id`, `artifact_id` and `version` must be non-empty
    /// - when classpath generation is enabled, the layout type must be known
    ///   and a `custom` layout must come with a template
    pub fn validate(&self) -> Result<()> {
        let project = &self.project;
        for (field, value) in [
            ("group_id", &project.group_id),
            ("artifact_id", &project.artifact_id),
            ("version", &project.version),
        ] {
            if value.trim().is_empty() {
                return Err(ArchiverError::UserError(format!(
                    "build descriptor validation failed: project {} must not be empty",
                    field
                )));
            }
        }

        if self.archive.manifest.add_classpath {
            self.archive.manifest.layout()?;
        }

        Ok(())
    }
}

impl ManifestConfiguration {
    /// The selected classpath layout and its template.
    ///
    /// Returns `Ok(None)` when no layout type is set, in which case classpath
    /// entries fall back to bare file names.
    ///
    /// # Errors
    ///
    /// `ArchiverError::Configuration` for an unknown layout type, or for the
    /// `custom` layout without `custom_classpath_layout`.
    pub fn layout(&self) -> Result<Option<(ClasspathLayout, Option<&str>)>> {
        let Some(layout_type) = self.classpath_layout_type.as_deref() else {
            return Ok(None);
        };

        let layout = ClasspathLayout::from_str(layout_type).ok_or_else(|| {
            ArchiverError::Configuration(format!(
                "Unknown classpath layout type: '{}'. Check the archive manifest classpath_layout_type setting.",
                layout_type
            ))
        })?;

        match layout {
            ClasspathLayout::Custom => {
                let template = self.custom_classpath_layout.as_deref().ok_or_else(|| {
                    ArchiverError::Configuration(format!(
                        "{} layout type was declared, but custom layout expression was not specified. Check the archive manifest custom_classpath_layout setting.",
                        CLASSPATH_LAYOUT_TYPE_CUSTOM
                    ))
                })?;
                Ok(Some((layout, Some(template))))
            }
            other => Ok(Some((other, None))),
        }
    }
}
