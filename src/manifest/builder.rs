//! Manifest assembly for a project.
//!
//! Attributes are written in a fixed order: tool and build environment,
//! package, classpath, specification, implementation, main class, extensions,
//! then user entries and user sections. A user entry always wins over the
//! generated default of the same name, which is then skipped; the one
//! exception is `Class-Path`, where the user value is placed in front of the
//! generated classpath.

use super::{CLASS_PATH, Manifest, Section};
use crate::artifact::ResolvedArtifact;
use crate::classpath::build_classpath;
use crate::config::{ArchiveConfiguration, ManifestConfiguration};
use crate::error::Result;
use crate::project::{BuildSession, Project, build_jdk, build_user};
use std::collections::BTreeMap;

/// Tool name written to `Created-By`.
pub const CREATED_BY: &str = "jar-archiver";

/// Build the manifest for `project`.
///
/// # Errors
///
/// Propagates configuration and interpolation errors from classpath layout
/// resolution, and `ArchiverError::Manifest` for malformed attributes.
pub fn build_manifest(
    project: &Project,
    session: Option<&BuildSession>,
    config: &ArchiveConfiguration,
) -> Result<Manifest> {
    let entries = &config.manifest_entries;
    let mut manifest = Manifest::new();

    DefaultEntries::new(&mut manifest, entries).write(project, session, &config.manifest)?;

    for (key, value) in entries {
        let generated = manifest
            .main_section()
            .get(key)
            .filter(|_| key.eq_ignore_ascii_case(CLASS_PATH))
            .map(str::to_string);

        match generated {
            // User entries go first so they take precedence at class loading.
            Some(generated) => manifest
                .main_section_mut()
                .set_value(key, format!("{} {}", value, generated))?,
            None => manifest.add_main_attribute(key, value.as_str())?,
        }
    }

    for section in &config.manifest_sections {
        let mut the_section = Section::named(section.name.clone())?;
        for (key, value) in &section.manifest_entries {
            the_section.add_attribute(key.as_str(), value.as_str())?;
        }
        manifest.add_section(the_section)?;
    }

    Ok(manifest)
}

/// Writes generated attributes, skipping names the user supplied.
struct DefaultEntries<'a> {
    manifest: &'a mut Manifest,
    user_entries: &'a BTreeMap<String, String>,
}

impl<'a> DefaultEntries<'a> {
    fn new(manifest: &'a mut Manifest, user_entries: &'a BTreeMap<String, String>) -> Self {
        Self {
            manifest,
            user_entries,
        }
    }

    fn user_supplied(&self, key: &str) -> bool {
        self.user_entries
            .keys()
            .any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Add a default attribute unless the user supplied one. Absent values
    /// are written as empty strings.
    fn add(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        if self.user_supplied(key) {
            tracing::debug!(attribute = key, "user entry overrides generated attribute");
            return Ok(());
        }
        self.manifest.add_main_attribute(key, value.unwrap_or_default())
    }

    fn write(
        mut self,
        project: &Project,
        session: Option<&BuildSession>,
        config: &ManifestConfiguration,
    ) -> Result<()> {
        self.add_created_by(session)?;
        self.add("Built-By", build_user(session).as_deref())?;
        self.add("Build-Jdk", build_jdk(session).as_deref())?;

        if let Some(package) = config.package_name.as_deref() {
            self.add("Package", Some(package))?;
        }

        if config.add_classpath {
            let classpath = build_classpath(project, config)?;
            if !classpath.is_empty() {
                // Always written; a user Class-Path is merged in afterwards.
                self.manifest.add_main_attribute(CLASS_PATH, classpath)?;
            }
        }

        let title = project.name.as_deref();
        let vendor = project.organization_name();

        if config.add_default_specification_entries {
            self.add("Specification-Title", title)?;
            self.add("Specification-Version", Some(project.version.as_str()))?;
            if project.organization.is_some() {
                self.add("Specification-Vendor", vendor)?;
            }
        }

        if config.add_default_implementation_entries {
            self.add("Implementation-Title", title)?;
            self.add("Implementation-Version", Some(project.version.as_str()))?;
            self.add("Implementation-Vendor-Id", Some(project.group_id.as_str()))?;
            if project.organization.is_some() {
                self.add("Implementation-Vendor", vendor)?;
            }
        }

        if let Some(main_class) = config.main_class.as_deref().filter(|m| !m.is_empty()) {
            self.add("Main-Class", Some(main_class))?;
        }

        if config.add_extensions {
            self.add_extensions(&project.artifacts)?;
        }

        Ok(())
    }

    fn add_created_by(&mut self, session: Option<&BuildSession>) -> Result<()> {
        let created_by = match session.and_then(|s| s.tool_version.as_deref()) {
            Some(version) => format!("{} {}", CREATED_BY, version),
            None => CREATED_BY.to_string(),
        };
        self.add("Created-By", Some(created_by.as_str()))
    }

    fn add_extensions(&mut self, artifacts: &[ResolvedArtifact]) -> Result<()> {
        let extensions: Vec<&ResolvedArtifact> = artifacts
            .iter()
            .filter(|a| !a.is_test_scoped() && a.artifact_type == "jar")
            .collect();

        if !extensions.is_empty() {
            let list = extensions
                .iter()
                .map(|a| a.artifact_id.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.add("Extension-List", Some(list.as_str()))?;
        }

        for artifact in extensions {
            let id = artifact.artifact_id.replace('.', "_");
            self.add(
                &format!("{}-Extension-Name", id),
                Some(artifact.artifact_id.as_str()),
            )?;
            self.add(
                &format!("{}-Implementation-Version", id),
                Some(artifact.version.as_str()),
            )?;

            if let Some(repository) = &artifact.repository {
                let url = format!("{}/{}", repository.url, artifact);
                self.add(&format!("{}-Implementation-URL", id), Some(url.as_str()))?;
            }
        }

        Ok(())
    }
}
