//! `pom.properties` descriptor handling.
//!
//! Every archive carries `META-INF/maven/{groupId}/{artifactId}/pom.properties`
//! with the project's coordinates. The file is either generated under the
//! build directory or, when the user supplies one, updated in place.
//!
//! Generated files are only rewritten when their content changes (or when a
//! rewrite is forced), so their modification time stays stable across
//! builds and incremental archivers see an up-to-date input.

pub mod properties;

use crate::archiver::Archiver;
use crate::error::{ArchiverError, Result};
use crate::project::Project;
use properties::Properties;
use std::fs;
use std::path::{Path, PathBuf};

pub use properties::PropertiesError;

/// First comment line of generated descriptors.
pub const GENERATED_BY: &str = "Generated by Maven";

/// Directory under the build directory holding the generated descriptor.
pub const DESCRIPTOR_DIR: &str = "maven-archiver";

pub const DESCRIPTOR_FILE_NAME: &str = "pom.properties";

const GROUP_ID: &str = "groupId";
const ARTIFACT_ID: &str = "artifactId";
const VERSION: &str = "version";

/// Archive entry of the descriptor for a project.
pub fn pom_properties_entry(group_id: &str, artifact_id: &str) -> String {
    format!("META-INF/maven/{}/{}/{}", group_id, artifact_id, DESCRIPTOR_FILE_NAME)
}

/// Archive entry of the project's POM.
pub fn pom_xml_entry(group_id: &str, artifact_id: &str) -> String {
    format!("META-INF/maven/{}/{}/pom.xml", group_id, artifact_id)
}

/// Where the descriptor is generated when the user does not supply one.
pub fn default_descriptor_path(project: &Project) -> PathBuf {
    project
        .build_directory
        .join(DESCRIPTOR_DIR)
        .join(DESCRIPTOR_FILE_NAME)
}

/// Make sure the descriptor exists and is current, then register it.
///
/// With a non-blank `user_supplied` path that file is used: it is rewritten
/// only when its coordinates differ from the project's (other keys are kept)
/// and registered in either case. Otherwise the descriptor is generated at
/// `target`, written only when `force` is set or its content differs.
///
/// Returns the path registered with the archiver.
///
/// # Errors
///
/// - `ArchiverError::NotFound` / `NotAFile` for a bad user-supplied path
/// - `ArchiverError::Io` when a directory or the file cannot be written
pub fn ensure_descriptor(
    project: &Project,
    archiver: &mut dyn Archiver,
    target: &Path,
    user_supplied: Option<&Path>,
    force: bool,
) -> Result<PathBuf> {
    let user_supplied = user_supplied.filter(|p| !p.to_string_lossy().trim().is_empty());

    let path = match user_supplied {
        Some(path) => {
            apply_to_user_descriptor(project, path)?;
            path.to_path_buf()
        }
        None => {
            write_generated_descriptor(project, target, force)?;
            target.to_path_buf()
        }
    };

    archiver.add_file(
        &path,
        &pom_properties_entry(&project.group_id, &project.artifact_id),
    )?;
    Ok(path)
}

fn coordinates(project: &Project) -> Properties {
    let mut properties = Properties::new();
    apply_coordinates(project, &mut properties);
    properties
}

fn apply_coordinates(project: &Project, properties: &mut Properties) {
    properties.set(GROUP_ID, project.group_id.as_str());
    properties.set(ARTIFACT_ID, project.artifact_id.as_str());
    properties.set(VERSION, project.version.as_str());
}

fn has_coordinates(project: &Project, properties: &Properties) -> bool {
    properties.get(GROUP_ID) == Some(project.group_id.as_str())
        && properties.get(ARTIFACT_ID) == Some(project.artifact_id.as_str())
        && properties.get(VERSION) == Some(project.version.as_str())
}

fn apply_to_user_descriptor(project: &Project, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ArchiverError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ArchiverError::NotAFile(path.to_path_buf()));
    }

    let mut properties = Properties::load(path)?;
    if has_coordinates(project, &properties) {
        tracing::debug!(path = %path.display(), "descriptor already up to date");
        return Ok(());
    }

    apply_coordinates(project, &mut properties);
    properties.store(path, Some(GENERATED_BY))?;
    tracing::info!(path = %path.display(), "updated descriptor");
    Ok(())
}

fn write_generated_descriptor(project: &Project, target: &Path, force: bool) -> Result<()> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        fs::create_dir_all(parent).map_err(|e| ArchiverError::io("create directory", parent, e))?;
    }

    let properties = coordinates(project);
    if !force && same_contents(&properties, target) {
        tracing::debug!(path = %target.display(), "descriptor unchanged; not rewriting");
        return Ok(());
    }

    properties.store(target, Some(GENERATED_BY))?;
    tracing::info!(path = %target.display(), "wrote descriptor");
    Ok(())
}

/// Whether `path` already holds exactly `properties`.
///
/// A missing, unreadable or malformed file never matches.
fn same_contents(properties: &Properties, path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match Properties::load(path) {
        Ok(existing) => existing == *properties,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "existing descriptor unreadable");
            false
        }
    }
}

#[cfg(test)]
mod tests;
