//! Archive assembly.
//!
//! Drives an [`Archiver`]: project metadata under `META-INF/maven`, the
//! manifest, archiver options, then the archive itself.

use crate::archiver::Archiver;
use crate::config::ArchiveConfiguration;
use crate::descriptor::{default_descriptor_path, ensure_descriptor, pom_xml_entry};
use crate::error::Result;
use crate::manifest::build_manifest;
use crate::project::{BuildSession, Project};
use std::path::Path;

/// Assemble the archive for `project` at `dest`.
///
/// The project is not modified. Metadata is written for a working copy whose
/// version is the resolved snapshot version, so a deployed snapshot records
/// its timestamped version.
///
/// # Errors
///
/// Propagates descriptor, manifest and archiver failures unchanged.
pub fn create_archive(
    session: Option<&BuildSession>,
    project: &Project,
    config: &ArchiveConfiguration,
    archiver: &mut dyn Archiver,
    dest: &Path,
) -> Result<()> {
    let working = project.with_effective_version();
    let forced = config.forced;

    if config.add_maven_descriptor {
        add_maven_descriptor(&working, config, archiver, forced)?;
    }

    if let Some(manifest_file) = &config.manifest_file {
        archiver.set_manifest_file(manifest_file);
    }

    let manifest = build_manifest(&working, session, config)?;
    archiver.add_configured_manifest(manifest)?;
    archiver.set_compress(config.compress);
    archiver.set_index(config.index);
    archiver.set_dest_file(dest);

    if config.manifest.add_classpath {
        for jar in &project.runtime_classpath {
            archiver.add_configured_index_jar(jar);
        }
    }

    archiver.set_forced(forced);
    if !forced && !archiver.is_supporting_forced() {
        tracing::warn!(
            "Forced build is disabled, but disabling the forced mode isn't supported by the archiver."
        );
    }

    archiver.create_archive()
}

fn add_maven_descriptor(
    working: &Project,
    config: &ArchiveConfiguration,
    archiver: &mut dyn Archiver,
    forced: bool,
) -> Result<()> {
    let pom_entry = pom_xml_entry(&working.group_id, &working.artifact_id);
    match working.pom_file.as_deref().filter(|p| p.is_file()) {
        Some(pom_file) => archiver.add_file(pom_file, &pom_entry)?,
        None => tracing::warn!(entry = %pom_entry, "no pom file for project; not adding it"),
    }

    let target = default_descriptor_path(working);
    ensure_descriptor(
        working,
        archiver,
        &target,
        config.pom_properties_file.as_deref(),
        forced,
    )?;
    Ok(())
}
