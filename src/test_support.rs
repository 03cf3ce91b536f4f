use crate::archiver::Archiver;
use crate::artifact::ResolvedArtifact;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::project::{BuildSession, Organization, Project};
use std::fs;
use std::path::{Path, PathBuf};

/// Session with fixed environment values so tests never read `USER`/`JAVA_VERSION`.
pub(crate) fn test_session() -> BuildSession {
    BuildSession {
        tool_version: Some("0.1.0".to_string()),
        user_name: Some("builder".to_string()),
        jdk_version: Some("21.0.2".to_string()),
    }
}

pub(crate) fn sample_project() -> Project {
    let mut project = Project::new("org.example", "app", "1.0");
    project.name = Some("Example App".to_string());
    project.organization = Some(Organization {
        name: Some("Example Corp".to_string()),
        url: None,
    });
    project
}

/// Create an empty jar-like file under `dir` and a matching dependency.
pub(crate) fn dependency_file(
    dir: &Path,
    group_id: &str,
    artifact_id: &str,
    version: &str,
) -> (PathBuf, ResolvedArtifact) {
    let path = dir.join(format!("{}-{}.jar", artifact_id, version));
    fs::write(&path, b"PK").unwrap();

    let mut artifact = ResolvedArtifact::new(group_id, artifact_id, version);
    artifact.file = Some(path.clone());
    (path, artifact)
}

/// Archiver double that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingArchiver {
    pub files: Vec<(PathBuf, String)>,
    pub manifest_file: Option<PathBuf>,
    pub manifest: Option<Manifest>,
    pub compress: Option<bool>,
    pub index: Option<bool>,
    pub dest_file: Option<PathBuf>,
    pub index_jars: Vec<PathBuf>,
    pub forced: Option<bool>,
    pub supports_forced: bool,
    pub created: bool,
}

impl RecordingArchiver {
    pub fn entry(&self, entry: &str) -> Option<&PathBuf> {
        self.files
            .iter()
            .find(|(_, e)| e == entry)
            .map(|(source, _)| source)
    }
}

impl Archiver for RecordingArchiver {
    fn add_file(&mut self, source: &Path, entry: &str) -> Result<()> {
        self.files.push((source.to_path_buf(), entry.to_string()));
        Ok(())
    }

    fn set_manifest_file(&mut self, manifest_file: &Path) {
        self.manifest_file = Some(manifest_file.to_path_buf());
    }

    fn add_configured_manifest(&mut self, manifest: Manifest) -> Result<()> {
        self.manifest = Some(manifest);
        Ok(())
    }

    fn set_compress(&mut self, compress: bool) {
        self.compress = Some(compress);
    }

    fn set_index(&mut self, index: bool) {
        self.index = Some(index);
    }

    fn set_dest_file(&mut self, dest: &Path) {
        self.dest_file = Some(dest.to_path_buf());
    }

    fn add_configured_index_jar(&mut self, jar: &Path) {
        self.index_jars.push(jar.to_path_buf());
    }

    fn set_forced(&mut self, forced: bool) {
        self.forced = Some(forced);
    }

    fn is_supporting_forced(&self) -> bool {
        self.supports_forced
    }

    fn create_archive(&mut self) -> Result<()> {
        self.created = true;
        Ok(())
    }
}
