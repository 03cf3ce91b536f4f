//! Archive writers.
//!
//! [`Archiver`] is the seam between archive assembly and the code that
//! physically writes an archive. Assembly registers files, the manifest and
//! options; `create_archive` then produces the output in one step.
//!
//! [`DirectoryArchiver`] writes an exploded archive: a directory tree laid
//! out exactly as the archive entries would be.

use crate::error::{ArchiverError, Result};
use crate::fs::atomic_write_file;
use crate::manifest::{MANIFEST_PATH, Manifest};
use std::fs;
use std::path::{Path, PathBuf};

/// Receives archive content and writes the archive.
pub trait Archiver {
    /// Register `source` to be stored at `entry` (a `/`-separated path).
    fn add_file(&mut self, source: &Path, entry: &str) -> Result<()>;

    /// Use an existing manifest file verbatim instead of a generated one.
    fn set_manifest_file(&mut self, manifest_file: &Path);

    /// Hand over the generated manifest.
    fn add_configured_manifest(&mut self, manifest: Manifest) -> Result<()>;

    fn set_compress(&mut self, compress: bool);

    fn set_index(&mut self, index: bool);

    fn set_dest_file(&mut self, dest: &Path);

    /// Register a jar to be listed in the archive index.
    fn add_configured_index_jar(&mut self, jar: &Path);

    /// Rebuild the archive even when it looks up to date.
    fn set_forced(&mut self, forced: bool);

    /// Whether a non-forced (incremental) build is honored.
    fn is_supporting_forced(&self) -> bool;

    fn create_archive(&mut self) -> Result<()>;
}

/// Writes an exploded archive into a directory.
///
/// Compression, indexing and incremental builds do not apply to a directory
/// tree; those options are accepted and logged.
#[derive(Debug, Default)]
pub struct DirectoryArchiver {
    files: Vec<(PathBuf, String)>,
    manifest_file: Option<PathBuf>,
    manifest: Option<Manifest>,
    dest: Option<PathBuf>,
}

impl DirectoryArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries registered so far, in order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(_, entry)| entry.as_str())
    }

    fn manifest_content(&self) -> Result<String> {
        if let Some(path) = &self.manifest_file {
            return fs::read_to_string(path).map_err(|e| ArchiverError::io("read", path, e));
        }
        Ok(self.manifest.clone().unwrap_or_default().render())
    }
}

/// Resolve an entry path below `root`, rejecting anything that escapes it.
fn entry_path(root: &Path, entry: &str) -> Result<PathBuf> {
    let mut path = root.to_path_buf();
    for part in entry.split('/').filter(|p| !p.is_empty()) {
        if part == ".." || part == "." {
            return Err(ArchiverError::UserError(format!(
                "invalid archive entry '{}'",
                entry
            )));
        }
        path.push(part);
    }
    if path == root {
        return Err(ArchiverError::UserError(format!(
            "invalid archive entry '{}'",
            entry
        )));
    }
    Ok(path)
}

impl Archiver for DirectoryArchiver {
    fn add_file(&mut self, source: &Path, entry: &str) -> Result<()> {
        if !source.is_file() {
            return Err(ArchiverError::NotFound(source.to_path_buf()));
        }
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
        if compress {
            tracing::debug!("compression does not apply to an exploded archive");
        }
    }

    fn set_index(&mut self, index: bool) {
        if index {
            tracing::warn!("index is not supported by the directory archiver; ignoring");
        }
    }

    fn set_dest_file(&mut self, dest: &Path) {
        self.dest = Some(dest.to_path_buf());
    }

    fn add_configured_index_jar(&mut self, jar: &Path) {
        tracing::debug!(jar = %jar.display(), "ignoring index jar");
    }

    fn set_forced(&mut self, _forced: bool) {}

    fn is_supporting_forced(&self) -> bool {
        false
    }

    fn create_archive(&mut self) -> Result<()> {
        let dest = self.dest.clone().ok_or_else(|| {
            ArchiverError::UserError("no destination set for the archive".to_string())
        })?;

        if dest.exists() && !dest.is_dir() {
            return Err(ArchiverError::UserError(format!(
                "archive destination '{}' is not a directory",
                dest.display()
            )));
        }
        fs::create_dir_all(&dest).map_err(|e| ArchiverError::io("create directory", &dest, e))?;

        let manifest_path = entry_path(&dest, MANIFEST_PATH)?;
        atomic_write_file(&manifest_path, &self.manifest_content()?)?;

        for (source, entry) in &self.files {
            let target = entry_path(&dest, entry)?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ArchiverError::io("create directory", parent, e))?;
            }
            fs::copy(source, &target).map_err(|e| ArchiverError::io("copy", source, e))?;
            tracing::debug!(entry = %entry, "added archive entry");
        }

        tracing::info!(
            dest = %dest.display(),
            entries = self.files.len() + 1,
            "wrote exploded archive"
        );
        Ok(())
    }
}
