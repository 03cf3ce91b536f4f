//! Classpath entry layouts.
//!
//! Each runtime classpath file becomes one `Class-Path` entry. When the file
//! belongs to a resolved dependency and a layout is configured, the entry is
//! produced by expanding the layout's template against that dependency;
//! otherwise the bare file name is used.
//!
//! # Template variables
//!
//! Templates see the artifact under the `artifact.` prefix (the prefix may
//! also be omitted):
//!
//! - `groupId`, `artifactId`, `version`, `baseVersion`, `classifier`,
//!   `type`, `extension`, `scope`, `id`, `file`
//! - `groupIdPath` - the group id with `.` replaced by `/`
//! - `dashClassifier` / `dashClassifier?` - `-classifier`, or empty

use crate::artifact::ResolvedArtifact;
use crate::config::{ClasspathLayout, ManifestConfiguration};
use crate::error::Result;
use crate::interpolation::{Interpolator, PrefixedValueSource, PropertiesValueSource, ValueSource};
use crate::project::Project;
use std::path::Path;

/// Flat layout using the resolved (possibly timestamped) version.
pub const SIMPLE_LAYOUT: &str =
    "${artifact.artifactId}-${artifact.version}${dashClassifier?}.${artifact.extension}";

/// Flat layout using the declared base version.
pub const SIMPLE_LAYOUT_NONUNIQUE: &str =
    "${artifact.artifactId}-${artifact.baseVersion}${dashClassifier?}.${artifact.extension}";

/// Repository layout using the resolved version in the file name.
pub const REPOSITORY_LAYOUT: &str = concat!(
    "${artifact.groupIdPath}/${artifact.artifactId}/",
    "${artifact.baseVersion}/${artifact.artifactId}-",
    "${artifact.version}${dashClassifier?}.${artifact.extension}"
);

/// Repository layout using the base version in the file name.
pub const REPOSITORY_LAYOUT_NONUNIQUE: &str = concat!(
    "${artifact.groupIdPath}/${artifact.artifactId}/",
    "${artifact.baseVersion}/${artifact.artifactId}-",
    "${artifact.baseVersion}${dashClassifier?}.${artifact.extension}"
);

/// Prefixes under which artifact variables are bound.
pub const ARTIFACT_EXPRESSION_PREFIXES: [&str; 1] = ["artifact."];

/// Pick the template for a layout.
///
/// `custom` must already carry its template (see [`ManifestConfiguration::layout`]).
pub fn layout_template<'a>(
    layout: ClasspathLayout,
    custom: Option<&'a str>,
    use_unique_versions: bool,
) -> &'a str {
    match (layout, use_unique_versions) {
        (ClasspathLayout::Simple, true) => SIMPLE_LAYOUT,
        (ClasspathLayout::Simple, false) => SIMPLE_LAYOUT_NONUNIQUE,
        (ClasspathLayout::Repository, true) => REPOSITORY_LAYOUT,
        (ClasspathLayout::Repository, false) => REPOSITORY_LAYOUT_NONUNIQUE,
        (ClasspathLayout::Custom, _) => custom.unwrap_or_default(),
    }
}

/// Resolves template variables through [`ResolvedArtifact::property`].
#[derive(Debug, Clone, Copy)]
pub struct ArtifactValueSource<'a>(pub &'a ResolvedArtifact);

impl ValueSource for ArtifactValueSource<'_> {
    fn value(&self, expression: &str) -> Option<String> {
        self.0.property(expression)
    }
}

/// Synthetic variables that have no plain accessor on the artifact.
fn extra_expressions(artifact: &ResolvedArtifact) -> PropertiesValueSource {
    let mut extra = PropertiesValueSource::new();

    // Snapshots fall through to the accessor table.
    if !artifact.is_snapshot() {
        extra.set("baseVersion", artifact.version.clone());
    }

    extra.set("groupIdPath", artifact.group_id.replace('.', "/"));

    let dash_classifier = artifact
        .classifier()
        .map(|c| format!("-{}", c))
        .unwrap_or_default();
    extra.set("dashClassifier", dash_classifier.clone());
    extra.set("dashClassifier?", dash_classifier);

    extra
}

/// Expand `template` for one artifact.
///
/// The value sources are built for this call and dropped when it returns,
/// so bindings from one artifact never leak into the next.
pub fn interpolate_for_artifact(template: &str, artifact: &ResolvedArtifact) -> Result<String> {
    // Synthetic variables come first so a release's baseVersion is its resolved version.
    let interpolator = Interpolator::new()
        .with_value_source(PrefixedValueSource::new(
            &ARTIFACT_EXPRESSION_PREFIXES,
            extra_expressions(artifact),
            true,
        ))
        .with_value_source(PrefixedValueSource::new(
            &ARTIFACT_EXPRESSION_PREFIXES,
            ArtifactValueSource(artifact),
            true,
        ));

    Ok(interpolator.interpolate(template, &ARTIFACT_EXPRESSION_PREFIXES)?)
}

/// Compute the classpath entry for one file (without the classpath prefix).
///
/// Falls back to the file's bare name when there is no matching artifact or
/// no layout type is configured.
pub fn resolve_classpath_entry(
    file: &Path,
    artifact: Option<&ResolvedArtifact>,
    config: &ManifestConfiguration,
) -> Result<String> {
    let bare_name = || {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let Some(artifact) = artifact else {
        return Ok(bare_name());
    };
    let Some((layout, custom)) = config.layout()? else {
        return Ok(bare_name());
    };

    let template = layout_template(layout, custom, config.use_unique_versions);
    let entry = interpolate_for_artifact(template, artifact)?;
    tracing::debug!(
        file = %file.display(),
        layout = layout.as_str(),
        entry = %entry,
        "resolved classpath entry"
    );
    Ok(entry)
}

/// Build the full `Class-Path` value for a project.
///
/// Entries follow the runtime classpath order; paths that are not regular
/// files on disk (class directories, missing jars) are skipped.
pub fn build_classpath(project: &Project, config: &ManifestConfiguration) -> Result<String> {
    let mut entries = Vec::new();

    for file in &project.runtime_classpath {
        if !file.is_file() {
            tracing::debug!(path = %file.display(), "skipping non-file classpath element");
            continue;
        }

        let artifact = project.find_artifact_with_file(file);
        let entry = resolve_classpath_entry(file, artifact, config)?;
        entries.push(format!("{}{}", config.classpath_prefix, entry));
    }

    Ok(entries.join(" "))
}
