//! Command implementations for jar-archiver.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command loads the build descriptor, runs one
//! library operation and prints its result to stdout.

use crate::cli::{
    ArchiveArgs, Command, DescriptorArg, ManifestArgs, ManifestFormat, PomPropertiesArgs,
};
use jar_archiver::archiver::DirectoryArchiver;
use jar_archiver::assembly::create_archive;
use jar_archiver::classpath::build_classpath;
use jar_archiver::config::BuildDescriptor;
use jar_archiver::descriptor::{default_descriptor_path, ensure_descriptor};
use jar_archiver::error::Result;
use jar_archiver::manifest::build_manifest;
use jar_archiver::project::BuildSession;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    let output = match command {
        Command::Manifest(args) => cmd_manifest(&args)?,
        Command::Classpath(args) => cmd_classpath(&args)?,
        Command::Descriptor(args) => cmd_descriptor(&args)?,
        Command::Archive(args) => cmd_archive(&args)?,
    };
    print!("{}", output);
    Ok(())
}

fn session() -> BuildSession {
    BuildSession::with_tool_version(env!("CARGO_PKG_VERSION"))
}

fn load(arg: &DescriptorArg) -> Result<BuildDescriptor> {
    let descriptor = BuildDescriptor::load(&arg.descriptor)?;
    tracing::debug!(
        path = %arg.descriptor.display(),
        project = %descriptor.project.as_artifact(),
        "loaded build descriptor"
    );
    Ok(descriptor)
}

fn cmd_manifest(args: &ManifestArgs) -> Result<String> {
    let descriptor = load(&args.descriptor)?;
    let project = descriptor.project.with_effective_version();
    let manifest = build_manifest(&project, Some(&session()), &descriptor.archive)?;

    match args.format {
        ManifestFormat::Text => Ok(manifest.render()),
        ManifestFormat::Json => Ok(format!("{}\n", manifest.to_json()?)),
    }
}

fn cmd_classpath(args: &DescriptorArg) -> Result<String> {
    let descriptor = load(args)?;
    let classpath = build_classpath(&descriptor.project, &descriptor.archive.manifest)?;
    Ok(format!("{}\n", classpath))
}

fn cmd_descriptor(args: &PomPropertiesArgs) -> Result<String> {
    let descriptor = load(&args.descriptor)?;
    let project = descriptor.project.with_effective_version();

    // Registration is not needed outside of an archive build.
    let mut archiver = DirectoryArchiver::new();
    let path = ensure_descriptor(
        &project,
        &mut archiver,
        &default_descriptor_path(&project),
        descriptor.archive.pom_properties_file.as_deref(),
        args.force,
    )?;
    Ok(format!("{}\n", path.display()))
}

fn cmd_archive(args: &ArchiveArgs) -> Result<String> {
    let descriptor = load(&args.descriptor)?;
    let mut archiver = DirectoryArchiver::new();
    create_archive(
        Some(&session()),
        &descriptor.project,
        &descriptor.archive,
        &mut archiver,
        &args.output,
    )?;
    Ok(format!("{}\n", args.output.display()))
}
