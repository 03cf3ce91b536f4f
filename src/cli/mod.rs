//! CLI argument parsing for jar-archiver.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// jar-archiver: JAR manifest and pom.properties generation.
///
/// Every command reads a YAML build descriptor holding the project, its
/// resolved dependencies and the archive configuration.
#[derive(Parser, Debug)]
#[command(name = "jar-archiver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (same as `RUST_LOG=debug`).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands for jar-archiver.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the generated manifest.
    Manifest(ManifestArgs),

    /// Print the computed `Class-Path` value.
    Classpath(DescriptorArg),

    /// Write or update pom.properties and print its path.
    ///
    /// The generated file is only rewritten when its content changes,
    /// unless `--force` is given.
    Descriptor(PomPropertiesArgs),

    /// Assemble an exploded archive directory.
    Archive(ArchiveArgs),
}

/// The build descriptor every command reads.
#[derive(Args, Debug)]
pub struct DescriptorArg {
    /// Path to the YAML build descriptor.
    #[arg(short, long, default_value = "build.yaml")]
    pub descriptor: PathBuf,
}

/// Output format for the `manifest` command.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `MANIFEST.MF` text.
    #[default]
    Text,
    /// Structured JSON.
    Json,
}

/// Arguments for the `manifest` command.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ManifestFormat::Text)]
    pub format: ManifestFormat,
}

/// Arguments for the `descriptor` command.
#[derive(Args, Debug)]
pub struct PomPropertiesArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArg,

    /// Rewrite the generated file even when its content is unchanged.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `archive` command.
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArg,

    /// Directory to write the exploded archive into.
    #[arg(short, long)]
    pub output: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default log filter for the selected verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
