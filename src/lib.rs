//! jar-archiver: JAR manifest and `pom.properties` generation.
//!
//! Given a project description, its resolved dependencies and an archive
//! configuration, this crate produces what a build writes into
//! `META-INF/` of a Java archive:
//!
//! - [`manifest`] builds `MANIFEST.MF`, including a `Class-Path` computed by
//!   [`classpath`] layouts expanded through [`interpolation`]
//! - [`descriptor`] keeps `pom.properties` current without needless rewrites
//! - [`assembly`] drives an [`archiver::Archiver`] through a complete build

pub mod archiver;
pub mod artifact;
pub mod assembly;
pub mod classpath;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod interpolation;
pub mod manifest;
pub mod project;

#[cfg(test)]
pub(crate) mod test_support;
