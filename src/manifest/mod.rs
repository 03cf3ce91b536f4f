//! JAR manifest model.
//!
//! A manifest is a main section of attributes plus any number of named
//! sections. Attribute names are case-insensitive and unique per section;
//! insertion order is preserved for output.
//!
//! - [`builder`] assembles the manifest for a project
//! - [`writer`] renders it as `META-INF/MANIFEST.MF` text

pub mod builder;
pub mod writer;


use crate::error::{ArchiverError, Result};
use serde::Serialize;

pub use builder::{CREATED_BY, build_manifest};

/// Path of the manifest inside an archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Manifest version written when none is configured.
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0";

pub const MANIFEST_VERSION: &str = "Manifest-Version";
pub const CLASS_PATH: &str = "Class-Path";

/// Longest attribute name the JAR format allows, in bytes.
const MAX_NAME_LEN: usize = 70;

/// A single `Name: value` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A group of attributes, either the main section or a named one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    attributes: Vec<Attribute>,
}

impl Section {
    /// A named section. The name must not be blank.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArchiverError::Manifest(
                "manifest section name must not be empty".to_string(),
            ));
        }
        validate_value("Name", &name)?;
        Ok(Self {
            name: Some(name),
            attributes: Vec::new(),
        })
    }

    /// Section name; `None` for the main section.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Value of the attribute called `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append an attribute.
    ///
    /// # Errors
    ///
    /// `ArchiverError::Manifest` when the name or value is malformed, or when
    /// the section already holds an attribute with that name.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        let value = value.into();
        validate_name(&name)?;
        validate_value(&name, &value)?;

        if self.contains(&name) {
            return Err(ArchiverError::Manifest(format!(
                "the attribute \"{}\" may not occur more than once in the same section",
                name
            )));
        }

        self.attributes.push(Attribute { name, value });
        Ok(())
    }

    /// Replace the value of an existing attribute, keeping its position.
    ///
    /// Adds the attribute when it is not present yet.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match self.position(name) {
            Some(i) => {
                validate_value(name, &value)?;
                self.attributes[i].value = value;
                Ok(())
            }
            None => self.add_attribute(name, value),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// A complete manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    manifest_version: String,
    main: Section,
    sections: Vec<Section>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            manifest_version: DEFAULT_MANIFEST_VERSION.to_string(),
            main: Section::default(),
            sections: Vec::new(),
        }
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest_version(&self) -> &str {
        &self.manifest_version
    }

    pub fn set_manifest_version(&mut self, version: impl Into<String>) -> Result<()> {
        let version = version.into();
        validate_value(MANIFEST_VERSION, &version)?;
        self.manifest_version = version;
        Ok(())
    }

    pub fn main_section(&self) -> &Section {
        &self.main
    }

    pub fn main_section_mut(&mut self) -> &mut Section {
        &mut self.main
    }

    /// Add a main attribute. `Manifest-Version` sets the manifest version.
    pub fn add_main_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if name.eq_ignore_ascii_case(MANIFEST_VERSION) {
            return self.set_manifest_version(value);
        }
        self.main.add_attribute(name, value)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == Some(name))
    }

    /// Append a named section.
    ///
    /// # Errors
    ///
    /// `ArchiverError::Manifest` for an unnamed section or a duplicate name.
    pub fn add_section(&mut self, section: Section) -> Result<()> {
        let Some(name) = section.name() else {
            return Err(ArchiverError::Manifest(
                "only the main section may be unnamed".to_string(),
            ));
        };
        if self.section(name).is_some() {
            return Err(ArchiverError::Manifest(format!(
                "the section \"{}\" may not occur more than once",
                name
            )));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Render as `MANIFEST.MF` text.
    pub fn render(&self) -> String {
        writer::render(self)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArchiverError::Manifest(format!("failed to serialize manifest: {}", e)))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ArchiverError::Manifest(
            "attribute name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ArchiverError::Manifest(format!(
            "attribute name \"{}\" is longer than {} bytes",
            name, MAX_NAME_LEN
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ArchiverError::Manifest(format!(
            "attribute name \"{}\" contains invalid character '{}'",
            name, c
        )));
    }
    Ok(())
}

fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.contains(['\r', '\n', '\0']) {
        return Err(ArchiverError::Manifest(format!(
            "value of \"{}\" must not contain line breaks or NUL characters",
            name
        )));
    }
    Ok(())
}
