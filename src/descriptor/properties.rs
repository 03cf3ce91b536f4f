//! `.properties` file codec.
//!
//! Reads the line-oriented `key=value` format used by `pom.properties`:
//!
//! - `#` and `!` start comment lines
//! - keys end at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other
//!   escaped character stands for itself
//!
//! Writing escapes whatever would not read back unchanged and encodes
//! non-ASCII characters as `\uXXXX`.

use crate::error::{ArchiverError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::Path;
use thiserror::Error;

/// Date comment format, e.g. `Mon Jan 01 01:01:01 UTC 2024`.
const DATE_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("malformed \\uXXXX encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

/// An ordered set of string properties.
///
/// Equality ignores order, so two files with the same pairs compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key`, keeping its original position when it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse properties text. Later duplicates replace earlier values.
    pub fn parse(text: &str) -> std::result::Result<Self, PropertiesError> {
        let mut properties = Self::new();
        let normalized = text.replace("\r\n", "\n");
        let mut lines = natural_lines(&normalized).enumerate();

        while let Some((index, natural)) = lines.next() {
            let mut logical = trim_leading(natural).to_string();
            if logical.is_empty() || logical.starts_with(['#', '!']) {
                continue;
            }

            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(trim_leading(next)),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let line = index + 1;
            properties.set(unescape(key, line)?, unescape(value, line)?);
        }

        Ok(properties)
    }

    /// Read and parse a properties file.
    ///
    /// The file is decoded as ISO-8859-1, so every byte maps to the
    /// character with the same code point.
    ///
    /// # Errors
    ///
    /// `ArchiverError::Io` when the file cannot be read, and
    /// `ArchiverError::UserError` when its content is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ArchiverError::io("read", path, e))?;
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&text)
            .map_err(|e| ArchiverError::UserError(format!("{}: {}", path.display(), e)))
    }

    /// Render with an optional comment line and a date line.
    pub fn to_text(&self, comment: Option<&str>, timestamp: DateTime<Utc>) -> String {
        let mut out = String::new();
        if let Some(comment) = comment {
            out.push('#');
            out.push_str(&escape_comment(comment));
            out.push('\n');
        }
        out.push('#');
        out.push_str(&timestamp.format(DATE_FORMAT).to_string());
        out.push('\n');

        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        out
    }

    /// Atomically write to `path` with the current time in the header.
    pub fn store(&self, path: &Path, comment: Option<&str>) -> Result<()> {
        atomic_write_file(path, &self.to_text(comment, Utc::now()))
    }
}

/// Lines of `text` split on `\n` or a lone `\r`; `\r\n` must already be folded.
fn natural_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
}

fn trim_leading(line: &str) -> &str {
    line.trim_start_matches([' ', '\t', '\x0c'])
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut has_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                has_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if has_separator {
        rest = &rest[1..];
    } else {
        rest = trim_leading(rest);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }
    (key, trim_leading(rest))
}

fn unescape(raw: &str, line: usize) -> std::result::Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let unit = (hex.len() == 4)
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
                push_utf16_unit(&mut out, unit, &mut chars, line)?;
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode one UTF-16 unit, pairing a high surrogate with a following `\uXXXX`.
fn push_utf16_unit(
    out: &mut String,
    unit: u16,
    chars: &mut std::str::Chars<'_>,
    line: usize,
) -> std::result::Result<(), PropertiesError> {
    if !(0xD800..0xDC00).contains(&unit) {
        out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
        return Ok(());
    }

    let lookahead = chars.as_str();
    if let Some(hex) = lookahead.strip_prefix("\\u").and_then(|s| s.get(..4))
        && let Ok(low) = u16::from_str_radix(hex, 16)
        && (0xDC00..0xE000).contains(&low)
    {
        let decoded = char::decode_utf16([unit, low])
            .next()
            .and_then(|r| r.ok())
            .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
        out.push(decoded);
        for _ in 0..6 {
            chars.next();
        }
        return Ok(());
    }

    out.push(char::REPLACEMENT_CHARACTER);
    Ok(())
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            ' ' if i == 0 || is_key => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}

/// Comments must stay on one line.
fn escape_comment(comment: &str) -> String {
    comment.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn parse(text: &str) -> Properties {
        Properties::parse(text).unwrap()
    }

    #[test]
    fn test_parse_separators() {
        let props = parse("a=1\nb:2\nc 3\nd = 4\ne\t:\t5\nf\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some("5"));
        assert_eq!(props.get("f"), Some(""));
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let props = parse("#Generated by Maven\n! other\n\n   \nversion=1.0\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("version"), Some("1.0"));
    }

    #[test]
    fn test_parse_continuation_lines() {
        let props = parse("list=a,\\\n    b,\\\n    c\nnext=x\n");
        assert_eq!(props.get("list"), Some("a,b,c"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = parse("path=C:\\\\\nnext=x\n");
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn test_parse_escapes() {
        let props = parse("k\\=ey=tab\\there\ncaf\\u00e9=\\u00e9t\\u00E9\nx=\\q\n");
        assert_eq!(props.get("k=ey"), Some("tab\there"));
        assert_eq!(props.get("café"), Some("été"));
        assert_eq!(props.get("x"), Some("q"));
    }

    #[test]
    fn test_parse_surrogate_pair() {
        let props = parse("emoji=\\uD83D\\uDE00\n");
        assert_eq!(props.get("emoji"), Some("\u{1F600}"));
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = Properties::parse("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert_eq!(err, PropertiesError::MalformedUnicodeEscape { line: 2 });
    }

    #[test]
    fn test_crlf_line_endings() {
        let props = parse("groupId=org.example\r\nversion=1.0\r\n");
        assert_eq!(props.get("groupId"), Some("org.example"));
        assert_eq!(props.get("version"), Some("1.0"));
    }

    #[test]
    fn test_cr_only_line_endings() {
        let props = parse("groupId=org.example\rartifactId=app\rlist=a,\\\r  b\r");
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("groupId"), Some("org.example"));
        assert_eq!(props.get("artifactId"), Some("app"));
        assert_eq!(props.get("list"), Some("a,b"));
    }

    #[test]
    fn test_crlf_continuation() {
        let props = parse("list=a,\\\r\n  b\r\nnext=x\r\n");
        assert_eq!(props.get("list"), Some("a,b"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn test_load_decodes_latin1() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pom.properties");
        std::fs::write(&path, b"name=Caf\xe9\nversion=1.0\n").unwrap();

        let props = Properties::load(&path).unwrap();
        assert_eq!(props.get("name"), Some("Caf\u{e9}"));
        assert_eq!(props.get("version"), Some("1.0"));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = parse("a=1\nb=2\n");
        let b = parse("b=2\na=1\n");
        assert_eq!(a, b);
        assert_ne!(a, parse("a=1\nb=3\n"));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut props = parse("a=1\nb=2\n");
        props.set("a", "9");
        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_to_text_header_and_entries() {
        let mut props = Properties::new();
        props.set("groupId", "org.example");
        props.set("artifactId", "app");
        props.set("version", "1.0");
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 1, 1, 1).unwrap();

        assert_eq!(
            props.to_text(Some("Generated by Maven"), timestamp),
            "#Generated by Maven\n\
             #Mon Jan 01 01:01:01 UTC 2024\n\
             groupId=org.example\n\
             artifactId=app\n\
             version=1.0\n"
        );
    }

    #[test]
    fn test_to_text_escaping_reads_back() {
        let mut props = Properties::new();
        props.set("key with space", " leading space");
        props.set("sep=:#!", "a=b:c");
        props.set("unicode", "café \u{1F600}");
        props.set("controls", "line\nbreak\ttab");
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let text = props.to_text(None, timestamp);
        assert!(text.contains("key\\ with\\ space=\\ leading space\n"));
        assert!(text.contains("caf\\u00E9 \\uD83D\\uDE00"));
        assert!(text.is_ascii());
        assert_eq!(Properties::parse(&text).unwrap(), props);
    }

    #[test]
    fn test_store_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("pom.properties");
        let mut props = Properties::new();
        props.set("version", "2.0");

        props.store(&path, Some("Generated by Maven")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("#Generated by Maven\n#"));
        assert_eq!(Properties::load(&path).unwrap(), props);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Properties::load(&temp_dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ArchiverError::Io(_)));
    }
}
