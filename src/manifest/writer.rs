//! `MANIFEST.MF` rendering.
//!
//! Lines are at most 72 bytes (excluding the line break). Longer headers
//! continue on following lines that start with a single space. Lines end with
//! CRLF and every section, including the main one, ends with a blank line.

use super::{Attribute, MANIFEST_VERSION, Manifest};

const MAX_LINE_LEN: usize = 72;
const EOL: &str = "\r\n";

pub(crate) fn render(manifest: &Manifest) -> String {
    let mut out = String::new();

    write_header(&mut out, MANIFEST_VERSION, manifest.manifest_version());
    write_attributes(&mut out, manifest.main_section().attributes());
    out.push_str(EOL);

    for section in manifest.sections() {
        if let Some(name) = section.name() {
            write_header(&mut out, "Name", name);
        }
        write_attributes(&mut out, section.attributes());
        out.push_str(EOL);
    }

    out
}

fn write_attributes(out: &mut String, attributes: &[Attribute]) {
    for attribute in attributes {
        write_header(out, &attribute.name, &attribute.value);
    }
}

fn write_header(out: &mut String, name: &str, value: &str) {
    let line = format!("{}: {}", name, value);
    let mut rest = line.as_str();
    let mut limit = MAX_LINE_LEN;

    loop {
        let split = split_point(rest, limit);
        out.push_str(&rest[..split]);
        out.push_str(EOL);
        rest = &rest[split..];
        if rest.is_empty() {
            break;
        }
        out.push(' ');
        // The leading space counts towards the continuation line.
        limit = MAX_LINE_LEN - 1;
    }
}

/// Largest byte index <= `limit` that falls on a char boundary.
fn split_point(s: &str, limit: usize) -> usize {
    if s.len() <= limit {
        return s.len();
    }
    let mut split = limit;
    while !s.is_char_boundary(split) {
        split -= 1;
    }
    split
}
