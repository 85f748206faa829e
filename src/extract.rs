//! Reference extraction from rewritten header text.
//!
//! Imports come from `#import` directives and from `@class` forward
//! declarations whose conventional `<Class>.h` header actually exists in the
//! source tree. Protocol names come from `@protocol` declarations and from
//! angle-bracket conformance lists.

use crate::allowlist::AllowLists;
use crate::io::HeaderSource;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static IMPORT_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"#import\s+[<"](.+?)[>"]"#).unwrap());

static FORWARD_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"@class\s+([^;]+);").unwrap());

static PROTOCOL_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"@protocol\s+(\w+)").unwrap());

static ANGLE_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^<>\n]+)>").unwrap());

/// The base protocol every class already conforms to.
pub const BASE_PROTOCOL: &str = "NSObject";

/// Object types that appear as generic arguments, e.g. `NSDictionary<NSString *, id>`.
const GENERIC_OBJECT_TYPES: &[&str] = &["id", "Class"];

/// Everything a single header refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    /// Header names to traverse next.
    pub imports: BTreeSet<String>,
    /// Protocol names, excluding the base protocol.
    pub protocols: BTreeSet<String>,
    /// Protocol headers found in the source tree. Protocols resolving to the
    /// same file share one entry.
    pub protocol_headers: BTreeSet<String>,
}

/// Import paths named by `#import` directives, minus system frameworks.
///
/// Order of first appearance is preserved and duplicates are dropped.
pub fn import_directives(text: &str, allow_lists: &AllowLists) -> Vec<String> {
    let mut seen = BTreeSet::new();
    IMPORT_DIRECTIVE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|path| !allow_lists.is_system_import(path))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Extract imports and protocol references from rewritten header text.
pub fn extract_references<S: HeaderSource + ?Sized>(
    text: &str,
    source: &S,
    allow_lists: &AllowLists,
) -> References {
    let mut imports: BTreeSet<String> = import_directives(text, allow_lists).into_iter().collect();
    imports.extend(forward_class_headers(text, source));

    let protocols = protocol_names(text);
    let protocol_headers = protocols
        .iter()
        .filter_map(|name| resolve_protocol_header(name, source))
        .collect();

    References {
        imports,
        protocols,
        protocol_headers,
    }
}

fn forward_class_headers<'a, S: HeaderSource + ?Sized>(
    text: &'a str,
    source: &'a S,
) -> impl Iterator<Item = String> + 'a {
    FORWARD_CLASS
        .captures_iter(text)
        .flat_map(|caps| {
            caps[1]
                .split(',')
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|name| is_identifier(name))
        .map(|name| format!("{name}.h"))
        .filter(move |header| source.contains(header))
}

fn protocol_names(text: &str) -> BTreeSet<String> {
    let declared = PROTOCOL_DECL
        .captures_iter(text)
        .map(|caps| caps[1].to_string());

    // Import directives use angle brackets too; they are not conformance lists.
    let conformed = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("#import"))
        .flat_map(|line| {
            ANGLE_LIST
                .captures_iter(line)
                .flat_map(|caps| {
                    caps[1]
                        .split(',')
                        .map(|name| name.trim().to_string())
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
        })
        .filter(|name| is_identifier(name) && !GENERIC_OBJECT_TYPES.contains(&name.as_str()));

    declared
        .chain(conformed)
        .filter(|name| name != BASE_PROTOCOL)
        .collect()
}

/// First existing conventional header for a protocol name.
pub fn resolve_protocol_header<S: HeaderSource + ?Sized>(name: &str, source: &S) -> Option<String> {
    [
        format!("{name}-Protocol.h"),
        format!("{name}Protocol.h"),
        format!("{name}.h"),
    ]
    .into_iter()
    .find(|candidate| source.contains(candidate))
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
