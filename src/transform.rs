//! Content rewriting for class-dump generated headers.
//!
//! [`Transformer::transform`] applies an ordered list of textual rewrites,
//! each anchored to one malformed construct the dump tool emits:
//!
//! 1. drop `- (void).cxx_destruct;`
//! 2. `CDUnknownBlockType` becomes `id`
//! 3. literal vendor import rewrites (configurable)
//! 4. strip the conformance list from `@protocol Name <...>`
//! 5. drop `#import "NSObject-Protocol.h"`
//! 6. strip the conformance list after an `@interface` superclass
//! 7. private `struct` fields, properties and method types become `id`,
//!    unless the struct is an allow-listed system value type
//! 8. prepend the Foundation / UIKit umbrella imports the body needs
//!
//! Rules 1 to 7 are no-ops on their own output. Rule 8 skips any import line
//! already present in the text, so re-running the whole pipeline does not
//! duplicate imports either.

use crate::allowlist::AllowLists;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeSet;

static CXX_DESTRUCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*\(void\)\.cxx_destruct\s*;").unwrap());

static PROTOCOL_CONFORMANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@protocol\s+(\w+)\s*<[^>]+>").unwrap());

static NSOBJECT_PROTOCOL_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"#import\s+"NSObject-Protocol\.h""#).unwrap());

static INTERFACE_CONFORMANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(@interface\s+\w+\s*:\s*\w+)\s*<[^>]+>").unwrap());

// Instance variables, struct members and properties: `struct Foo bar;`, `struct Foo *bar;`
static STRUCT_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?P<lead>[ \t]*(?:@property[ \t]*(?:\([^)\n]*\))?[ \t]*)?)struct\s+(?P<name>\w+)(?:\s*(?P<ptr>\*+)\s*|\s+)(?P<field>\w+)\s*;",
    )
    .unwrap()
});

// Method return and parameter types: `(struct Foo)`, `(struct Foo *)`
static STRUCT_METHOD_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*struct\s+(?P<name>\w+)\s*(?P<ptr>\**)\s*\)").unwrap()
});

const BLOCK_PLACEHOLDER: &str = "CDUnknownBlockType";
const OPAQUE_OBJECT: &str = "id";

/// Substring trigger and the umbrella import it requires.
const FRAMEWORK_TRIGGERS: &[(&str, &str)] = &[
    ("UIKit", "#import <UIKit/UIKit.h>"),
    ("NS", "#import <Foundation/Foundation.h>"),
];

/// A literal import substitution, e.g. a vendor framework path to a local header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportRewrite {
    pub from: String,
    pub to: String,
}

impl ImportRewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The vendor rewrite applied when no configuration overrides it.
pub fn default_import_rewrites() -> Vec<ImportRewrite> {
    vec![ImportRewrite::new(
        "#import <MMCommon/WXPBGeneratedMessage.h>",
        "#import \"WXPBGeneratedMessage.h\"",
    )]
}

/// Rewrites raw header text into compilable header text.
#[derive(Debug, Clone)]
pub struct Transformer<'a> {
    allow_lists: &'a AllowLists,
    import_rewrites: Vec<ImportRewrite>,
}

impl<'a> Transformer<'a> {
    pub fn new(allow_lists: &'a AllowLists) -> Self {
        Self {
            allow_lists,
            import_rewrites: default_import_rewrites(),
        }
    }

    pub fn with_import_rewrites(mut self, rewrites: Vec<ImportRewrite>) -> Self {
        self.import_rewrites = rewrites;
        self
    }

    pub fn transform(&self, raw: &str) -> String {
        let content = CXX_DESTRUCT.replace_all(raw, "");
        let content = content.replace(BLOCK_PLACEHOLDER, OPAQUE_OBJECT);
        let content = self.rewrite_imports(content);
        let content = PROTOCOL_CONFORMANCE.replace_all(&content, "@protocol ${1}");
        let content = NSOBJECT_PROTOCOL_IMPORT.replace_all(&content, "");
        let content = INTERFACE_CONFORMANCE.replace_all(&content, "${1}");
        let content = self.make_private_structs_opaque(&content);
        inject_framework_imports(content)
    }

    fn rewrite_imports(&self, content: String) -> String {
        self.import_rewrites
            .iter()
            .fold(content, |acc, rewrite| acc.replace(&rewrite.from, &rewrite.to))
    }

    fn make_private_structs_opaque(&self, content: &str) -> String {
        let content = STRUCT_FIELD.replace_all(content, |caps: &Captures| {
            let name = &caps["name"];
            if self.allow_lists.is_value_type(name) {
                return caps[0].to_string();
            }
            format!(
                "{}{} {}; // struct {}{}",
                &caps["lead"],
                OPAQUE_OBJECT,
                &caps["field"],
                name,
                pointer_suffix(caps.name("ptr").map_or("", |m| m.as_str())),
            )
        });

        STRUCT_METHOD_TYPE
            .replace_all(&content, |caps: &Captures| {
                let name = &caps["name"];
                if self.allow_lists.is_value_type(name) {
                    return caps[0].to_string();
                }
                format!(
                    "({} /* struct {}{} */)",
                    OPAQUE_OBJECT,
                    name,
                    pointer_suffix(&caps["ptr"]),
                )
            })
            .into_owned()
    }
}

/// Rewrite header text with the default import rewrites.
pub fn transform(raw: &str, allow_lists: &AllowLists) -> String {
    Transformer::new(allow_lists).transform(raw)
}

fn pointer_suffix(stars: &str) -> String {
    if stars.is_empty() {
        String::new()
    } else {
        format!(" {stars}")
    }
}

fn inject_framework_imports(content: String) -> String {
    let imports: BTreeSet<&str> = FRAMEWORK_TRIGGERS
        .iter()
        .filter(|(trigger, line)| content.contains(trigger) && !content.contains(line))
        .map(|(_, line)| *line)
        .collect();

    if imports.is_empty() {
        return content;
    }

    let header = imports.into_iter().collect::<Vec<_>>().join("\n");
    format!("{header}\n\n{content}")
}
