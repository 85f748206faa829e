//! Static reference data consulted by the transformer and the extractor.

use serde::Serialize;
use std::collections::BTreeSet;

/// Frameworks whose headers are always provided by the SDK.
pub const DEFAULT_FRAMEWORKS: &[&str] = &["Foundation", "UIKit", "CoreGraphics", "QuartzCore"];

/// Aggregate types that are always available and must not be made opaque.
pub const DEFAULT_VALUE_TYPES: &[&str] = &[
    "CGPoint",
    "CGSize",
    "CGRect",
    "CGVector",
    "CGAffineTransform",
    "CATransform3D",
    "UIEdgeInsets",
    "UIOffset",
    "NSDirectionalEdgeInsets",
    "_NSRange",
    "NSRange",
];

/// System framework and value-type names, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowLists {
    frameworks: BTreeSet<String>,
    value_types: BTreeSet<String>,
}

impl Default for AllowLists {
    fn default() -> Self {
        Self {
            frameworks: DEFAULT_FRAMEWORKS.iter().map(|s| s.to_string()).collect(),
            value_types: DEFAULT_VALUE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AllowLists {
    /// Add framework names on top of the current set.
    pub fn with_frameworks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frameworks.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add value-type names on top of the current set.
    pub fn with_value_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_types.extend(names.into_iter().map(Into::into));
        self
    }

    /// True if the import path mentions any system framework.
    pub fn is_system_import(&self, import_path: &str) -> bool {
        self.frameworks.iter().any(|fw| import_path.contains(fw.as_str()))
    }

    pub fn is_value_type(&self, struct_name: &str) -> bool {
        self.value_types.contains(struct_name)
    }
}
