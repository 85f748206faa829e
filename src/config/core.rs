use serde::Deserialize;
use std::path::PathBuf;

use crate::allowlist::AllowLists;
use crate::transform::{default_import_rewrites, ImportRewrite};

/// Log file written next to the working directory unless configured otherwise.
pub const DEFAULT_LOG_FILE: &str = "header_processing.log";

/// Root configuration structure for hdrclosure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HdrClosureConfig {
    /// Log file path
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Extra system frameworks and value types
    #[serde(default)]
    pub allow_lists: Option<AllowListConfig>,

    /// Literal import substitutions; replaces the built-in vendor rewrite
    #[serde(default)]
    pub import_rewrites: Option<Vec<ImportRewrite>>,
}

/// Additions to the built-in allow-lists. Defaults are always kept.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AllowListConfig {
    #[serde(default)]
    pub frameworks: Vec<String>,

    #[serde(default)]
    pub value_types: Vec<String>,
}

impl HdrClosureConfig {
    pub fn allow_lists(&self) -> AllowLists {
        match &self.allow_lists {
            Some(extra) => AllowLists::default()
                .with_frameworks(extra.frameworks.iter().cloned())
                .with_value_types(extra.value_types.iter().cloned()),
            None => AllowLists::default(),
        }
    }

    pub fn import_rewrites(&self) -> Vec<ImportRewrite> {
        self.import_rewrites
            .clone()
            .unwrap_or_else(default_import_rewrites)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}
