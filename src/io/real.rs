//! Filesystem implementations of the I/O traits.
//!
//! ```rust,ignore
//! use hdrclosure::io::{HeaderSource, HeaderTree};
//!
//! let tree = HeaderTree::new("dump/Headers");
//! let content = tree.read_header("WCDataItem.h")?;
//! ```

use crate::errors::{HeaderError, Result};
use crate::io::resolve_header_path;
use crate::io::traits::{ArtifactStore, HeaderSource};
use std::fs;
use std::path::PathBuf;

/// Source headers directory on disk.
#[derive(Debug, Clone)]
pub struct HeaderTree {
    root: PathBuf,
}

impl HeaderTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl HeaderSource for HeaderTree {
    fn read_header(&self, name: &str) -> Result<String> {
        let path = resolve_header_path(&self.root, name)?;
        let bytes = fs::read(&path).map_err(|e| HeaderError::io(&path, e))?;
        String::from_utf8(bytes).map_err(|_| HeaderError::Decode { path })
    }

    fn contains(&self, name: &str) -> bool {
        resolve_header_path(&self.root, name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}

/// Output directory on disk; artifacts mirror their source-relative path.
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for OutputTree {
    fn has_artifact(&self, name: &str) -> bool {
        resolve_header_path(&self.root, name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn write_artifact(&self, name: &str, content: &str) -> Result<()> {
        let path = resolve_header_path(&self.root, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| HeaderError::io(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| HeaderError::io(&path, e))
    }
}
