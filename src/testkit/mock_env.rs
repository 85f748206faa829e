//! In-memory header trees for testing traversal without touching disk.
//!
//! [`MemoryHeaderTree`] implements [`HeaderSource`] and [`MemoryOutputTree`]
//! implements [`ArtifactStore`]. Both are `Clone`; clones share state through
//! `Arc<RwLock<_>>`, so a test can hand one clone to the engine and inspect
//! the other afterwards.

use crate::errors::{HeaderError, Result};
use crate::io::traits::{ArtifactStore, HeaderSource};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Arc, RwLock};

/// In-memory source headers, keyed by header name.
#[derive(Clone, Debug, Default)]
pub struct MemoryHeaderTree {
    headers: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryHeaderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to the tree.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let tree = MemoryHeaderTree::new()
    ///     .with_header("A.h", "#import \"B.h\"\n")
    ///     .with_header("B.h", "@class A;\n");
    /// ```
    pub fn with_header(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.headers
            .write()
            .expect("Lock poisoned")
            .insert(name.into(), content.into());
        self
    }

    /// Add multiple headers at once.
    pub fn with_headers<'a>(
        mut self,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (name, content) in headers {
            self = self.with_header(name, content);
        }
        self
    }
}

impl HeaderSource for MemoryHeaderTree {
    fn read_header(&self, name: &str) -> Result<String> {
        self.headers
            .read()
            .expect("Lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| {
                HeaderError::io(
                    name,
                    io::Error::new(io::ErrorKind::NotFound, "header not in memory tree"),
                )
            })
    }

    fn contains(&self, name: &str) -> bool {
        self.headers
            .read()
            .expect("Lock poisoned")
            .contains_key(name)
    }
}

/// In-memory output tree that records every artifact write.
#[derive(Clone, Debug, Default)]
pub struct MemoryOutputTree {
    artifacts: Arc<RwLock<BTreeMap<String, String>>>,
    write_counts: Arc<RwLock<BTreeMap<String, usize>>>,
    read_only: Arc<RwLock<BTreeSet<String>>>,
}

impl MemoryOutputTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an artifact as if a previous run had produced it.
    pub fn with_artifact(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.artifacts
            .write()
            .expect("Lock poisoned")
            .insert(name.into(), content.into());
        self
    }

    /// Make writes for this header fail with a permission error.
    pub fn with_read_only(self, name: impl Into<String>) -> Self {
        self.read_only
            .write()
            .expect("Lock poisoned")
            .insert(name.into());
        self
    }

    pub fn artifact(&self, name: &str) -> Option<String> {
        self.artifacts.read().expect("Lock poisoned").get(name).cloned()
    }

    /// Sorted names of all artifacts currently present.
    pub fn artifact_names(&self) -> Vec<String> {
        self.artifacts
            .read()
            .expect("Lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Number of times `write_artifact` succeeded for this header.
    pub fn write_count(&self, name: &str) -> usize {
        self.write_counts
            .read()
            .expect("Lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

impl ArtifactStore for MemoryOutputTree {
    fn has_artifact(&self, name: &str) -> bool {
        self.artifacts
            .read()
            .expect("Lock poisoned")
            .contains_key(name)
    }

    fn write_artifact(&self, name: &str, content: &str) -> Result<()> {
        if self.read_only.read().expect("Lock poisoned").contains(name) {
            return Err(HeaderError::io(
                name,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only artifact"),
            ));
        }
        self.artifacts
            .write()
            .expect("Lock poisoned")
            .insert(name.to_string(), content.to_string());
        *self
            .write_counts
            .write()
            .expect("Lock poisoned")
            .entry(name.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}
