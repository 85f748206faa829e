//! I/O capability traits for header processing.
//!
//! The traversal engine never touches `std::fs` directly. Reading raw headers
//! and probing for conventional filenames go through [`HeaderSource`];
//! checking for and writing rewritten artifacts go through [`ArtifactStore`].
//! Production code uses the filesystem implementations in
//! [`crate::io::real`], tests use the in-memory ones in [`crate::testkit`].

use crate::errors::Result;

/// Read-only view of the source headers tree, keyed by header name.
pub trait HeaderSource {
    /// Read a header's raw text.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::Io` if the header is missing or unreadable,
    /// `HeaderError::Decode` if it is not valid UTF-8, and
    /// `HeaderError::InvalidName` if the name would escape the tree.
    fn read_header(&self, name: &str) -> Result<String>;

    /// Check whether a header with this name exists in the tree.
    fn contains(&self, name: &str) -> bool;
}

/// Destination for rewritten headers, mirroring the source layout.
pub trait ArtifactStore {
    /// Check whether an artifact for this header name already exists.
    fn has_artifact(&self, name: &str) -> bool;

    /// Write a rewritten header, creating intermediate directories.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::Io` if the artifact or its parent directories
    /// cannot be created.
    fn write_artifact(&self, name: &str, content: &str) -> Result<()>;
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn read_header(&self, name: &str) -> Result<String> {
        (**self).read_header(name)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}

impl<T: ArtifactStore + ?Sized> ArtifactStore for &T {
    fn has_artifact(&self, name: &str) -> bool {
        (**self).has_artifact(name)
    }

    fn write_artifact(&self, name: &str, content: &str) -> Result<()> {
        (**self).write_artifact(name, content)
    }
}
