pub mod real;
pub mod traits;

// Re-export I/O traits for convenient access
pub use real::{HeaderTree, OutputTree};
pub use traits::{ArtifactStore, HeaderSource};

use crate::errors::{HeaderError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| HeaderError::io(path, e))?;
    }
    Ok(())
}

/// Reject header names that are empty, absolute, or climb out of the tree.
pub fn validate_header_name(name: &str) -> Result<()> {
    let escapes = name.is_empty()
        || Path::new(name).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes {
        return Err(HeaderError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Join a header name onto a tree root, refusing names that leave the tree.
pub fn resolve_header_path(root: &Path, name: &str) -> Result<PathBuf> {
    validate_header_name(name)?;
    Ok(root.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_header_path() {
        let root = Path::new("/tmp/headers");
        assert_eq!(
            resolve_header_path(root, "Sub/Foo.h").unwrap(),
            root.join("Sub/Foo.h")
        );
        assert!(resolve_header_path(root, "../Foo.h").is_err());
        assert!(resolve_header_path(root, "/etc/Foo.h").is_err());
        assert!(resolve_header_path(root, "").is_err());
    }

    #[test]
    fn test_validate_header_name() {
        assert!(validate_header_name("Foo.h").is_ok());
        assert!(validate_header_name("./Sub/Foo.h").is_ok());
        assert!(matches!(
            validate_header_name("Sub/../../Foo.h"),
            Err(HeaderError::InvalidName { .. })
        ));
    }
}
