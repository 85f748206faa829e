//! Closure driver: treats the entry header as a manifest of roots.
//!
//! The manifest itself is never transformed or copied. Each header it
//! imports becomes a traversal root, unless that root's artifact already
//! exists, which makes repeated invocations resume instead of redoing work.

use crate::errors::{HeaderError, Result};
use crate::extract::import_directives;
use crate::io::{ArtifactStore, HeaderSource};
use crate::traversal::TraversalEngine;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// What the driver did with each manifest import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClosureOutcome {
    /// Roots handed to the traversal engine, in manifest order.
    pub processed_roots: Vec<String>,
    /// Roots skipped because their artifact already existed.
    pub skipped_roots: Vec<String>,
}

/// Launch one traversal per header imported by the manifest text.
pub fn resolve_closure<S, A>(
    engine: &mut TraversalEngine<'_, S, A>,
    manifest: &str,
) -> ClosureOutcome
where
    S: HeaderSource + ?Sized,
    A: ArtifactStore + ?Sized,
{
    let mut outcome = ClosureOutcome::default();

    for root in import_directives(manifest, engine.allow_lists()) {
        // Already reached from an earlier root in this run.
        if engine.is_visited(&root) {
            continue;
        }
        if engine.output().has_artifact(&root) {
            info!("Skipping {}: output already exists", root);
            outcome.skipped_roots.push(root);
            continue;
        }
        engine.process_header(&root);
        outcome.processed_roots.push(root);
    }

    outcome
}

/// Read the manifest header from disk and resolve its closure.
///
/// # Errors
///
/// Returns `HeaderError::ManifestNotFound` if the manifest does not exist
/// and `HeaderError::Io` / `HeaderError::Decode` if it cannot be read.
pub fn resolve_manifest<S, A>(
    engine: &mut TraversalEngine<'_, S, A>,
    manifest_path: &Path,
) -> Result<ClosureOutcome>
where
    S: HeaderSource + ?Sized,
    A: ArtifactStore + ?Sized,
{
    let manifest = read_manifest(manifest_path)?;
    info!("Starting to process {}", manifest_path.display());
    Ok(resolve_closure(engine, &manifest))
}

fn read_manifest(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HeaderError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HeaderError::io(path, e)
        }
    })?;
    String::from_utf8(bytes).map_err(|_| HeaderError::Decode {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::AllowLists;
    use crate::testkit::{MemoryHeaderTree, MemoryOutputTree};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MANIFEST: &str = indoc! {r#"
        #import <UIKit/UIKit.h>
        #import "A.h"
        #import "B.h"
    "#};

    fn source() -> MemoryHeaderTree {
        MemoryHeaderTree::new()
            .with_header("A.h", "#import \"Shared.h\"\n")
            .with_header("B.h", "#import \"Shared.h\"\n")
            .with_header("Shared.h", "")
    }

    #[test]
    fn test_manifest_imports_become_roots() {
        let source = source();
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);

        let outcome = resolve_closure(&mut engine, MANIFEST);

        assert_eq!(outcome.processed_roots, vec!["A.h", "B.h"]);
        assert!(outcome.skipped_roots.is_empty());
        assert_eq!(output.artifact_names(), vec!["A.h", "B.h", "Shared.h"]);
        assert_eq!(output.write_count("Shared.h"), 1);
        assert!(!engine.is_visited("UIKit/UIKit.h"));
    }

    #[test]
    fn test_second_run_skips_everything() {
        let source = source();
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();

        let mut first = TraversalEngine::new(&source, &output, &lists);
        resolve_closure(&mut first, MANIFEST);

        let mut second = TraversalEngine::new(&source, &output, &lists);
        let outcome = resolve_closure(&mut second, MANIFEST);

        assert!(outcome.processed_roots.is_empty());
        assert_eq!(outcome.skipped_roots, vec!["A.h", "B.h"]);
        assert_eq!(second.visited_count(), 0);
        for name in ["A.h", "B.h", "Shared.h"] {
            assert_eq!(output.write_count(name), 1);
        }
    }

    #[test]
    fn test_root_reached_through_earlier_root_is_not_skipped() {
        let source = MemoryHeaderTree::new()
            .with_header("A.h", "#import \"Shared.h\"\n")
            .with_header("Shared.h", "");
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);

        let outcome = resolve_closure(&mut engine, "#import \"A.h\"\n#import \"Shared.h\"\n");

        assert_eq!(outcome.processed_roots, vec!["A.h"]);
        assert!(outcome.skipped_roots.is_empty());
        assert_eq!(output.write_count("Shared.h"), 1);
        assert_eq!(engine.stats().written, 2);
        assert_eq!(engine.stats().skipped, 0);
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        let source = MemoryHeaderTree::new();
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);

        let err = resolve_manifest(&mut engine, &dir.path().join("Entry.h")).unwrap_err();
        assert!(matches!(err, HeaderError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_manifest_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("Entry.h");
        fs::write(&manifest, MANIFEST).unwrap();

        let source = source();
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);

        let outcome = resolve_manifest(&mut engine, &manifest).unwrap();
        assert_eq!(outcome.processed_roots.len(), 2);
    }
}
