// Test utility module for hdrclosure integration tests
#![allow(dead_code)]

use hdrclosure::{
    resolve_manifest, AllowLists, HeaderTree, OutputTree, Summary, TraversalEngine,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A dumped headers tree, an output directory and an entry manifest on disk.
pub struct HeaderFixture {
    pub root: TempDir,
}

impl HeaderFixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("Headers")).unwrap();
        Self { root }
    }

    pub fn headers_dir(&self) -> PathBuf {
        self.root.path().join("Headers")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.path().join("Entry.h")
    }

    pub fn with_header(self, name: &str, content: &str) -> Self {
        let path = self.headers_dir().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn with_manifest(self, content: &str) -> Self {
        fs::write(self.manifest(), content).unwrap();
        self
    }

    pub fn output(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.output_dir().join(name)).ok()
    }

    /// Run one closure resolution through the library API.
    pub fn run(&self) -> Summary {
        fs::create_dir_all(self.output_dir()).unwrap();
        let source = HeaderTree::new(self.headers_dir());
        let output = OutputTree::new(self.output_dir());
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);
        let outcome = resolve_manifest(&mut engine, &self.manifest()).unwrap();
        Summary::collect(&engine, &outcome)
    }
}

/// Sorted relative paths of all files under a directory.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out);
            } else if let Ok(rel) = path.strip_prefix(base) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
