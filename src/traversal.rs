//! Dependency closure traversal.
//!
//! [`TraversalEngine::process_header`] walks the import graph depth-first
//! from one header using an explicit worklist. A header is marked visited
//! when it is popped, before any of its imports are pushed, so mutual
//! imports terminate and every header is processed at most once per run.
//!
//! Per header:
//!
//! 1. if an artifact already exists in the output tree, stop (resumed run)
//! 2. read the raw text, transform it, extract references
//! 3. merge import edges into the graph and protocol names into the registry
//! 4. write the artifact, then queue unvisited imports
//!
//! A failure in steps 2 or 4 is recorded against that header only; the
//! header stays visited, produces no artifact, and traversal continues.

use crate::allowlist::AllowLists;
use crate::errors::{HeaderFailure, Result};
use crate::extract::extract_references;
use crate::graph::DependencyGraph;
use crate::io::{validate_header_name, ArtifactStore, HeaderSource};
use crate::transform::{ImportRewrite, Transformer};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info};

/// Processing state of a visited header. Unvisited headers have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderState {
    /// Claimed by the traversal; stays here if processing failed.
    InProgress,
    /// Artifact written, or already present from an earlier run.
    Done,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Artifacts written during this run.
    pub written: usize,
    /// Headers whose artifact already existed and were not reprocessed.
    pub skipped: usize,
    /// Headers that failed and have no artifact.
    pub failed: usize,
}

/// Owns the visited set, dependency graph and protocol registry for a run.
pub struct TraversalEngine<'a, S: HeaderSource + ?Sized, A: ArtifactStore + ?Sized> {
    source: &'a S,
    output: &'a A,
    allow_lists: &'a AllowLists,
    transformer: Transformer<'a>,
    states: BTreeMap<String, HeaderState>,
    graph: DependencyGraph,
    protocols: BTreeSet<String>,
    failures: Vec<HeaderFailure>,
    stats: TraversalStats,
}

impl<'a, S: HeaderSource + ?Sized, A: ArtifactStore + ?Sized> TraversalEngine<'a, S, A> {
    pub fn new(source: &'a S, output: &'a A, allow_lists: &'a AllowLists) -> Self {
        Self {
            source,
            output,
            allow_lists,
            transformer: Transformer::new(allow_lists),
            states: BTreeMap::new(),
            graph: DependencyGraph::new(),
            protocols: BTreeSet::new(),
            failures: Vec::new(),
            stats: TraversalStats::default(),
        }
    }

    pub fn with_import_rewrites(mut self, rewrites: Vec<ImportRewrite>) -> Self {
        self.transformer = self.transformer.with_import_rewrites(rewrites);
        self
    }

    /// Process a header and, transitively, everything it imports.
    ///
    /// Returns immediately if the header was already visited in this run.
    pub fn process_header(&mut self, name: &str) {
        let mut worklist = vec![name.to_string()];

        while let Some(current) = worklist.pop() {
            if self.states.contains_key(&current) {
                continue;
            }
            self.states.insert(current.clone(), HeaderState::InProgress);

            if self.output.has_artifact(&current) {
                info!("Skipping {}: output already exists", current);
                self.stats.skipped += 1;
                self.states.insert(current, HeaderState::Done);
                continue;
            }

            match self.expand(&current) {
                Ok(imports) => {
                    self.states.insert(current, HeaderState::Done);
                    // Reversed so the first import is processed first.
                    worklist.extend(
                        imports
                            .into_iter()
                            .rev()
                            .filter(|import| !self.states.contains_key(import)),
                    );
                }
                Err(err) => {
                    if err.is_not_found() {
                        error!("Header not found: {}", current);
                    } else {
                        error!("Error processing {}: {}", current, err);
                    }
                    self.failures.push(HeaderFailure::new(&current, &err));
                    self.stats.failed += 1;
                }
            }
        }
    }

    fn expand(&mut self, name: &str) -> Result<BTreeSet<String>> {
        validate_header_name(name)?;
        let raw = self.source.read_header(name)?;
        let content = self.transformer.transform(&raw);
        let refs = extract_references(&content, self.source, self.allow_lists);

        debug!(
            "{}: {} imports, {} protocols",
            name,
            refs.imports.len(),
            refs.protocols.len()
        );

        self.graph.add_dependencies(name, refs.imports.iter().cloned());
        for header in &refs.protocol_headers {
            self.graph.add_dependency(header, header);
        }
        self.protocols.extend(refs.protocols);

        self.output.write_artifact(name, &content)?;
        self.stats.written += 1;

        Ok(refs.imports)
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn state(&self, name: &str) -> Option<HeaderState> {
        self.states.get(name).copied()
    }

    /// Visited header names in sorted order.
    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn visited_count(&self) -> usize {
        self.states.len()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn protocols(&self) -> &BTreeSet<String> {
        &self.protocols
    }

    pub fn failures(&self) -> &[HeaderFailure] {
        &self.failures
    }

    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    pub fn output(&self) -> &A {
        self.output
    }

    pub fn allow_lists(&self) -> &AllowLists {
        self.allow_lists
    }
}
