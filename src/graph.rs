use std::collections::{BTreeMap, BTreeSet};

/// Append-only import graph keyed by header name.
///
/// Edges are only ever added. A header's edge set holds the headers its
/// declarations reference directly. Protocol bookkeeping adds self-edges,
/// which cycle detection ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency edge between two headers
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Merge a set of edges into a header's edge set
    pub fn add_dependencies<I, S>(&mut self, from: &str, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
    }

    /// Get all headers that a given header depends on
    pub fn dependencies(&self, header: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(header)
    }

    /// Detect import cycles with an iterative DFS.
    ///
    /// Each reported cycle starts at the header the back edge points to.
    /// Self-edges are skipped.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut cycles = Vec::new();

        for start in self.adjacency.keys().map(String::as_str) {
            if visited.contains(start) {
                continue;
            }

            let mut path: Vec<&str> = Vec::new();
            let mut on_path: BTreeSet<&str> = BTreeSet::new();
            let mut stack: Vec<(&str, Vec<&str>)> = Vec::new();

            visited.insert(start);
            path.push(start);
            on_path.insert(start);
            stack.push((start, self.successors(start)));

            while let Some((node, pending)) = stack.last_mut() {
                let Some(next) = pending.pop() else {
                    on_path.remove(*node);
                    path.pop();
                    stack.pop();
                    continue;
                };

                if on_path.contains(next) {
                    // Found a cycle
                    if let Some(begin) = path.iter().position(|h| *h == next) {
                        cycles.push(path[begin..].iter().map(|h| h.to_string()).collect());
                    }
                } else if visited.insert(next) {
                    path.push(next);
                    on_path.insert(next);
                    stack.push((next, self.successors(next)));
                }
            }
        }

        cycles
    }

    // Reversed so that popping yields sorted order.
    fn successors(&self, header: &str) -> Vec<&str> {
        self.adjacency
            .get(header)
            .map(|deps| {
                deps.iter()
                    .filter(|dep| dep.as_str() != header)
                    .rev()
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }
}
