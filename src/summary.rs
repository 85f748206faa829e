//! Read-only report over the final traversal state.

use crate::closure::ClosureOutcome;
use crate::errors::HeaderFailure;
use crate::io::{ArtifactStore, HeaderSource};
use crate::traversal::{TraversalEngine, TraversalStats};
use serde::Serialize;
use tracing::info;

/// One visited header and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// Summary of a closure run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub headers_visited: usize,
    pub protocols_found: usize,
    pub stats: TraversalStats,
    pub skipped_roots: Vec<String>,
    /// Visited headers, sorted, each with sorted dependencies.
    pub headers: Vec<HeaderEntry>,
    pub protocols: Vec<String>,
    pub cycles: Vec<Vec<String>>,
    pub failures: Vec<HeaderFailure>,
}

impl Summary {
    pub fn collect<S, A>(engine: &TraversalEngine<'_, S, A>, outcome: &ClosureOutcome) -> Self
    where
        S: HeaderSource + ?Sized,
        A: ArtifactStore + ?Sized,
    {
        let graph = engine.graph();
        let headers = engine
            .visited()
            .map(|name| HeaderEntry {
                name: name.to_string(),
                dependencies: graph
                    .dependencies(name)
                    .map(|deps| deps.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            headers_visited: engine.visited_count(),
            protocols_found: engine.protocols().len(),
            stats: engine.stats(),
            skipped_roots: outcome.skipped_roots.clone(),
            headers,
            protocols: engine.protocols().iter().cloned().collect(),
            cycles: graph.detect_cycles(),
            failures: engine.failures().to_vec(),
        }
    }

    /// True when no header failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable report lines.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "=== Processing Summary ===".to_string(),
            format!("Total headers visited: {}", self.headers_visited),
            format!("Total protocols found: {}", self.protocols_found),
            format!(
                "Written: {}, skipped (existing): {}, failed: {}",
                self.stats.written,
                self.stats.skipped + self.skipped_roots.len(),
                self.stats.failed
            ),
        ];

        if !self.headers.is_empty() {
            lines.push(String::new());
            lines.push("Processed headers:".to_string());
            for entry in &self.headers {
                lines.push(format!("  - {}", entry.name));
                lines.extend(entry.dependencies.iter().map(|dep| format!("    └─ {dep}")));
            }
        }

        if !self.cycles.is_empty() {
            lines.push(String::new());
            lines.push(format!("Import cycles: {}", self.cycles.len()));
            for cycle in &self.cycles {
                lines.push(format!("  {} -> {}", cycle.join(" -> "), cycle[0]));
            }
        }

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push(format!("Failed headers: {}", self.failures.len()));
            for failure in &self.failures {
                lines.push(format!(
                    "  ✗ {} [{}] {}",
                    failure.name, failure.category, failure.detail
                ));
            }
        }

        lines
    }

    /// Emit the report through the run's logging subscriber.
    pub fn log(&self) {
        for line in self.render_lines() {
            info!("{}", line);
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::AllowLists;
    use crate::closure::resolve_closure;
    use crate::testkit::{MemoryHeaderTree, MemoryOutputTree};
    use pretty_assertions::assert_eq;

    fn run() -> Summary {
        let source = MemoryHeaderTree::new()
            .with_header("B.h", "#import \"A.h\"\n#import \"Missing.h\"\n")
            .with_header("A.h", "#import \"B.h\"\n@protocol WCDelegate\n@end\n");
        let output = MemoryOutputTree::new();
        let lists = AllowLists::default();
        let mut engine = TraversalEngine::new(&source, &output, &lists);
        let outcome = resolve_closure(&mut engine, "#import \"A.h\"\n");
        Summary::collect(&engine, &outcome)
    }

    #[test]
    fn test_summary_counts_and_sorting() {
        let summary = run();
        assert_eq!(summary.headers_visited, 3);
        assert_eq!(summary.protocols_found, 1);
        assert_eq!(
            summary.headers,
            vec![
                HeaderEntry {
                    name: "A.h".into(),
                    dependencies: vec!["B.h".into()],
                },
                HeaderEntry {
                    name: "B.h".into(),
                    dependencies: vec!["A.h".into(), "Missing.h".into()],
                },
                HeaderEntry {
                    name: "Missing.h".into(),
                    dependencies: vec![],
                },
            ]
        );
        assert_eq!(summary.cycles, vec![vec!["A.h".to_string(), "B.h".to_string()]]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_rendered_report() {
        let lines = run().render_lines();
        assert_eq!(lines[0], "=== Processing Summary ===");
        assert_eq!(lines[1], "Total headers visited: 3");
        assert_eq!(lines[2], "Total protocols found: 1");
        assert!(lines.contains(&"  - B.h".to_string()));
        assert!(lines.contains(&"    └─ Missing.h".to_string()));
        assert!(lines.contains(&"  A.h -> B.h -> A.h".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("  ✗ Missing.h [I/O]")));
    }

    #[test]
    fn test_json_report() {
        let json = run().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["headers_visited"], 3);
        assert_eq!(value["failures"][0]["name"], "Missing.h");
        assert_eq!(value["stats"]["written"], 2);
    }
}
