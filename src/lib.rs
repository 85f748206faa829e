// Export modules for library usage
pub mod allowlist;
pub mod cli;
pub mod closure;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extract;
pub mod graph;
pub mod io;
pub mod observability;
pub mod summary;
pub mod testkit;
pub mod transform;
pub mod traversal;

// Re-export commonly used types
pub use crate::allowlist::AllowLists;
pub use crate::closure::{resolve_closure, resolve_manifest, ClosureOutcome};
pub use crate::errors::{HeaderError, HeaderFailure};
pub use crate::extract::{extract_references, import_directives, References};
pub use crate::graph::DependencyGraph;
pub use crate::io::{ArtifactStore, HeaderSource, HeaderTree, OutputTree};
pub use crate::summary::{HeaderEntry, Summary};
pub use crate::transform::{transform, ImportRewrite, Transformer};
pub use crate::traversal::{HeaderState, TraversalEngine, TraversalStats};
