//! Testing infrastructure for hdrclosure.
//!
//! In-memory implementations of the I/O capability traits let the
//! transformer, extractor and traversal engine be exercised without real
//! files:
//!
//! ```rust,ignore
//! use hdrclosure::testkit::{MemoryHeaderTree, MemoryOutputTree};
//! use hdrclosure::{AllowLists, TraversalEngine};
//!
//! let source = MemoryHeaderTree::new()
//!     .with_header("A.h", "#import \"B.h\"\n")
//!     .with_header("B.h", "#import \"A.h\"\n");
//! let output = MemoryOutputTree::new();
//! let lists = AllowLists::default();
//!
//! let mut engine = TraversalEngine::new(&source, &output, &lists);
//! engine.process_header("A.h");
//! assert_eq!(output.artifact_names(), vec!["A.h", "B.h"]);
//! ```

pub mod mock_env;

pub use mock_env::{MemoryHeaderTree, MemoryOutputTree};
