//! Observability for a single run.
//!
//! Install logging once at startup:
//!
//! ```ignore
//! use hdrclosure::observability::{init_logging, LoggingOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LoggingOptions {
//!         verbosity: 2,
//!         log_file: Some("header_processing.log".into()),
//!     })?;
//!     // ... rest of application
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{init_logging, level_for_verbosity, LoggingOptions};
