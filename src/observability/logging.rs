//! Per-run logging setup.
//!
//! One subscriber is installed per invocation: a console layer on stderr and
//! an append-only, ANSI-free layer on the log file. `RUST_LOG` takes
//! precedence over the verbosity flag. Library code only emits `tracing`
//! events, so tests that never call [`init_logging`] run silently.

use crate::errors::{HeaderError, Result};
use crate::io::ensure_dir;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// 0=errors, 1=warnings, 2=info, 3=debug
    pub verbosity: u8,
    /// Log file; `None` logs to the console only.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            verbosity: 2,
            log_file: None,
        }
    }
}

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Install the global subscriber for this run.
///
/// # Errors
///
/// Returns `HeaderError::Io` if the log file cannot be opened and
/// `HeaderError::Config` if a subscriber was already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(options.verbosity).to_string()));

    let file_layer = match &options.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| HeaderError::io(path, e))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| HeaderError::config(format!("logging already initialised: {e}"), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::ERROR);
        assert_eq!(level_for_verbosity(1), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(2), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(9), LevelFilter::DEBUG);
    }
}
