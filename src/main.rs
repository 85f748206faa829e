use anyhow::{Context, Result};
use clap::Parser;
use hdrclosure::cli::Cli;
use hdrclosure::commands::process::{handle_process, ProcessConfig};
use hdrclosure::config::{resolve_config, HdrClosureConfig, DEFAULT_LOG_FILE};
use hdrclosure::observability::{init_logging, LoggingOptions};
use std::path::PathBuf;
use tracing::error;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config decides the log file, so load it before logging and report failures afterwards
    let config = resolve_config(cli.config.as_deref());
    let log_file = select_log_file(cli.log_file.clone(), config.as_ref().ok());

    init_logging(&LoggingOptions {
        verbosity: cli.verbosity,
        log_file: Some(log_file),
    })
    .context("Failed to initialise logging")?;

    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| handle_process(build_process_config(cli, &config)).map(|_| ()));

    if let Err(e) = &result {
        error!("Fatal error: {:#}", e);
    }
    result
}

// Pure function to pick the log file: CLI flag, then config, then the default
fn select_log_file(flag: Option<PathBuf>, config: Option<&HdrClosureConfig>) -> PathBuf {
    flag.or_else(|| config.map(HdrClosureConfig::log_file))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

// Pure function to build the process configuration
fn build_process_config(cli: Cli, config: &HdrClosureConfig) -> ProcessConfig {
    ProcessConfig {
        headers_dir: cli.headers_dir,
        output_dir: cli.output_dir,
        manifest: cli.manifest,
        format: cli.format,
        allow_lists: config.allow_lists(),
        import_rewrites: config.import_rewrites(),
    }
}
