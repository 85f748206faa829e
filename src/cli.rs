use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Report lines through the logger (console and log file)
    Terminal,
    /// JSON document on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hdrclosure")]
#[command(
    about = "Normalize class-dump headers and copy the dependency closure of an entry header",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Directory containing the dumped headers
    pub headers_dir: PathBuf,

    /// Directory to write rewritten headers into (created if absent)
    pub output_dir: PathBuf,

    /// Entry header whose imports define the closure roots
    pub manifest: PathBuf,

    /// Configuration file (defaults to the nearest .hdrclosure.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file (overrides the configured one)
    #[arg(long, env = "HDRCLOSURE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (0=errors, 1=warnings, 2=info, 3=debug)
    #[arg(short, long, default_value = "2")]
    pub verbosity: u8,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: SummaryFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["hdrclosure", "dump", "out", "dump/Entry.h"]).unwrap();
        assert_eq!(cli.headers_dir, PathBuf::from("dump"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.manifest, PathBuf::from("dump/Entry.h"));
        assert_eq!(cli.verbosity, 2);
        assert_eq!(cli.format, SummaryFormat::Terminal);
    }

    #[test]
    fn test_missing_manifest_argument_is_rejected() {
        assert!(Cli::try_parse_from(["hdrclosure", "dump", "out"]).is_err());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "hdrclosure", "a", "b", "c", "--format", "json", "-v", "3", "--config", "x.toml",
        ])
        .unwrap();
        assert_eq!(cli.format, SummaryFormat::Json);
        assert_eq!(cli.verbosity, 3);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
