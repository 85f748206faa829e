use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::HdrClosureConfig;
use crate::errors::HeaderError;

/// Name of the configuration file searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".hdrclosure.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> Result<HdrClosureConfig, String> {
    toml::from_str::<HdrClosureConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Try loading config from a discovered path; unusable files fall back to defaults
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<HdrClosureConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the working directory and its ancestors for a config file
pub fn load_config() -> HdrClosureConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return HdrClosureConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Load an explicitly requested config file; any problem is fatal
pub fn load_config_from(path: &Path) -> Result<HdrClosureConfig, HeaderError> {
    let contents = read_config_file(path).map_err(|e| {
        HeaderError::config(
            format!("Failed to read {}: {}", path.display(), e),
            Some(path.to_path_buf()),
        )
    })?;
    parse_config(&contents).map_err(|e| HeaderError::config(e, Some(path.to_path_buf())))
}
