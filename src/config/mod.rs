mod core;
mod loader;

pub use self::core::{AllowListConfig, HdrClosureConfig, DEFAULT_LOG_FILE};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME,
};

/// Resolve configuration: an explicit path must load, otherwise search upwards.
pub fn resolve_config(
    explicit: Option<&std::path::Path>,
) -> Result<HdrClosureConfig, crate::errors::HeaderError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ImportRewrite;
    use indoc::indoc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let config = parse_config("").unwrap();
        assert_eq!(config, HdrClosureConfig::default());
        assert_eq!(config.log_file(), PathBuf::from(DEFAULT_LOG_FILE));
        assert!(config.allow_lists().is_value_type("CGRect"));
        assert_eq!(config.import_rewrites().len(), 1);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(indoc! {r##"
            log_file = "logs/run.log"

            [allow_lists]
            frameworks = ["AVFoundation"]
            value_types = ["CMTime"]

            [[import_rewrites]]
            from = "#import <Vendor/Base.h>"
            to = "#import \"Base.h\""
        "##})
        .unwrap();

        assert_eq!(config.log_file(), PathBuf::from("logs/run.log"));
        let lists = config.allow_lists();
        assert!(lists.is_value_type("CMTime"));
        assert!(lists.is_value_type("CGRect"));
        assert!(lists.is_system_import("AVFoundation/AVPlayer.h"));
        assert_eq!(
            config.import_rewrites(),
            vec![ImportRewrite::new("#import <Vendor/Base.h>", "#import \"Base.h\"")]
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(parse_config("colour = true\n").is_err());
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(resolve_config(Some(&missing)).is_err());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "log_file = [").unwrap();
        assert!(matches!(
            resolve_config(Some(&bad)),
            Err(crate::errors::HeaderError::Config { .. })
        ));
    }

    #[test]
    fn test_directory_ancestors_stop_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
