use crate::allowlist::AllowLists;
use crate::cli::SummaryFormat;
use crate::closure::resolve_manifest;
use crate::io::{self, HeaderTree, OutputTree};
use crate::summary::Summary;
use crate::transform::ImportRewrite;
use crate::traversal::TraversalEngine;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;

pub struct ProcessConfig {
    pub headers_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest: PathBuf,
    pub format: SummaryFormat,
    pub allow_lists: AllowLists,
    pub import_rewrites: Vec<ImportRewrite>,
}

/// Resolve the manifest's closure into the output directory and report.
///
/// Per-header failures are part of the returned summary, not an error.
pub fn handle_process(config: ProcessConfig) -> Result<Summary> {
    if !config.headers_dir.is_dir() {
        warn!(
            "Headers directory {} does not exist; every header will fail",
            config.headers_dir.display()
        );
    }

    io::ensure_dir(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let source = HeaderTree::new(&config.headers_dir);
    let output = OutputTree::new(&config.output_dir);
    let mut engine = TraversalEngine::new(&source, &output, &config.allow_lists)
        .with_import_rewrites(config.import_rewrites.clone());

    let outcome = resolve_manifest(&mut engine, &config.manifest)
        .with_context(|| format!("Failed to process manifest {}", config.manifest.display()))?;

    let summary = Summary::collect(&engine, &outcome);
    emit_summary(&summary, config.format)?;
    Ok(summary)
}

fn emit_summary(summary: &Summary, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Terminal => summary.log(),
        SummaryFormat::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &TempDir) -> ProcessConfig {
        ProcessConfig {
            headers_dir: root.path().join("Headers"),
            output_dir: root.path().join("out"),
            manifest: root.path().join("Entry.h"),
            format: SummaryFormat::Terminal,
            allow_lists: AllowLists::default(),
            import_rewrites: Vec::new(),
        }
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let root = TempDir::new().unwrap();
        let err = handle_process(config(&root)).unwrap_err();
        assert!(format!("{err:#}").contains("manifest header not found"));
        assert!(root.path().join("out").is_dir());
    }

    #[test]
    fn test_processes_closure_on_disk() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("Headers")).unwrap();
        fs::write(root.path().join("Headers/A.h"), "@interface A : Base\n@end\n").unwrap();
        fs::write(root.path().join("Entry.h"), "#import \"A.h\"\n").unwrap();

        let summary = handle_process(config(&root)).unwrap();
        assert_eq!(summary.headers_visited, 1);
        assert!(summary.is_clean());
        assert!(root.path().join("out/A.h").is_file());
    }
}
