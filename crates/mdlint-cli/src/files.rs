//! Markdown file discovery.

use anyhow::Result;
use mdlint_core::Settings;
use std::path::{Path, PathBuf};

/// Expands command-line paths into the Markdown files to lint.
///
/// Directories are walked honoring `.gitignore`; only files with a
/// Markdown extension are kept. Files named directly are kept whatever
/// their extension. Missing paths are passed through so the engine reports
/// them as unreadable.
///
/// # Errors
///
/// Returns an error when a directory walk fails.
pub fn discover(paths: &[PathBuf], settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_dir() {
            walk(root, settings, &mut files)?;
        } else if !settings.is_excluded(root) {
            files.push(root.clone());
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!("Discovered {} Markdown file(s)", files.len());
    Ok(files)
}

fn walk(root: &Path, settings: &Settings, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !settings.is_markdown(path) {
            continue;
        }
        if settings.is_excluded(path) {
            tracing::debug!("Excluded: {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(())
}
