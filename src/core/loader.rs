//! Request file discovery
//!
//! Command-line paths may name request files directly or directories to be
//! searched recursively for `*.request.yaml` files.

use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix that marks a request file inside a directory tree
pub const REQUEST_SUFFIX: &str = ".request.yaml";

/// Whether a path looks like a request file
pub fn is_request_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.ends_with(REQUEST_SUFFIX))
}

/// Expand files and directories into a sorted, de-duplicated file list
///
/// Files given explicitly are kept whatever their name; directories only
/// contribute `*.request.yaml` files. Hidden directories are skipped.
pub fn collect_request_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
            for entry in walker {
                let entry = entry.into_diagnostic()?;
                if entry.file_type().is_file() && is_request_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(miette::miette!("No such file or directory: {}", path.display()));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map_or(false, |n| n.starts_with('.'))
}
