//! Source file discovery.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// What [`find_sources`] collects under a directory.
#[derive(Debug, Clone, Copy)]
pub struct DiscoverOptions<'a> {
    /// File extensions to collect, with or without the leading dot.
    pub extensions: &'a [String],
    /// Descend into dot-directories and collect dot-files.
    pub include_hidden: bool,
    /// Directory names never descended into.
    pub skip_dirs: &'a [String],
}

/// Collect source files under `root`, sorted by path.
///
/// A `root` that is itself a file is returned as-is, whatever its extension.
///
/// # Errors
/// Returns the first error hit while walking the tree (missing root,
/// unreadable directory).
pub fn find_sources(
    root: &Path,
    options: &DiscoverOptions<'_>,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || keep_entry(e, options))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.depth() == 0 || has_extension(entry.path(), options.extensions) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

fn keep_entry(entry: &DirEntry, options: &DiscoverOptions<'_>) -> bool {
    let name = entry.file_name().to_string_lossy();
    if !options.include_hidden && name.starts_with('.') {
        return false;
    }
    let skipped = || options.skip_dirs.iter().any(|d| d.as_str() == name.as_ref());
    !(entry.file_type().is_dir() && skipped())
}

/// The path's extension is one of `extensions` (ASCII case-insensitive).
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
