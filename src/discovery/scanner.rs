//! File system scanner for discovering source images.
//!
//! Recursively scans directories to find all files with an allowed image
//! extension (`.svg`, `.pdf`, `.png`, etc.).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::is_excluded;

/// Source extensions basset knows how to convert (matched case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["eps", "pdf", "svg", "psd", "png", "jpg", "jpeg", "gif"];

/// Suffix of asset catalog image set directories.
pub const IMAGESET_SUFFIX: &str = ".imageset";

/// Suffix of asset catalogs, never offered as an input suggestion.
pub const XCASSETS_SUFFIX: &str = ".xcassets";

/// Result of scanning a directory for source images.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered source files, in walk order.
    pub sources: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.sources.len()
    }
}

/// Check whether a file name has an allowed image extension.
///
/// Hidden files and files without an extension are never eligible.
pub fn is_eligible(path: &Path) -> bool {
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if filename.starts_with('.') {
        return false;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Scan a directory for eligible source images.
///
/// Files are visited in file-name order so runs are reproducible. Anything
/// inside `pruned` (typically an output directory nested in the input) is
/// not descended into.
pub fn scan_directory(root: &Path, excludes: &[String], pruned: Option<&Path>) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    let entries = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !pruned.is_some_and(|dir| is_within(entry.path(), dir))
        })
        .filter_map(|e| e.ok());

    for entry in entries {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();

        if is_excluded(excludes, path) {
            continue;
        }

        if is_eligible(path) {
            result.sources.push(path.to_path_buf());
        }
    }

    result
}

/// Find the first directory under `root` (inclusive) whose name ends in `.imageset`.
pub fn find_imageset_dir(root: &Path) -> Option<PathBuf> {
    walk(root)
        .filter(|entry| entry.file_type().is_dir())
        .find(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(IMAGESET_SUFFIX))
        })
        .map(|entry| entry.into_path())
}

/// Suggest the top-level entry of `root` holding the most eligible files.
///
/// Files directly inside `root` count towards `"."`. Entries named `*.xcassets`
/// are never suggested. Ties go to the entry that sorts first.
pub fn suggest_input_dir(root: &Path) -> Option<PathBuf> {
    let mut counts: BTreeMap<PathBuf, usize> = BTreeMap::new();

    for entry in walk(root) {
        if !entry.file_type().is_file() || !is_eligible(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        let top = match relative.parent().and_then(|p| p.components().next()) {
            Some(component) => PathBuf::from(component.as_os_str()),
            None => PathBuf::from("."),
        };
        *counts.entry(top).or_default() += 1;
    }

    let mut best: Option<(PathBuf, usize)> = None;
    for (dir, count) in counts {
        if dir.to_string_lossy().ends_with(XCASSETS_SUFFIX) {
            continue;
        }
        if best.as_ref().map_or(true, |(_, max)| count > *max) {
            best = Some((dir, count));
        }
    }

    best.map(|(dir, _)| dir)
}

/// True when `path` is `dir` or lies below it.
///
/// Paths are compared as given first, then canonicalized, so `Assets/Gen`
/// and `./Assets/Gen` name the same directory. A `path` that no longer exists
/// (a removed file) is compared as given against the canonical `dir`.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    if path.starts_with(dir) {
        return true;
    }
    let Ok(dir) = fs::canonicalize(dir) else {
        return false;
    };
    match fs::canonicalize(path) {
        Ok(path) => path.starts_with(dir),
        Err(_) => path.starts_with(dir),
    }
}

fn walk(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
}
