//! Source discovery for basset runs.
//!
//! This module checks the preconditions of a run (the input directory
//! exists, no asset catalog is mixed into it) and finds every source image
//! that should be converted.
//!
//! # Example
//!
//! ```ignore
//! use basset::discovery::discover;
//!
//! let scan = discover(Path::new("./Assets"), Path::new("./GeneratedAssets"), &[])?;
//! println!("Found {} images", scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::Path;

use crate::error::{BassetError, Result};

pub use manifest::{is_excluded, Manifest, Program, ToolSettings};
pub use scanner::{
    find_imageset_dir, is_eligible, is_within, scan_directory, suggest_input_dir, ScanResult,
    ALLOWED_EXTENSIONS,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "basset.yaml";

/// Check run preconditions and scan `input_dir` for source images.
///
/// A missing input directory is reported with a suggestion drawn from the
/// current working directory. `output_dir` is never scanned, even when it
/// is nested inside `input_dir`.
pub fn discover(input_dir: &Path, output_dir: &Path, excludes: &[String]) -> Result<ScanResult> {
    let cwd = std::env::current_dir()?;
    discover_with_suggestions(input_dir, output_dir, excludes, &cwd)
}

/// Like [`discover`], but suggestions for a missing input directory are
/// drawn from `suggestion_root`.
pub fn discover_with_suggestions(
    input_dir: &Path,
    output_dir: &Path,
    excludes: &[String],
    suggestion_root: &Path,
) -> Result<ScanResult> {
    check_preconditions(input_dir, suggestion_root)?;
    Ok(scan_directory(input_dir, excludes, Some(output_dir)))
}

/// Fail if `input_dir` is missing or contains an `.imageset` directory.
pub fn check_preconditions(input_dir: &Path, suggestion_root: &Path) -> Result<()> {
    if !input_dir.is_dir() {
        return Err(BassetError::input_dir_not_found(
            input_dir.to_path_buf(),
            suggest_input_dir(suggestion_root),
        ));
    }

    if let Some(path) = find_imageset_dir(input_dir) {
        return Err(BassetError::ImagesetDirectory {
            path,
            input_dir: input_dir.to_path_buf(),
        });
    }

    Ok(())
}
