//! Resolved run configuration.
//!
//! Values come from CLI flags first, then the basset.yaml manifest, then
//! built-in defaults. The result is immutable and passed by reference into
//! the conversion.

use std::path::{Path, PathBuf};

use crate::discovery::{Manifest, ToolSettings, MANIFEST_FILENAME};
use crate::error::Result;

/// Default directory with raw assets.
pub const DEFAULT_INPUT_DIR: &str = "./Assets";

/// Default directory for generated PNGs.
pub const DEFAULT_OUTPUT_DIR: &str = "./GeneratedAssets";

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub force_convert: bool,
    pub excludes: Vec<String>,
    pub tool: ToolSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            force_convert: false,
            excludes: Vec::new(),
            tool: ToolSettings::default(),
        }
    }
}

/// Values given on the command line; `None` defers to the manifest.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub force_convert: Option<bool>,
}

impl Config {
    /// Merge CLI overrides over a manifest.
    pub fn resolve(manifest: Manifest, overrides: Overrides) -> Self {
        let defaults = Config::default();

        Self {
            input_dir: overrides
                .input_dir
                .or(manifest.input_dir)
                .unwrap_or(defaults.input_dir),
            output_dir: overrides
                .output_dir
                .or(manifest.output_dir)
                .unwrap_or(defaults.output_dir),
            force_convert: overrides
                .force_convert
                .or(manifest.force_convert)
                .unwrap_or(defaults.force_convert),
            excludes: manifest.excludes,
            tool: manifest.tool,
        }
    }

    /// Load the manifest (explicit path, or basset.yaml in `dir` if present)
    /// and merge the overrides over it.
    ///
    /// Relative directories in a manifest are relative to the manifest file,
    /// so `-c design/basset.yaml` with `input_dir: raw` reads `design/raw`.
    /// Directories given on the command line stay relative to the cwd.
    pub fn load(manifest_path: Option<&Path>, dir: &Path, overrides: Overrides) -> Result<Self> {
        let manifest = match manifest_path {
            Some(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Manifest::load(path)?.relative_to(base)
            }
            None => {
                let default_path = dir.join(MANIFEST_FILENAME);
                if default_path.is_file() {
                    Manifest::load(&default_path)?.relative_to(dir)
                } else {
                    Manifest::default()
                }
            }
        };

        Ok(Self::resolve(manifest, overrides))
    }
}
