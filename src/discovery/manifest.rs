//! Project manifest (basset.yaml) parsing.
//!
//! The manifest provides defaults for the conversion: directories, the
//! force flag, exclude patterns and the ImageMagick program names.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BassetError, Result};

/// Project manifest loaded from basset.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory with raw assets.
    pub input_dir: Option<PathBuf>,

    /// Directory where generated PNGs are stored.
    pub output_dir: Option<PathBuf>,

    /// Regenerate assets even when the embedded checksum matches.
    pub force_convert: Option<bool>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// External program names.
    pub tool: ToolSettings,
}

/// The ImageMagick programs to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Program used for resizing and writing the comment.
    pub convert: Program,

    /// Program used for reading dimensions and the comment back.
    pub identify: Program,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            convert: Program::new("convert"),
            identify: Program::new("identify"),
        }
    }
}

/// An external program and the arguments that always lead its command line.
///
/// In basset.yaml this is either a bare name (`convert`) or a list whose
/// first item is the program (`[magick, identify]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgramSpec", into = "ProgramSpec")]
pub struct Program {
    name: String,
    args: Vec<String>,
}

/// How a [`Program`] is written in basset.yaml.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramSpec {
    Name(String),
    Command(Vec<String>),
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add a leading argument, e.g. the `identify` in `magick identify`.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl TryFrom<ProgramSpec> for Program {
    type Error = String;

    fn try_from(spec: ProgramSpec) -> std::result::Result<Self, Self::Error> {
        let mut parts = match spec {
            ProgramSpec::Name(name) => vec![name],
            ProgramSpec::Command(parts) => parts,
        }
        .into_iter();

        let name = parts.next().unwrap_or_default();
        if name.trim().is_empty() {
            return Err("program name must not be empty".to_string());
        }

        Ok(Self {
            name,
            args: parts.collect(),
        })
    }
}

impl From<Program> for ProgramSpec {
    fn from(program: Program) -> Self {
        if program.args.is_empty() {
            ProgramSpec::Name(program.name)
        } else {
            let mut parts = vec![program.name];
            parts.extend(program.args);
            ProgramSpec::Command(parts)
        }
    }
}

impl Manifest {
    /// Load manifest from a basset.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BassetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Resolve relative directories against `base`, the manifest's own
    /// directory. Absolute directories are kept as written.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |dir: PathBuf| {
            if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            }
        };
        self.input_dir = self.input_dir.map(rebase);
        self.output_dir = self.output_dir.map(rebase);
        self
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BassetError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check basset.yaml syntax".to_string()),
        })
    }
}

/// Check if a path matches any of the exclude patterns.
pub fn is_excluded(excludes: &[String], path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    excludes
        .iter()
        .any(|pattern| matches_pattern(&path_str, pattern))
}

/// Simple glob pattern matching.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        // **/dir/* matches anything inside dir anywhere in the path
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
