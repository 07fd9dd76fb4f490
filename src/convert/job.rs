//! Planning of 1x/2x/3x conversion jobs for a source image.

use std::path::{Path, PathBuf};

/// Output density of a generated PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    X1,
    X2,
    X3,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::X1, Variant::X2, Variant::X3];

    /// Multiplier applied to the native width.
    pub fn scale(self) -> u32 {
        match self {
            Variant::X1 => 1,
            Variant::X2 => 2,
            Variant::X3 => 3,
        }
    }

    /// Suffix appended to the basename of the destination file.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::X1 => "",
            Variant::X2 => "@2x",
            Variant::X3 => "@3x",
        }
    }

    /// Destination file name for a source basename.
    pub fn file_name(self, basename: &str) -> String {
        format!("{}{}.png", basename, self.suffix())
    }
}

/// One resize of one source into one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Basename of a source file: its name without the final extension.
pub fn source_basename(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Variants to generate for a basename.
///
/// Sources already named `@2x`/`@3x` only get a 1x output.
pub fn variants_for(basename: &str) -> &'static [Variant] {
    const ONLY_1X: &[Variant] = &[Variant::X1];

    if basename.ends_with("@2x") || basename.ends_with("@3x") {
        ONLY_1X
    } else {
        &Variant::ALL
    }
}

/// Destination paths of every variant of `source`, inside `dest_dir`.
pub fn plan_destinations(source: &Path, dest_dir: &Path) -> Vec<(Variant, PathBuf)> {
    let Some(basename) = source_basename(source) else {
        return Vec::new();
    };

    variants_for(basename)
        .iter()
        .map(|&variant| (variant, dest_dir.join(variant.file_name(basename))))
        .collect()
}

/// Conversion jobs for `source`, given its native width.
///
/// Every output is square: the native width is used for both dimensions.
pub fn plan_jobs(source: &Path, dest_dir: &Path, native_width: u32) -> Vec<ConversionJob> {
    plan_destinations(source, dest_dir)
        .into_iter()
        .map(|(variant, destination)| {
            let side = native_width.saturating_mul(variant.scale());
            ConversionJob {
                source: source.to_path_buf(),
                destination,
                width: side,
                height: side,
            }
        })
        .collect()
}
