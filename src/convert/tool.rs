//! External image tool integration.
//!
//! Resampling, density and comment metadata are delegated to ImageMagick.
//! Programs are always run with explicit argument lists, never through a shell.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

use crate::discovery::{Program, ToolSettings};
use crate::error::{BassetError, Result};

use super::job::ConversionJob;

/// Source extensions the `image` crate can read dimensions from.
const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Operations basset needs from an image processor.
pub trait ImageTool {
    /// Native pixel dimensions (width, height) of an image.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)>;

    /// Comment metadata embedded in an image, if any.
    fn read_comment(&self, path: &Path) -> Result<Option<String>>;

    /// Resize `job.source` into `job.destination`, embedding `comment`.
    fn resize(&self, job: &ConversionJob, comment: &str) -> Result<()>;
}

/// ImageMagick `convert` / `identify` backend.
#[derive(Debug, Clone)]
pub struct ImageMagick {
    convert: Program,
    identify: Program,
}

impl Default for ImageMagick {
    fn default() -> Self {
        Self::new(&ToolSettings::default())
    }
}

impl ImageMagick {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            convert: settings.convert.clone(),
            identify: settings.identify.clone(),
        }
    }

    /// Arguments passed to `convert` for a job.
    pub fn resize_args(job: &ConversionJob, comment: &str) -> Vec<OsString> {
        let geometry = format!("{}x{}", job.width, job.height);
        vec![
            job.source.clone().into_os_string(),
            "-resize".into(),
            geometry.clone().into(),
            "-density".into(),
            geometry.into(),
            "-set".into(),
            "comment".into(),
            comment.into(),
            job.destination.clone().into_os_string(),
        ]
    }

    /// Run `program` (with its leading arguments) followed by `args`.
    fn run(&self, program: &Program, args: &[OsString]) -> Result<Output> {
        let output = Command::new(program.name())
            .args(program.args())
            .args(args)
            .output()
            .map_err(|e| BassetError::Tool {
                program: program.to_string(),
                message: format!("Failed to execute: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BassetError::Tool {
                program: program.to_string(),
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(output)
    }
}

impl ImageTool for ImageMagick {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let args = vec![
            OsString::from("-format"),
            OsString::from("%w %h\n"),
            path.as_os_str().to_os_string(),
        ];
        let output = self.run(&self.identify, &args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        parse_dimensions(&stdout).ok_or_else(|| BassetError::Image {
            path: path.to_path_buf(),
            message: format!("Unexpected {} output: {:?}", self.identify, stdout.trim()),
        })
    }

    fn read_comment(&self, path: &Path) -> Result<Option<String>> {
        let args = vec![OsString::from("-verbose"), path.as_os_str().to_os_string()];
        let output = self.run(&self.identify, &args)?;
        Ok(parse_comment(&String::from_utf8_lossy(&output.stdout)))
    }

    fn resize(&self, job: &ConversionJob, comment: &str) -> Result<()> {
        self.run(&self.convert, &Self::resize_args(job, comment))?;
        Ok(())
    }
}

/// Extract the `comment:` property from `identify -verbose` output.
pub fn parse_comment(verbose: &str) -> Option<String> {
    verbose
        .lines()
        .find_map(|line| line.trim().strip_prefix("comment:"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse the first `"<width> <height>"` line (the first frame or page).
pub fn parse_dimensions(output: &str) -> Option<(u32, u32)> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.split_whitespace();
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    Some((width, height))
}

/// Native dimensions of a source image.
///
/// Raster formats are read with the `image` crate; everything else (and any
/// raster file it cannot decode) is asked of the image tool.
pub fn source_dimensions(tool: &dyn ImageTool, path: &Path) -> Result<(u32, u32)> {
    let is_raster = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| RASTER_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if is_raster {
        if let Ok(dimensions) = image::image_dimensions(path) {
            return Ok(dimensions);
        }
    }

    tool.dimensions(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct FixedTool {
        dimensions: (u32, u32),
        calls: Cell<usize>,
    }

    impl ImageTool for FixedTool {
        fn dimensions(&self, _path: &Path) -> Result<(u32, u32)> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.dimensions)
        }

        fn read_comment(&self, _path: &Path) -> Result<Option<String>> {
            Ok(None)
        }

        fn resize(&self, _job: &ConversionJob, _comment: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_comment() {
        let verbose = "Image:\n  Filename: icon.png\n  Properties:\n    comment: 3f786850e387550fdab836ed7e6dc881de23001b\n    date:create: 2024-01-01\n";

        assert_eq!(
            parse_comment(verbose),
            Some("3f786850e387550fdab836ed7e6dc881de23001b".to_string())
        );
    }

    #[test]
    fn test_parse_comment_missing() {
        let verbose = "Image:\n  Properties:\n    date:create: 2024-01-01\n";
        assert_eq!(parse_comment(verbose), None);
    }

    #[test]
    fn test_parse_comment_blank() {
        assert_eq!(parse_comment("    comment:   \n"), None);
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("512 256\n"), Some((512, 256)));
        assert_eq!(parse_dimensions("\n64 64\n32 32\n"), Some((64, 64)));
        assert_eq!(parse_dimensions("garbage"), None);
        assert_eq!(parse_dimensions(""), None);
    }

    #[test]
    fn test_resize_args() {
        let job = ConversionJob {
            source: PathBuf::from("Assets/my icon.svg"),
            destination: PathBuf::from("Gen/my icon@2x.png"),
            width: 128,
            height: 128,
        };

        let args = ImageMagick::resize_args(&job, "abc123");

        let expected: Vec<OsString> = [
            "Assets/my icon.svg",
            "-resize",
            "128x128",
            "-density",
            "128x128",
            "-set",
            "comment",
            "abc123",
            "Gen/my icon@2x.png",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_missing_program_is_tool_error() {
        let tool = ImageMagick::new(&ToolSettings {
            convert: Program::new("basset-no-such-convert"),
            identify: Program::new("basset-no-such-magick").arg("identify"),
        });

        let err = tool.read_comment(Path::new("icon.png")).unwrap_err();

        match err {
            BassetError::Tool { program, .. } => {
                assert_eq!(program, "basset-no-such-magick identify")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_leading_arguments_come_before_job_arguments() {
        // `sh -c 'echo "$@"' basset <args>` prints the arguments it was given.
        let tool = ImageMagick::new(&ToolSettings {
            convert: Program::new("true"),
            identify: Program::new("sh")
                .arg("-c")
                .arg("echo \"$@\"")
                .arg("basset")
                .arg("comment: leading"),
        });

        let comment = tool.read_comment(Path::new("icon.png")).unwrap();

        assert_eq!(comment, Some("leading -verbose icon.png".to_string()));
    }

    #[test]
    fn test_source_dimensions_reads_raster_natively() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        image::RgbaImage::new(6, 3).save(&path).unwrap();

        let tool = FixedTool {
            dimensions: (1, 1),
            calls: Cell::new(0),
        };

        assert_eq!(source_dimensions(&tool, &path).unwrap(), (6, 3));
        assert_eq!(tool.calls.get(), 0);
    }

    #[test]
    fn test_source_dimensions_vector_uses_tool() {
        let tool = FixedTool {
            dimensions: (512, 512),
            calls: Cell::new(0),
        };

        assert_eq!(
            source_dimensions(&tool, Path::new("Assets/icon.svg")).unwrap(),
            (512, 512)
        );
        assert_eq!(tool.calls.get(), 1);
    }

    #[test]
    fn test_source_dimensions_undecodable_raster_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let tool = FixedTool {
            dimensions: (40, 20),
            calls: Cell::new(0),
        };

        assert_eq!(source_dimensions(&tool, &path).unwrap(), (40, 20));
        assert_eq!(tool.calls.get(), 1);
    }
}
