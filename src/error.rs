use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for basset operations
#[derive(Error, Diagnostic, Debug)]
pub enum BassetError {
    #[error("IO error: {0}")]
    #[diagnostic(code(basset::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(basset::io))]
    Io { path: PathBuf, message: String },

    #[error("Assets directory {input_dir} not found")]
    #[diagnostic(code(basset::input_not_found))]
    InputDirNotFound {
        input_dir: PathBuf,
        suggestion: Option<PathBuf>,
        #[help]
        help: Option<String>,
    },

    #[error("Assets directory {input_dir} contains an .imageset directory: {path}")]
    #[diagnostic(
        code(basset::imageset),
        help("basset converts raw assets; point --input_dir at the raw sources, not an asset catalog")
    )]
    ImagesetDirectory { path: PathBuf, input_dir: PathBuf },

    #[error("Failed to read image {path}: {message}")]
    #[diagnostic(code(basset::image))]
    Image { path: PathBuf, message: String },

    #[error("{program} failed: {message}")]
    #[diagnostic(
        code(basset::tool),
        help("basset needs ImageMagick; configure `tool.convert` / `tool.identify` in basset.yaml if the programs live elsewhere")
    )]
    Tool { program: String, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(basset::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("JSON error: {0}")]
    #[diagnostic(code(basset::json))]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {message}")]
    #[diagnostic(code(basset::watch))]
    Watch { message: String },
}

impl BassetError {
    /// Build an `InputDirNotFound` error, attaching the suggestion as help text.
    pub fn input_dir_not_found(input_dir: PathBuf, suggestion: Option<PathBuf>) -> Self {
        let help = suggestion
            .as_ref()
            .map(|dir| format!("did you mean `--input_dir {}`?", dir.display()));
        BassetError::InputDirNotFound {
            input_dir,
            suggestion,
            help,
        }
    }
}

pub type Result<T> = std::result::Result<T, BassetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_dir_not_found_help_names_suggestion() {
        let err = BassetError::input_dir_not_found(
            PathBuf::from("./Assets"),
            Some(PathBuf::from("art")),
        );

        match err {
            BassetError::InputDirNotFound {
                suggestion, help, ..
            } => {
                assert_eq!(suggestion, Some(PathBuf::from("art")));
                assert_eq!(help.as_deref(), Some("did you mean `--input_dir art`?"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_input_dir_not_found_without_suggestion() {
        let err = BassetError::input_dir_not_found(PathBuf::from("./Assets"), None);
        assert_eq!(err.to_string(), "Assets directory ./Assets not found");
    }
}
