//! Status lines for the basset CLI.
//!
//! Every line has a verb right-aligned in a fixed column followed by a message,
//! the way Cargo reports progress:
//!
//! ```text
//!   Converting Assets -> GeneratedAssets
//!    Converted Assets/icons/home.svg [1]
//!     Skipping (already generated) Assets/logo.pdf [2]
//!     Finished images conversion. Processed 2 images (1 converted, 1 skipped)
//! ```
//!
//! Lines go to stderr so `basset status --json` can own stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Verbs are padded to this width.
const VERB_WIDTH: usize = 12;

/// Colour of a line's verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Green,
    Cyan,
    Yellow,
    Red,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Cyan => "\x1b[36m",
            Tone::Yellow => "\x1b[33m",
            Tone::Red => "\x1b[31m",
        }
    }
}

/// Writes status lines to stderr, coloured when stderr is a terminal.
#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Work that is starting, e.g. `Converting Assets -> GeneratedAssets`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Green, verb, message);
    }

    /// Work that finished: a converted source, the run summary.
    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Green, verb, message);
    }

    /// Nothing to do, e.g. a source that is already generated.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Yellow, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Red, verb, message);
    }

    /// De-emphasised text such as the `[n]` counter.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.line(tone, verb, message));
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.code())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }
}

/// `plural(1, "image", "images")` is `"1 image"`.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{n} {noun}")
}

/// `path` relative to the current directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_right_aligns_verb() {
        let printer = Printer::with_color(false);

        assert_eq!(
            printer.line(Tone::Green, "Converted", "Assets/icon.svg [1]"),
            "   Converted Assets/icon.svg [1]"
        );
        assert_eq!(
            printer.line(Tone::Cyan, "Skipping", "(already generated) Assets/icon.svg [1]"),
            "    Skipping (already generated) Assets/icon.svg [1]"
        );
    }

    #[test]
    fn test_long_verb_is_not_truncated() {
        let printer = Printer::with_color(false);

        assert_eq!(
            printer.line(Tone::Yellow, "Regenerating", "icon.png"),
            "Regenerating icon.png"
        );
    }

    #[test]
    fn test_coloured_line_wraps_only_the_verb() {
        let printer = Printer::with_color(true);

        assert_eq!(
            printer.line(Tone::Red, "Error", "convert failed"),
            "\x1b[1m\x1b[31m       Error\x1b[0m convert failed"
        );
        assert_eq!(printer.dim("[3]"), "\x1b[2m[3]\x1b[0m");
        assert_eq!(Printer::with_color(false).dim("[3]"), "[3]");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "image", "images"), "0 images");
        assert_eq!(plural(1, "image", "images"), "1 image");
        assert_eq!(plural(3, "conflict", "conflicts"), "3 conflicts");
    }

    #[test]
    fn test_display_path_inside_cwd_is_relative() {
        let cwd = std::env::current_dir().unwrap();
        let expected = Path::new("Assets").join("icon.svg").display().to_string();

        assert_eq!(display_path(&cwd.join("Assets").join("icon.svg")), expected);
        assert_eq!(display_path(&cwd), ".");
    }

    #[test]
    fn test_display_path_outside_cwd_is_unchanged() {
        let path = Path::new("/nonexistent/GeneratedAssets/icon@2x.png");

        assert_eq!(display_path(path), "/nonexistent/GeneratedAssets/icon@2x.png");
    }
}
