//! basset - Raw asset to PNG converter
//!
//! A library for turning a directory of vector and raster source images
//! into 1x/2x/3x PNG variants, skipping sources whose generated PNGs
//! already embed their checksum.

pub mod cli;
pub mod config;
pub mod convert;
pub mod discovery;
pub mod error;
pub mod output;
pub mod watch;

pub use config::{Config, Overrides};
pub use convert::{
    check_status, convert_single_file, convert_tree, sha1_of_file, Conversion, ConversionJob,
    ConvertSummary, Freshness, ImageMagick, ImageTool, StatusReport, Variant,
};
pub use discovery::{discover, Manifest, Program, ScanResult, ToolSettings};
pub use error::{BassetError, Result};
