//! Convert command implementation.
//!
//! Walks the input directory and writes 1x/2x/3x PNGs into the output directory.

use clap::Args;

use crate::convert::{convert_tree, ImageMagick};
use crate::error::Result;
use crate::output::Printer;

use super::DirArgs;

/// Convert raw assets into 1x/2x/3x PNGs
#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub dirs: DirArgs,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let config = args.dirs.resolve()?;
    let tool = ImageMagick::new(&config.tool);

    convert_tree(&config, &tool, printer)?;

    Ok(())
}
