//! Watch command implementation.
//!
//! Converts once, then re-converts whenever a source image changes. Errors
//! after startup are reported and the watch keeps running.

use clap::Args;

use crate::convert::{convert_tree, ImageMagick};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::watch::SourceWatcher;

use super::DirArgs;

/// Convert, then re-convert whenever raw assets change
#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    pub dirs: DirArgs,
}

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let config = args.dirs.resolve()?;
    let tool = ImageMagick::new(&config.tool);

    convert_tree(&config, &tool, printer)?;

    let watcher = SourceWatcher::new(&config.input_dir, &config.output_dir)?;
    printer.info("Watching", &display_path(&config.input_dir));

    while let Some(changed) = watcher.next_batch() {
        printer.status("Changed", &plural(changed.len(), "file", "files"));
        if let Err(e) = convert_tree(&config, &tool, printer) {
            printer.error("Error", &e.to_string());
        }
    }

    Ok(())
}
