//! Status command implementation.
//!
//! Reports the freshness of every generated PNG without converting anything.

use clap::Args;

use crate::convert::{check_status, Freshness, ImageMagick};
use crate::error::Result;
use crate::output::{display_path, Printer};

use super::DirArgs;

/// Report which generated PNGs are fresh, stale or missing
#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatusArgs, printer: &Printer) -> Result<()> {
    let config = args.dirs.resolve()?;
    let tool = ImageMagick::new(&config.tool);

    let report = check_status(&config, &tool)?;

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    for entry in &report.entries {
        let line = format!(
            "{} {} {}",
            display_path(&entry.destination),
            printer.dim("<-"),
            display_path(&entry.source)
        );
        match entry.state {
            Freshness::Fresh => printer.success(entry.state.label(), &line),
            Freshness::Stale => printer.warning(entry.state.label(), &line),
            Freshness::Missing => printer.error(entry.state.label(), &line),
        }
    }

    let counts = format!(
        "{} fresh, {} stale, {} missing",
        report.count(Freshness::Fresh),
        report.count(Freshness::Stale),
        report.count(Freshness::Missing)
    );
    if report.is_up_to_date() {
        printer.success("Up to date", &counts);
    } else {
        printer.warning("Outdated", &counts);
    }

    Ok(())
}
