//! Conversion of source images into 1x/2x/3x PNG variants.
//!
//! Every generated PNG carries the SHA-1 of its source in its comment
//! metadata. A destination whose comment matches the current source checksum
//! is left alone unless the run is forced.

mod checksum;
mod job;
mod status;
mod tool;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discovery::discover;
use crate::error::{BassetError, Result};
use crate::output::{display_path, plural, Printer};

pub use checksum::sha1_of_file;
pub use job::{plan_destinations, plan_jobs, source_basename, variants_for, ConversionJob, Variant};
pub use status::{check_status, Freshness, StatusEntry, StatusReport};
pub use tool::{parse_comment, parse_dimensions, source_dimensions, ImageMagick, ImageTool};

/// Outcome of a single conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The destination was (re)generated.
    Converted,
    /// The destination already embeds the current source checksum.
    Skipped,
}

/// Counts reported at the end of a tree conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Eligible source files visited.
    pub processed: usize,
    /// Sources with at least one regenerated variant.
    pub converted: usize,
    /// Sources whose variants were all up to date.
    pub skipped: usize,
    /// Sources with a destination already written by an earlier source.
    pub conflicts: usize,
}

/// Convert one source into one destination unless it is already up to date.
pub fn convert_single_file(
    tool: &dyn ImageTool,
    job: &ConversionJob,
    force_convert: bool,
) -> Result<Conversion> {
    let checksum = sha1_of_file(&job.source)?;

    if !force_convert
        && job.destination.is_file()
        && tool.read_comment(&job.destination)?.as_deref() == Some(checksum.as_str())
    {
        return Ok(Conversion::Skipped);
    }

    tool.resize(job, &checksum)?;
    Ok(Conversion::Converted)
}

/// Convert every eligible source under `config.input_dir`.
///
/// The output tree mirrors the input tree. Precondition failures (missing
/// input directory, `.imageset` directories) abort before anything is written.
///
/// A destination belongs to the first source (in walk order) that plans it.
/// Later sources mapping to the same file, such as `icon.svg` next to
/// `icon.png`, get a warning and that variant is not written.
pub fn convert_tree(
    config: &Config,
    tool: &dyn ImageTool,
    printer: &Printer,
) -> Result<ConvertSummary> {
    printer.status(
        "Converting",
        &format!(
            "{} {} {}",
            display_path(&config.input_dir),
            printer.dim("->"),
            display_path(&config.output_dir)
        ),
    );

    let scan = discover(&config.input_dir, &config.output_dir, &config.excludes)?;
    let mut summary = ConvertSummary::default();
    let mut owners: HashMap<PathBuf, &Path> = HashMap::new();

    for source in &scan.sources {
        let dest_dir = mirror_dir(&config.input_dir, &config.output_dir, source)?;
        if !dest_dir.exists() {
            fs::create_dir_all(&dest_dir).map_err(|e| BassetError::Io {
                path: dest_dir.clone(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        summary.processed += 1;

        let (width, _) = source_dimensions(tool, source)?;
        let mut converted = false;
        let mut owned = 0;
        let mut conflicted = false;
        for job in plan_jobs(source, &dest_dir, width) {
            if let Some(owner) = owners.get(&job.destination) {
                printer.warning(
                    "Conflict",
                    &format!(
                        "{} would overwrite {} from {}",
                        display_path(source),
                        display_path(&job.destination),
                        display_path(owner)
                    ),
                );
                conflicted = true;
                continue;
            }
            owners.insert(job.destination.clone(), source.as_path());
            owned += 1;

            if convert_single_file(tool, &job, config.force_convert)? == Conversion::Converted {
                converted = true;
            }
        }

        if conflicted {
            summary.conflicts += 1;
        }
        if owned == 0 {
            continue;
        }

        let counter = printer.dim(&format!("[{}]", summary.processed));
        if converted {
            summary.converted += 1;
            printer.success("Converted", &format!("{} {}", display_path(source), counter));
        } else {
            summary.skipped += 1;
            printer.info(
                "Skipping",
                &format!("(already generated) {} {}", display_path(source), counter),
            );
        }
    }

    let mut counts = format!("{} converted, {} skipped", summary.converted, summary.skipped);
    if summary.conflicts > 0 {
        counts.push_str(&format!(", {}", plural(summary.conflicts, "conflict", "conflicts")));
    }
    printer.success(
        "Finished",
        &format!(
            "images conversion. Processed {} ({})",
            plural(scan.total(), "image", "images"),
            counts
        ),
    );

    Ok(summary)
}

/// Output directory mirroring the directory of `source` under `input_dir`.
pub fn mirror_dir(input_dir: &Path, output_dir: &Path, source: &Path) -> Result<PathBuf> {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let relative = parent.strip_prefix(input_dir).map_err(|_| BassetError::Io {
        path: source.to_path_buf(),
        message: format!("Source is outside {}", input_dir.display()),
    })?;

    Ok(output_dir.join(relative))
}
