//! Freshness report of generated PNGs, without converting anything.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::discovery::discover;
use crate::error::Result;

use super::checksum::sha1_of_file;
use super::job::plan_destinations;
use super::mirror_dir;
use super::tool::ImageTool;

/// State of one destination relative to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Destination embeds the current source checksum.
    Fresh,
    /// Destination exists but was generated from different bytes.
    Stale,
    /// Destination has not been generated.
    Missing,
}

impl Freshness {
    pub fn label(self) -> &'static str {
        match self {
            Freshness::Fresh => "Fresh",
            Freshness::Stale => "Stale",
            Freshness::Missing => "Missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub state: Freshness,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// Number of entries in the given state.
    pub fn count(&self, state: Freshness) -> usize {
        self.entries.iter().filter(|e| e.state == state).count()
    }

    /// True when every destination is fresh.
    pub fn is_up_to_date(&self) -> bool {
        self.entries.iter().all(|e| e.state == Freshness::Fresh)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Classify every destination the next conversion would produce.
pub fn check_status(config: &Config, tool: &dyn ImageTool) -> Result<StatusReport> {
    let scan = discover(&config.input_dir, &config.output_dir, &config.excludes)?;
    let mut report = StatusReport::default();

    for source in &scan.sources {
        let dest_dir = mirror_dir(&config.input_dir, &config.output_dir, source)?;
        let checksum = sha1_of_file(source)?;

        for (_, destination) in plan_destinations(source, &dest_dir) {
            let state = if !destination.is_file() {
                Freshness::Missing
            } else if tool.read_comment(&destination)?.as_deref() == Some(checksum.as_str()) {
                Freshness::Fresh
            } else {
                Freshness::Stale
            };

            report.entries.push(StatusEntry {
                source: source.clone(),
                destination,
                state,
            });
        }
    }

    Ok(report)
}
