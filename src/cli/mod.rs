pub mod completions;
pub mod convert;
pub mod status;
pub mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, Overrides};
use crate::error::Result;

/// basset - Converts raw assets to proper PNG(s)
#[derive(Parser, Debug)]
#[command(name = "basset")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub convert: convert::ConvertArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert raw assets into 1x/2x/3x PNGs (the default)
    Convert(convert::ConvertArgs),

    /// Report which generated PNGs are fresh, stale or missing
    Status(status::StatusArgs),

    /// Convert, then re-convert whenever raw assets change
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Directory and manifest options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct DirArgs {
    /// Directory with raw assets [default: ./Assets]
    #[arg(short = 'i', long = "input_dir", visible_alias = "input-dir")]
    pub input_dir: Option<PathBuf>,

    /// Directory where generated PNG(s) will be stored [default: ./GeneratedAssets]
    #[arg(short = 'o', long = "output_dir", visible_alias = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Regenerate assets even when they were generated before
    #[arg(
        short = 'f',
        long = "force_convert",
        visible_alias = "force-convert",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_flag
    )]
    pub force_convert: Option<bool>,

    /// Manifest file [default: ./basset.yaml when present]
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl DirArgs {
    /// Resolve flags and the manifest into a run configuration.
    pub fn resolve(&self) -> Result<Config> {
        let cwd = std::env::current_dir()?;
        Config::load(
            self.config.as_deref(),
            &cwd,
            Overrides {
                input_dir: self.input_dir.clone(),
                output_dir: self.output_dir.clone(),
                force_convert: self.force_convert,
            },
        )
    }
}

/// Parse a truthy/falsy flag value, accepting the legacy `-f False`.
fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" => Ok(false),
        other => Err(format!("expected true or false, got `{}`", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_flags() {
        let cli = Cli::try_parse_from(["basset", "-i", "raw", "-o", "gen"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.convert.dirs.input_dir, Some(PathBuf::from("raw")));
        assert_eq!(cli.convert.dirs.output_dir, Some(PathBuf::from("gen")));
        assert_eq!(cli.convert.dirs.force_convert, None);
    }

    #[test]
    fn test_underscore_long_flags() {
        let cli = Cli::try_parse_from([
            "basset",
            "--input_dir",
            "raw",
            "--output_dir",
            "gen",
            "--force_convert",
        ])
        .unwrap();

        assert_eq!(cli.convert.dirs.input_dir, Some(PathBuf::from("raw")));
        assert_eq!(cli.convert.dirs.force_convert, Some(true));
    }

    #[test]
    fn test_legacy_force_values() {
        let off = Cli::try_parse_from(["basset", "-f", "False"]).unwrap();
        assert_eq!(off.convert.dirs.force_convert, Some(false));

        let on = Cli::try_parse_from(["basset", "--force_convert", "True"]).unwrap();
        assert_eq!(on.convert.dirs.force_convert, Some(true));

        let bare = Cli::try_parse_from(["basset", "-f"]).unwrap();
        assert_eq!(bare.convert.dirs.force_convert, Some(true));
    }

    #[test]
    fn test_invalid_force_value() {
        assert!(Cli::try_parse_from(["basset", "-f", "maybe"]).is_err());
    }

    #[test]
    fn test_status_subcommand() {
        let cli = Cli::try_parse_from(["basset", "status", "--json", "-i", "raw"]).unwrap();

        match cli.command {
            Some(Commands::Status(args)) => {
                assert!(args.json);
                assert_eq!(args.dirs.input_dir, Some(PathBuf::from("raw")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert!(parse_flag("").is_err());
    }
}
