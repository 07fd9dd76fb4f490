use clap::Parser;
use miette::Result;
use basset::cli::{Cli, Commands};
use basset::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        None => basset::cli::convert::run(cli.convert, &printer)?,
        Some(Commands::Convert(args)) => basset::cli::convert::run(args, &printer)?,
        Some(Commands::Status(args)) => basset::cli::status::run(args, &printer)?,
        Some(Commands::Watch(args)) => basset::cli::watch::run(args, &printer)?,
        Some(Commands::Completions(args)) => basset::cli::completions::run(args)?,
    }

    Ok(())
}
