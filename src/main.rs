use clap::Parser;
use miette::Result;
use tint::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => tint::cli::build::run(args)?,
        Commands::Validate(args) => tint::cli::validate::run(args)?,
        Commands::Palette(args) => tint::cli::palette::run(args)?,
        Commands::Completions(args) => tint::cli::completions::run(args)?,
    }

    Ok(())
}
