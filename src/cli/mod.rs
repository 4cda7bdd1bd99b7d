pub mod build;
pub mod completions;
pub mod palette;
pub mod validate;

use clap::{Parser, Subcommand};

/// tint - Stencil layer compositor
#[derive(Parser, Debug)]
#[command(name = "tint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Composite recipe files into finished images
    Build(build::BuildArgs),

    /// Check recipes against a palette without rendering
    Validate(validate::ValidateArgs),

    /// Resolve and print a palette
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
