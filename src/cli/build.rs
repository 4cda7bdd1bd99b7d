//! Build command implementation.
//!
//! Composites recipe files into finished images.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::find_recipes;
use crate::error::{Result, TintError};
use crate::output::{display_path, plural, Printer};
use crate::parser::{PaletteFile, Recipe};
use crate::render::{imaging, Compositor, RenderConfig};
use crate::types::{bind_layers, NamedColours, Palette};

/// Composite recipe files into finished images
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Recipe files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Palette file with colour bindings
    #[arg(long, short)]
    pub palette: PathBuf,

    /// Directory layer sources are read from (defaults to each recipe's directory)
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let printer = Printer::new();

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| TintError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let names = NamedColours::new();
    let palette = load_palette(&args.palette, &names)?;

    let recipes = find_recipes(&args.paths)?;
    if recipes.is_empty() {
        return Err(TintError::Validation {
            message: "no recipe files found".to_string(),
            help: Some("pass .tint.yml files or directories containing them".to_string()),
        });
    }

    let mut total = 0;
    for recipe_path in &recipes {
        total += build_recipe(recipe_path, &args, &palette, &printer)?;
    }

    println!(
        "Built {} to {}",
        plural(total, "composite", "composites"),
        args.output.display()
    );

    Ok(())
}

/// Render one recipe and write its output.
fn build_recipe(
    recipe_path: &Path,
    args: &BuildArgs,
    palette: &Palette,
    printer: &Printer,
) -> Result<usize> {
    let recipe = Recipe::load(recipe_path)?;
    let bound = bind_layers(&recipe.layers, palette)?;

    let source_dir = args.source_dir.clone().unwrap_or_else(|| {
        recipe_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });

    let output = args.output.join(recipe.output_filename());
    let format = imaging::format_for(&output, recipe.format.as_deref())?;

    printer.status(
        "Compositing",
        &format!("{} ({})", recipe.name, plural(bound.len(), "layer", "layers")),
    );

    let compositor = Compositor::new(RenderConfig {
        source_dir,
        output: output.clone(),
        format,
    });
    let composite = compositor.run(&bound)?;

    for warning in &composite.warnings {
        printer.warning("warning", &warning.message);
    }

    let coverage = composite
        .coverage_ratio()
        .map(|r| format!(" ({:.0}% coverage)", r * 100.0))
        .unwrap_or_default();
    printer.status(
        "Finished",
        &format!("{} -> {}{}", recipe.name, display_path(&output), coverage),
    );

    Ok(1)
}

/// Load and resolve the palette file.
fn load_palette(path: &Path, names: &NamedColours) -> Result<Palette> {
    PaletteFile::load(path)?.resolve(names)
}
