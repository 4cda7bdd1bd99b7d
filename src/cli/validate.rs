//! Validate command implementation.
//!
//! Runs render-free checks over recipes and reports diagnostics.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::find_recipes;
use crate::error::{Result, TintError};
use crate::output::{display_path, plural, Printer};
use crate::parser::{PaletteFile, Recipe};
use crate::types::NamedColours;
use crate::validation::{validate_recipe, Severity, ValidationResult};

/// Check recipes against a palette without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Recipe files or directories to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Palette file with colour bindings
    #[arg(long, short)]
    pub palette: PathBuf,

    /// Directory layer sources are read from (defaults to each recipe's directory)
    #[arg(long)]
    pub source_dir: Option<PathBuf>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let printer = Printer::new();

    let names = NamedColours::new();
    let palette = PaletteFile::load(&args.palette)?.resolve(&names)?;

    let recipes = find_recipes(&args.paths)?;
    let mut result = ValidationResult::new();

    for recipe_path in &recipes {
        let recipe = Recipe::load(recipe_path)?;
        let base_dir = args.source_dir.clone().unwrap_or_else(|| {
            recipe_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });

        printer.info("Checking", &display_path(recipe_path));
        result.merge(validate_recipe(&recipe, &palette, &base_dir));
    }

    for diagnostic in result.iter() {
        let label = printer.severity(
            &diagnostic.severity.to_string(),
            diagnostic.severity == Severity::Error,
        );
        eprintln!("{}: {} {}", label, diagnostic.message, printer.dim(&format!("[{}]", diagnostic.code)));
        if let Some(help) = &diagnostic.help {
            eprintln!("  {}", printer.dim(&format!("help: {}", help)));
        }
    }

    if result.has_errors() {
        return Err(TintError::Validation {
            message: format!(
                "found {} in {}",
                plural(result.error_count(), "error", "errors"),
                plural(recipes.len(), "recipe", "recipes")
            ),
            help: None,
        });
    }

    printer.status(
        "Validated",
        &format!(
            "{}, {}",
            plural(recipes.len(), "recipe", "recipes"),
            plural(result.warning_count(), "warning", "warnings")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_clean_recipe() {
        let dir = tempdir().unwrap();
        DynamicImage::ImageLuma8(GrayImage::new(2, 2))
            .save(dir.path().join("body.png"))
            .unwrap();
        fs::write(dir.path().join("palette.yml"), "colours:\n  red: \"#F00\"\n").unwrap();
        fs::write(
            dir.path().join("ok.tint.yml"),
            "name: ok\nlayers:\n  - red: body.png\n",
        )
        .unwrap();

        let args = ValidateArgs {
            paths: vec![dir.path().join("ok.tint.yml")],
            palette: dir.path().join("palette.yml"),
            source_dir: None,
        };

        run(args).unwrap();
    }

    #[test]
    fn test_validate_reports_errors() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("palette.yml"), "colours:\n  red: \"#F00\"\n").unwrap();
        fs::write(
            dir.path().join("broken.tint.yml"),
            "name: broken\nlayers:\n  - red: ghost.png\n",
        )
        .unwrap();

        let args = ValidateArgs {
            paths: vec![dir.path().join("broken.tint.yml")],
            palette: dir.path().join("palette.yml"),
            source_dir: None,
        };

        assert!(matches!(run(args), Err(TintError::Validation { .. })));
    }
}
