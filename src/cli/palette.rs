//! Palette command implementation.
//!
//! Resolves a palette file and prints its bindings, human-readable by
//! default or as JSON for tooling.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, TintError};
use crate::output::plural;
use crate::parser::PaletteFile;
use crate::types::NamedColours;

/// Resolve and print a palette
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Palette file to resolve
    pub file: PathBuf,

    /// Emit machine-readable JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PaletteArgs) -> Result<()> {
    let names = NamedColours::new();
    let palette = PaletteFile::load(&args.file)?.resolve(&names)?;

    if args.json {
        let mut colours = serde_json::Map::new();
        for name in palette.variable_names() {
            if let Some(spec) = palette.get(name) {
                let value = serde_json::to_value(spec).map_err(|e| TintError::Parse {
                    message: format!("Failed to serialize palette: {}", e),
                    help: None,
                })?;
                colours.insert(name.to_string(), value);
            }
        }
        let doc = serde_json::json!({
            "name": palette.name,
            "colours": colours,
        });
        println!("{}", serde_json::to_string_pretty(&doc).map_err(|e| TintError::Parse {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })?);
    } else {
        println!(
            "{} ({})",
            palette.name,
            plural(palette.len(), "colour", "colours")
        );
        for name in palette.variable_names() {
            if let Some(spec) = palette.get(name) {
                println!("  {:<16} {}", name, spec);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_palette_command_runs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("palette.yml");
        fs::write(
            &path,
            "name: brand\ncolours:\n  blue: \"#00A\"\n  cutout: ~\n",
        )
        .unwrap();

        run(PaletteArgs {
            file: path.clone(),
            json: false,
        })
        .unwrap();

        run(PaletteArgs { file: path, json: true }).unwrap();
    }

    #[test]
    fn test_palette_command_missing_file() {
        let result = run(PaletteArgs {
            file: PathBuf::from("/nonexistent/palette.yml"),
            json: false,
        });
        assert!(matches!(result, Err(TintError::Io { .. })));
    }
}
