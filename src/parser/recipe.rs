//! Recipe file (`*.tint.yml`) parsing.
//!
//! A recipe is the immutable configuration for one composite: its name, the
//! ordered layer stack, and optional output filename and format.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TintError};
use crate::types::LayerEntry;

/// A parsed recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    /// Recipe name; also the default output stem.
    pub name: String,

    /// Output filename. Defaults to `<name>.png`.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Output format name (png, gif, ...). Defaults from the output extension.
    #[serde(default)]
    pub format: Option<String>,

    /// Ordered layer definitions, bottom first.
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

impl Recipe {
    /// Load a recipe from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read recipe: {}", e),
        })?;

        parse_recipe(&content)
    }

    /// The output filename, defaulting to `<name>.png`.
    pub fn output_filename(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", self.name)))
    }
}

/// Parse a recipe from a YAML string.
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    serde_yaml::from_str(content).map_err(|e| TintError::Parse {
        message: format!("Invalid recipe: {}", e),
        help: Some("a recipe needs `name:` and a `layers:` list of `- variable: image.png`".to_string()),
    })
}
