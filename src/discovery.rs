//! Recipe discovery.
//!
//! Expands directory arguments into the recipe files they contain so the
//! CLI can accept either explicit files or whole asset trees.

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::{Result, TintError};

/// Recipe files end with this suffix.
pub const RECIPE_SUFFIX: &str = ".tint.yml";

/// Expand paths into recipe files.
///
/// Directories are walked recursively for `*.tint.yml` files, sorted for
/// deterministic build order; plain file paths pass through untouched.
pub fn find_recipes(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for path in paths {
        if !path.is_dir() {
            found.push(path.clone());
            continue;
        }

        let mut in_dir = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|e| TintError::Io {
                path: path.clone(),
                message: format!("Failed to scan directory: {}", e),
            })?;

            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(RECIPE_SUFFIX)
            {
                in_dir.push(entry.into_path());
            }
        }
        in_dir.sort();
        found.extend(in_dir);
    }

    Ok(found)
}
