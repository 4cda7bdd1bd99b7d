//! Recipe checks that run without rendering.
//!
//! Everything the compositor would fail on mid-render (and the occlusion
//! warning it would only surface at render time) is reported up front as a
//! diagnostic instead, so `tint validate` can cover a whole asset tree.

use std::path::Path;

use crate::parser::Recipe;
use crate::render::imaging;
use crate::types::Palette;

use super::diagnostic::{Diagnostic, ValidationResult};

/// Validate a recipe against a palette without producing any output.
pub fn validate_recipe(recipe: &Recipe, palette: &Palette, base_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    if recipe.layers.is_empty() {
        result.push(
            Diagnostic::error(
                "tint::validate::no-layers",
                format!("recipe `{}` has no layers; rendering would produce nothing", recipe.name),
            )
            .with_help("add at least one `- variable: image.png` entry under `layers:`"),
        );
    }

    // Dimensions of the first readable layer anchor the agreement check
    let mut expected: Option<(u32, u32, String)> = None;

    for (index, entry) in recipe.layers.iter().enumerate() {
        if entry.len() != 1 {
            result.push(
                Diagnostic::error(
                    "tint::validate::malformed-layer",
                    format!(
                        "layer {} has {} colour/image pairs, expected exactly one",
                        index + 1,
                        entry.len()
                    ),
                )
                .with_help("write each layer as `- variable: image.png`"),
            );
            continue;
        }

        let (variable, source) = entry.iter().next().expect("len checked above");
        let label = source.display().to_string();

        if variable != "transparent" && palette.get(variable).is_none() {
            result.push(
                Diagnostic::error(
                    "tint::validate::missing-colour",
                    format!(
                        "colour variable `{}` is not defined in palette `{}`",
                        variable, palette.name
                    ),
                )
                .with_help("define it in the palette or use `transparent`"),
            );
        }

        let path = base_dir.join(source);
        if !path.exists() {
            result.error(
                "tint::validate::missing-source",
                format!("layer source `{}` does not exist", label),
            );
            continue;
        }

        let image = match imaging::decode(&path) {
            Ok(image) => image,
            Err(e) => {
                result.error(
                    "tint::validate::unreadable-source",
                    format!("layer source `{}` cannot be decoded: {}", label, e),
                );
                continue;
            }
        };

        match &expected {
            None => expected = Some((image.width(), image.height(), label.clone())),
            Some((w, h, first)) if (image.width(), image.height()) != (*w, *h) => {
                result.error(
                    "tint::validate::dimensions",
                    format!(
                        "`{}` is {}x{} but `{}` is {}x{}; all layers must agree",
                        label,
                        image.width(),
                        image.height(),
                        first,
                        w,
                        h
                    ),
                );
            }
            Some(_) => {}
        }

        if index > 0 && !image.color().has_alpha() {
            result.push(
                Diagnostic::warning(
                    "tint::validate::opaque-layer",
                    format!(
                        "non-background layer `{}` has no alpha channel and hides everything beneath it",
                        label
                    ),
                )
                .with_help("export the stencil with a transparency channel"),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColourSpec, Rgb};
    use image::{DynamicImage, GrayAlphaImage, GrayImage};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn recipe_with(layers: Vec<(&str, &str)>) -> Recipe {
        Recipe {
            name: "test".to_string(),
            output: None,
            format: None,
            layers: layers
                .into_iter()
                .map(|(variable, source)| {
                    let mut map = BTreeMap::new();
                    map.insert(variable.to_string(), PathBuf::from(source));
                    map
                })
                .collect(),
        }
    }

    fn test_palette() -> Palette {
        let mut palette = Palette::new("test");
        palette.insert("red", ColourSpec::Tint(Rgb::new(255, 0, 0)));
        palette
    }

    #[test]
    fn test_valid_recipe_passes() {
        let dir = tempdir().unwrap();
        DynamicImage::ImageLuma8(GrayImage::new(2, 2))
            .save(dir.path().join("body.png"))
            .unwrap();
        DynamicImage::ImageLumaA8(GrayAlphaImage::new(2, 2))
            .save(dir.path().join("mark.png"))
            .unwrap();

        let recipe = recipe_with(vec![("red", "body.png"), ("transparent", "mark.png")]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_recipe_is_an_error() {
        let dir = tempdir().unwrap();
        let recipe = recipe_with(vec![]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(result.has_errors());
        assert!(result.iter().any(|d| d.code == "tint::validate::no-layers"));
    }

    #[test]
    fn test_missing_source_reported_without_rendering() {
        let dir = tempdir().unwrap();
        let recipe = recipe_with(vec![("red", "ghost.png")]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(result
            .iter()
            .any(|d| d.code == "tint::validate::missing-source"));
    }

    #[test]
    fn test_missing_colour_variable() {
        let dir = tempdir().unwrap();
        DynamicImage::ImageLuma8(GrayImage::new(2, 2))
            .save(dir.path().join("body.png"))
            .unwrap();

        let recipe = recipe_with(vec![("teal", "body.png")]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(result
            .iter()
            .any(|d| d.code == "tint::validate::missing-colour"));
    }

    #[test]
    fn test_dimension_disagreement() {
        let dir = tempdir().unwrap();
        DynamicImage::ImageLuma8(GrayImage::new(2, 2))
            .save(dir.path().join("a.png"))
            .unwrap();
        DynamicImage::ImageLumaA8(GrayAlphaImage::new(3, 2))
            .save(dir.path().join("b.png"))
            .unwrap();

        let recipe = recipe_with(vec![("red", "a.png"), ("transparent", "b.png")]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(result.iter().any(|d| d.code == "tint::validate::dimensions"));
    }

    #[test]
    fn test_opaque_non_background_layer_warns() {
        let dir = tempdir().unwrap();
        DynamicImage::ImageLumaA8(GrayAlphaImage::new(2, 2))
            .save(dir.path().join("base.png"))
            .unwrap();
        DynamicImage::ImageLuma8(GrayImage::new(2, 2))
            .save(dir.path().join("solid.png"))
            .unwrap();

        let recipe = recipe_with(vec![("red", "base.png"), ("red", "solid.png")]);
        let result = validate_recipe(&recipe, &test_palette(), dir.path());

        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_malformed_layer_entry() {
        let dir = tempdir().unwrap();
        let mut recipe = recipe_with(vec![]);
        recipe.layers.push(BTreeMap::new());

        let result = validate_recipe(&recipe, &test_palette(), dir.path());
        assert!(result
            .iter()
            .any(|d| d.code == "tint::validate::malformed-layer"));
    }
}
