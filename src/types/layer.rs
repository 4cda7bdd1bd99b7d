//! Layer definitions and palette binding.
//!
//! A recipe lists layers as raw single-entry mappings; nothing about their
//! shape is trusted until [`bind_layers`] validates it structurally. Binding
//! is pure: it resolves each colour variable against the palette and keeps
//! paint order (later entries render on top).

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Result, TintError};

use super::colour::ColourSpec;
use super::palette::Palette;

/// A raw layer definition as parsed: should hold exactly one
/// (colour variable, source image) pair.
pub type LayerEntry = BTreeMap<String, PathBuf>;

/// A layer definition with its colour resolved, ready for compositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLayer {
    /// The colour variable the recipe referenced.
    pub variable: String,
    /// The resolved colour specification.
    pub colour: ColourSpec,
    /// Source image reference, relative to the recipe's source dir.
    pub source: PathBuf,
}

/// Validate layer definitions and bind their colour variables.
///
/// The literal variable `transparent` always binds [`ColourSpec::NoTint`],
/// regardless of palette contents.
pub fn bind_layers(definitions: &[LayerEntry], palette: &Palette) -> Result<Vec<BoundLayer>> {
    let mut bound = Vec::with_capacity(definitions.len());

    for (index, definition) in definitions.iter().enumerate() {
        if definition.len() != 1 {
            return Err(TintError::MalformedLayerDefinition {
                message: format!(
                    "layer {} has {} colour/image pairs, expected exactly one",
                    index + 1,
                    definition.len()
                ),
                help: Some("write each layer as `- variable: image.png`".to_string()),
            });
        }

        let (variable, source) = definition.iter().next().expect("len checked above");

        let colour = if variable == "transparent" {
            ColourSpec::NoTint
        } else {
            palette.get(variable).ok_or_else(|| TintError::MissingColourBinding {
                variable: variable.clone(),
                help: Some(format!(
                    "add `{}` to palette `{}` or use `transparent`",
                    variable, palette.name
                )),
            })?
        };

        bound.push(BoundLayer {
            variable: variable.clone(),
            colour,
            source: source.clone(),
        });
    }

    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    fn entry(variable: &str, source: &str) -> LayerEntry {
        let mut map = LayerEntry::new();
        map.insert(variable.to_string(), PathBuf::from(source));
        map
    }

    fn test_palette() -> Palette {
        let mut palette = Palette::new("test");
        palette.insert("red", ColourSpec::Tint(Rgb::new(255, 0, 0)));
        palette.insert("blue", ColourSpec::Tint(Rgb::new(0, 0, 170)));
        palette
    }

    #[test]
    fn test_bind_preserves_paint_order() {
        let defs = vec![entry("blue", "body.png"), entry("red", "star.png")];
        let bound = bind_layers(&defs, &test_palette()).unwrap();

        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].variable, "blue");
        assert_eq!(bound[0].source, PathBuf::from("body.png"));
        assert_eq!(bound[1].variable, "red");
        assert_eq!(bound[1].colour, ColourSpec::Tint(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_bind_transparent_literal() {
        let defs = vec![entry("transparent", "wheel.png")];
        let bound = bind_layers(&defs, &test_palette()).unwrap();
        assert_eq!(bound[0].colour, ColourSpec::NoTint);
    }

    #[test]
    fn test_bind_transparent_beats_palette() {
        // Even a palette that defines `transparent` cannot rebind it
        let mut palette = test_palette();
        palette.insert("transparent", ColourSpec::Tint(Rgb::new(1, 2, 3)));

        let defs = vec![entry("transparent", "wheel.png")];
        let bound = bind_layers(&defs, &palette).unwrap();
        assert_eq!(bound[0].colour, ColourSpec::NoTint);
    }

    #[test]
    fn test_bind_missing_variable() {
        let defs = vec![entry("chartreuse", "body.png")];
        let result = bind_layers(&defs, &test_palette());
        assert!(matches!(
            result,
            Err(TintError::MissingColourBinding { variable, .. }) if variable == "chartreuse"
        ));
    }

    #[test]
    fn test_bind_empty_pair() {
        let defs = vec![LayerEntry::new()];
        let result = bind_layers(&defs, &test_palette());
        assert!(matches!(
            result,
            Err(TintError::MalformedLayerDefinition { .. })
        ));
    }

    #[test]
    fn test_bind_multiple_pairs() {
        let mut map = LayerEntry::new();
        map.insert("red".to_string(), PathBuf::from("a.png"));
        map.insert("blue".to_string(), PathBuf::from("b.png"));

        let result = bind_layers(&[map], &test_palette());
        assert!(matches!(
            result,
            Err(TintError::MalformedLayerDefinition { .. })
        ));
    }

    #[test]
    fn test_bind_empty_list_is_ok() {
        // Emptiness is the compositor's EmptyResult concern, not the binder's
        let bound = bind_layers(&[], &test_palette()).unwrap();
        assert!(bound.is_empty());
    }
}
