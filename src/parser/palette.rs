//! Palette file parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TintError};
use crate::types::{ColourToken, NamedColours, Palette};

/// A palette file before token resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteFile {
    /// Palette name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Variable → token bindings. A null token binds no-tint.
    #[serde(default, alias = "colors")]
    pub colours: BTreeMap<String, Option<ColourToken>>,
}

fn default_name() -> String {
    "palette".to_string()
}

impl PaletteFile {
    /// Load a palette file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read palette: {}", e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| TintError::Parse {
            message: format!("Invalid palette: {}", e),
            help: Some("check the palette's YAML syntax".to_string()),
        })
    }

    /// Resolve every token against `names`, producing a bound palette.
    pub fn resolve(self, names: &NamedColours) -> Result<Palette> {
        Palette::from_tokens(self.name, self.colours, names)
    }
}

/// Parse and resolve a palette from a YAML string.
pub fn parse_palette(content: &str, names: &NamedColours) -> Result<Palette> {
    let file: PaletteFile = serde_yaml::from_str(content).map_err(|e| TintError::Parse {
        message: format!("Invalid palette: {}", e),
        help: Some("check the palette's YAML syntax".to_string()),
    })?;

    file.resolve(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColourSpec, Rgb};

    #[test]
    fn test_parse_mixed_token_forms() {
        let yaml = r##"
name: brand
colours:
  blue: "#0000AA"
  accent: rgb(255, 102, 0)
  glow: [256, 96, 0]
  label: white
  cutout: ~
"##;
        let names = NamedColours::new();
        let palette = parse_palette(yaml, &names).unwrap();

        assert_eq!(palette.name, "brand");
        assert_eq!(
            palette.get("blue"),
            Some(ColourSpec::Tint(Rgb::new(0, 0, 0xAA)))
        );
        assert_eq!(
            palette.get("accent"),
            Some(ColourSpec::Tint(Rgb::new(255, 102, 0)))
        );
        assert_eq!(
            palette.get("glow"),
            Some(ColourSpec::Tint(Rgb::new(256, 96, 0)))
        );
        assert_eq!(
            palette.get("label"),
            Some(ColourSpec::Tint(Rgb::WHITE))
        );
        assert_eq!(palette.get("cutout"), Some(ColourSpec::NoTint));
    }

    #[test]
    fn test_parse_accepts_colors_alias() {
        let yaml = "colors:\n  red: \"#F00\"\n";
        let names = NamedColours::new();
        let palette = parse_palette(yaml, &names).unwrap();

        assert_eq!(palette.name, "palette");
        assert_eq!(
            palette.get("red"),
            Some(ColourSpec::Tint(Rgb::new(255, 0, 0)))
        );
    }

    #[test]
    fn test_parse_bad_token_fails() {
        let yaml = "colours:\n  bad: \"#12345\"\n";
        let names = NamedColours::new();
        let result = parse_palette(yaml, &names);
        assert!(matches!(
            result,
            Err(TintError::InvalidColourFormat { .. })
        ));
    }

    #[test]
    fn test_parse_bad_yaml_fails() {
        let names = NamedColours::new();
        let result = parse_palette(":\n  - nonsense", &names);
        assert!(matches!(result, Err(TintError::Parse { .. })));
    }
}
