//! Parsers for tint definition files.
//!
//! Recipes and palettes are plain YAML documents. Parsing maps them onto
//! domain types and nothing more: layer entries stay raw single-entry
//! mappings until `bind_layers` validates them, and palette tokens resolve
//! through the injected named-colour table.

mod palette;
mod recipe;

pub use palette::{parse_palette, PaletteFile};
pub use recipe::{parse_recipe, Recipe};
