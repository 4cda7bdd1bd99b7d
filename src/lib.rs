//! tint - Stencil layer compositor
//!
//! A library for tinting alpha-masked greyscale stencil layers and
//! sandwiching them, in paint order, into a single finished image.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::find_recipes;
pub use error::{Result, TintError};
pub use parser::{parse_palette, parse_recipe, PaletteFile, Recipe};
pub use render::{
    composite, premultiply_alpha, unpremultiply_alpha, Composite, Compositor, Layer, RenderConfig,
};
pub use types::{
    bind_layers, BoundLayer, ColourSpec, ColourToken, LayerEntry, NamedColours, Palette, Rgb,
};
pub use validation::{validate_recipe, Diagnostic, Severity, ValidationResult};
