//! Core domain types for tint.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Rgb` / `ColourSpec` - resolved tint colours (or the no-tint sentinel)
//! - `ColourToken` - unresolved palette values and the resolver
//! - `NamedColours` - injected named-colour lookup
//! - `Palette` - immutable name → colour bindings for one render
//! - `LayerEntry` / `BoundLayer` - layer definitions and binding

mod colour;
mod layer;
mod named;
mod palette;

pub use colour::{ColourSpec, ColourToken, Rgb};
pub use layer::{bind_layers, BoundLayer, LayerEntry};
pub use named::NamedColours;
pub use palette::Palette;
