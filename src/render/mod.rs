//! Rendering module for tint.
//!
//! `imaging` wraps the raster primitives (decode, encode, greyscale,
//! duotone, masked blending) over the `image` crate; `compositor` folds
//! bound layers into a single canvas.

mod compositor;
pub mod imaging;

pub use compositor::{
    composite, premultiply_alpha, unpremultiply_alpha, Composite, Compositor, Layer, RenderConfig,
};
