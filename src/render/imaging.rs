//! Raster primitives over the `image` crate.
//!
//! Everything here honours the same representation: row-major 8-bit
//! channels. The compositor calls these; it reimplements none of them.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

use crate::error::{Result, TintError};
use crate::types::Rgb;

/// Decode a raster from disk.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| TintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to decode image: {}", e),
    })
}

/// Encode a raster to disk in the given format.
pub fn encode(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    image.save_with_format(path, format).map_err(|e| TintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    })
}

/// Resolve the output format from an explicit name or the path extension.
pub fn format_for(path: &Path, name: Option<&str>) -> Result<ImageFormat> {
    match name {
        Some(name) => ImageFormat::from_extension(name).ok_or_else(|| TintError::Parse {
            message: format!("Unknown image format: {}", name),
            help: Some("use a format name like png, jpeg, gif, or bmp".to_string()),
        }),
        None => ImageFormat::from_path(path).map_err(|_| TintError::Parse {
            message: format!("Cannot infer image format from {}", path.display()),
            help: Some("give the output file an extension or set `format:`".to_string()),
        }),
    }
}

/// Extract the transparency channel, if the raster carries one.
pub fn alpha_channel(image: &DynamicImage) -> Option<GrayImage> {
    if !image.color().has_alpha() {
        return None;
    }
    let rgba = image.to_rgba8();
    let mut alpha = GrayImage::new(rgba.width(), rgba.height());
    for (out, px) in alpha.pixels_mut().zip(rgba.pixels()) {
        out.0[0] = px.0[3];
    }
    Some(alpha)
}

/// Convert a raster to its greyscale luminance.
pub fn to_greyscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Map a greyscale raster onto a two-colour gradient: `low` at luminance 0,
/// `high` at luminance 255.
///
/// Channels are interpolated as `low + (high - low) * l / 255` in signed
/// arithmetic and saturated on write, so out-of-range tint components
/// (e.g. 256) degrade to full intensity instead of wrapping.
pub fn duotone(grey: &GrayImage, low: Rgb, high: Rgb) -> RgbImage {
    let lo = [low.r as i32, low.g as i32, low.b as i32];
    let hi = [high.r as i32, high.g as i32, high.b as i32];

    let mut out = RgbImage::new(grey.width(), grey.height());
    for (dst, src) in out.pixels_mut().zip(grey.pixels()) {
        let l = src.0[0] as i32;
        for c in 0..3 {
            let v = lo[c] + (hi[c] - lo[c]) * l / 255;
            dst.0[c] = v.clamp(0, 255) as u8;
        }
    }
    out
}

/// Blend `top` over `bottom` through an opacity mask:
/// `out = (top * a + bottom * (255 - a)) / 255` per channel.
pub fn alpha_composite(top: &RgbImage, bottom: &RgbImage, mask: &GrayImage) -> RgbImage {
    debug_assert_eq!(top.dimensions(), bottom.dimensions());
    debug_assert_eq!(top.dimensions(), mask.dimensions());

    let mut out = RgbImage::new(top.width(), top.height());
    for ((dst, (t, b)), m) in out
        .pixels_mut()
        .zip(top.pixels().zip(bottom.pixels()))
        .zip(mask.pixels())
    {
        let a = m.0[0] as u32;
        for c in 0..3 {
            let v = (t.0[c] as u32 * a + b.0[c] as u32 * (255 - a)) / 255;
            dst.0[c] = v as u8;
        }
    }
    out
}

/// Screen/lighten blend of two masks: `255 - (255 - a)(255 - b) / 255`.
pub fn screen(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let mut out = GrayImage::new(a.width(), a.height());
    for ((dst, pa), pb) in out.pixels_mut().zip(a.pixels()).zip(b.pixels()) {
        let (va, vb) = (pa.0[0] as u32, pb.0[0] as u32);
        dst.0[0] = (255 - (255 - va) * (255 - vb) / 255) as u8;
    }
    out
}
