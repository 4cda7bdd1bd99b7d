//! Layer compositor: folds bound layers, in paint order, into one canvas.
//!
//! Each layer is decoded, optionally duotone-tinted, and blended onto the
//! accumulating canvas through its alpha mask. While the canvas carries an
//! alpha channel its colour channels are kept premultiplied; finalization
//! converts back to straight alpha for standard encoders.

use std::path::PathBuf;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::error::{Result, TintError};
use crate::types::{BoundLayer, ColourSpec, Rgb};
use crate::validation::Diagnostic;

use super::imaging;

/// Immutable configuration for one render job.
///
/// The recipe's constants (source location, output name, format) arrive
/// here as plain data; nothing about a render is decided anywhere else.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Directory layer source references are resolved against.
    pub source_dir: PathBuf,
    /// Output file path.
    pub output: PathBuf,
    /// Output encoding format.
    pub format: ImageFormat,
}

/// A decoded layer ready for the fold.
#[derive(Debug)]
pub struct Layer {
    /// Resolved colour specification.
    pub colour: ColourSpec,
    /// Decoded source raster.
    pub image: DynamicImage,
    /// Label used in warnings (usually the source filename).
    pub label: String,
}

impl Layer {
    pub fn new(colour: ColourSpec, image: DynamicImage, label: impl Into<String>) -> Self {
        Self {
            colour,
            image,
            label: label.into(),
        }
    }
}

/// The finished composite.
#[derive(Debug)]
pub struct Composite {
    /// The final raster, straight-alpha when a transparency channel exists.
    pub image: DynamicImage,
    /// Screen-fold of every alpha mask seen; not consumed by blending.
    pub coverage: Option<GrayImage>,
    /// Non-fatal diagnostics collected during the fold.
    pub warnings: Vec<Diagnostic>,
}

impl Composite {
    /// Mean coverage as a fraction in 0.0..=1.0, when any mask was seen.
    pub fn coverage_ratio(&self) -> Option<f64> {
        let coverage = self.coverage.as_ref()?;
        let total: u64 = coverage.pixels().map(|p| p.0[0] as u64).sum();
        let count = (coverage.width() as u64) * (coverage.height() as u64);
        if count == 0 {
            return None;
        }
        Some(total as f64 / (count as f64 * 255.0))
    }
}

/// The accumulating canvas. RGB until a masked layer introduces
/// transparency; RGBA (premultiplied) afterwards.
enum Canvas {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Canvas {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Canvas::Rgb(img) => img.dimensions(),
            Canvas::Rgba(img) => img.dimensions(),
        }
    }
}

/// Fold state carried across layers.
struct Fold {
    canvas: Option<Canvas>,
    coverage: Option<GrayImage>,
    warnings: Vec<Diagnostic>,
    index: usize,
}

impl Fold {
    fn new() -> Self {
        Self {
            canvas: None,
            coverage: None,
            warnings: Vec::new(),
            index: 0,
        }
    }

    fn push(&mut self, layer: Layer) -> Result<()> {
        let Layer {
            colour,
            image,
            label,
        } = layer;

        if let Some(canvas) = &self.canvas {
            let (expected_w, expected_h) = canvas.dimensions();
            let (found_w, found_h) = (image.width(), image.height());
            if (found_w, found_h) != (expected_w, expected_h) {
                return Err(TintError::DimensionMismatch {
                    label,
                    expected_w,
                    expected_h,
                    found_w,
                    found_h,
                });
            }
        }

        let alpha = imaging::alpha_channel(&image);

        if alpha.is_none() && self.index > 0 {
            self.warnings.push(Diagnostic::warning(
                "tint::render::opaque-layer",
                format!(
                    "non-background layer `{}` has no alpha channel and hides everything beneath it",
                    label
                ),
            ));
        }

        if let Some(mask) = &alpha {
            self.coverage = Some(match self.coverage.take() {
                None => mask.clone(),
                Some(previous) => imaging::screen(&previous, mask),
            });
        }

        let top: RgbImage = match colour {
            ColourSpec::Tint(tint) => {
                let grey = imaging::to_greyscale(&image);
                imaging::duotone(&grey, tint, Rgb::WHITE)
            }
            ColourSpec::NoTint => image.to_rgb8(),
        };

        self.canvas = Some(match alpha {
            // No mask: full overwrite, prior content discarded.
            None => Canvas::Rgb(top),
            Some(mask) => match self.canvas.take() {
                None => Canvas::Rgba(begin_masked(top, &mask)),
                Some(existing) => blend_over(existing, &top, &mask),
            },
        });

        self.index += 1;
        Ok(())
    }

    fn finish(self) -> Result<Composite> {
        let canvas = self.canvas.ok_or(TintError::EmptyResult)?;

        let image = match canvas {
            Canvas::Rgb(rgb) => DynamicImage::ImageRgb8(rgb),
            Canvas::Rgba(mut rgba) => {
                unpremultiply_in_place(&mut rgba);
                DynamicImage::ImageRgba8(rgba)
            }
        };

        Ok(Composite {
            image,
            coverage: self.coverage,
            warnings: self.warnings,
        })
    }
}

/// Composite already-decoded layers, left to right.
pub fn composite(layers: impl IntoIterator<Item = Layer>) -> Result<Composite> {
    let mut fold = Fold::new();
    for layer in layers {
        fold.push(layer)?;
    }
    fold.finish()
}

/// Start an alpha-carrying canvas: attach the mask and premultiply.
fn begin_masked(top: RgbImage, mask: &GrayImage) -> RgbaImage {
    let mut canvas = RgbaImage::new(top.width(), top.height());
    for ((dst, src), m) in canvas.pixels_mut().zip(top.pixels()).zip(mask.pixels()) {
        dst.0 = [src.0[0], src.0[1], src.0[2], m.0[0]];
    }
    premultiply_in_place(&mut canvas);
    canvas
}

/// Blend `top` over the canvas through `mask`. The canvas's alpha channel
/// is not re-derived mid-stack; only colour channels change.
fn blend_over(existing: Canvas, top: &RgbImage, mask: &GrayImage) -> Canvas {
    match existing {
        Canvas::Rgb(bottom) => Canvas::Rgb(imaging::alpha_composite(top, &bottom, mask)),
        Canvas::Rgba(mut bottom) => {
            for ((dst, src), m) in bottom.pixels_mut().zip(top.pixels()).zip(mask.pixels()) {
                let a = m.0[0] as u32;
                for c in 0..3 {
                    let v = (src.0[c] as u32 * a + dst.0[c] as u32 * (255 - a)) / 255;
                    dst.0[c] = v as u8;
                }
            }
            Canvas::Rgba(bottom)
        }
    }
}

/// PREMULTIPLY pass: `c' = c * a / 255` per colour channel (floor division).
fn premultiply_in_place(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        let a = px.0[3] as u32;
        for c in 0..3 {
            px.0[c] = (px.0[c] as u32 * a / 255) as u8;
        }
    }
}

/// UNPREMULTIPLY pass: for a > 0, `c' = (c * 255 + a/2) / a` (rounded,
/// saturated); a == 0 pixels are left untouched.
fn unpremultiply_in_place(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        let a = px.0[3] as u32;
        if a == 0 {
            continue;
        }
        for c in 0..3 {
            let v = (px.0[c] as u32 * 255 + a / 2) / a;
            px.0[c] = v.min(255) as u8;
        }
    }
}

/// Premultiply a raster's colour channels by its alpha.
///
/// Fails with [`TintError::UnsupportedPixelFormat`] unless the raster is
/// 8-bit RGBA; this never silently no-ops on alpha-less input.
pub fn premultiply_alpha(image: &DynamicImage) -> Result<RgbaImage> {
    match image {
        DynamicImage::ImageRgba8(rgba) => {
            let mut out = rgba.clone();
            premultiply_in_place(&mut out);
            Ok(out)
        }
        _ => Err(TintError::UnsupportedPixelFormat {
            operation: "premultiply".to_string(),
        }),
    }
}

/// Reverse a premultiplied raster to straight alpha.
///
/// Same format contract as [`premultiply_alpha`].
pub fn unpremultiply_alpha(image: &DynamicImage) -> Result<RgbaImage> {
    match image {
        DynamicImage::ImageRgba8(rgba) => {
            let mut out = rgba.clone();
            unpremultiply_in_place(&mut out);
            Ok(out)
        }
        _ => Err(TintError::UnsupportedPixelFormat {
            operation: "unpremultiply".to_string(),
        }),
    }
}

/// Renders bound layers against an immutable [`RenderConfig`].
pub struct Compositor {
    config: RenderConfig,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Decode and fold the bound layers. Decoding is lazy: one source
    /// raster is in flight at a time and dropped once it has contributed.
    pub fn render(&self, layers: &[BoundLayer]) -> Result<Composite> {
        let mut fold = Fold::new();
        for bound in layers {
            let path = self.config.source_dir.join(&bound.source);
            let image = imaging::decode(&path)?;
            let label = bound.source.display().to_string();
            fold.push(Layer::new(bound.colour, image, label))?;
        }
        fold.finish()
    }

    /// Render and encode. Encoding happens only once the canvas is fully
    /// formed, so a failed render never persists partial output.
    pub fn run(&self, layers: &[BoundLayer]) -> Result<Composite> {
        let composite = self.render(layers)?;
        imaging::encode(&composite.image, &self.config.output, self.config.format)?;
        Ok(composite)
    }
}
