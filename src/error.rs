use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tint operations
#[derive(Error, Diagnostic, Debug)]
pub enum TintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {}: {}", path.display(), message)]
    #[diagnostic(code(tint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tint::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unrecognized colour `{token}`")]
    #[diagnostic(code(tint::colour::format))]
    InvalidColourFormat {
        token: String,
        #[help]
        help: Option<String>,
    },

    #[error("No colour bound for variable `{variable}`")]
    #[diagnostic(code(tint::colour::binding))]
    MissingColourBinding {
        variable: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed layer definition: {message}")]
    #[diagnostic(code(tint::layer))]
    MalformedLayerDefinition {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Layer `{label}` is {found_w}x{found_h} but the canvas is {expected_w}x{expected_h}")]
    #[diagnostic(code(tint::render::dimensions))]
    DimensionMismatch {
        label: String,
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },

    #[error("Nothing to composite: the layer list is empty")]
    #[diagnostic(code(tint::render::empty))]
    EmptyResult,

    #[error("Cannot {operation} a raster without an alpha channel")]
    #[diagnostic(code(tint::render::pixel_format))]
    UnsupportedPixelFormat { operation: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(tint::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TintError>;
