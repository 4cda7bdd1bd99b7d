//! Render-free validation for recipes.

mod checks;
mod diagnostic;

pub use checks::validate_recipe;
pub use diagnostic::{Diagnostic, Severity, ValidationResult};
