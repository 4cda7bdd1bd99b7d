//! Palette type: immutable name → colour bindings for a single render.

use std::collections::HashMap;

use crate::error::Result;

use super::colour::{ColourSpec, ColourToken};
use super::named::NamedColours;

/// A collection of named colour bindings.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Palette name
    pub name: String,

    /// Resolved bindings
    colours: HashMap<String, ColourSpec>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: HashMap::new(),
        }
    }

    /// Build a palette by resolving every token against `names`.
    ///
    /// An absent (null) token binds the variable to [`ColourSpec::NoTint`].
    pub fn from_tokens<I, S>(name: impl Into<String>, tokens: I, names: &NamedColours) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Option<ColourToken>)>,
        S: Into<String>,
    {
        let mut palette = Self::new(name);
        for (variable, token) in tokens {
            let spec = ColourSpec::resolve(token.as_ref(), names)?;
            palette.insert(variable, spec);
        }
        Ok(palette)
    }

    /// Get a binding by variable name.
    pub fn get(&self, name: &str) -> Option<ColourSpec> {
        self.colours.get(name).copied()
    }

    /// Insert a resolved binding.
    pub fn insert(&mut self, name: impl Into<String>, spec: ColourSpec) {
        self.colours.insert(name.into(), spec);
    }

    /// Get all variable names, sorted for stable output.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colours.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
