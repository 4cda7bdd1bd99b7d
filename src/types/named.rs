//! Named-colour lookup.
//!
//! The compositor never reads a global colour table; callers build a
//! `NamedColours` value and pass it wherever tokens are resolved. Builtin
//! names come from the CSS set shipped by the `palette` crate; custom
//! entries layer on top and may reference any other token form.

use std::collections::HashMap;

use super::colour::ColourToken;

/// Read-only named-colour table.
#[derive(Debug, Clone, Default)]
pub struct NamedColours {
    custom: HashMap<String, ColourToken>,
}

impl NamedColours {
    /// Create a table with only the builtin CSS names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom entry, consuming and returning the table.
    pub fn with(mut self, name: impl Into<String>, token: impl Into<ColourToken>) -> Self {
        self.define(name, token);
        self
    }

    /// Add a custom entry.
    pub fn define(&mut self, name: impl Into<String>, token: impl Into<ColourToken>) {
        self.custom.insert(name.into().to_ascii_lowercase(), token.into());
    }

    /// Look up a name. Custom entries shadow builtin CSS names.
    ///
    /// Builtin hits come back as already-resolved triples; custom hits come
    /// back as whatever token they were defined with and resolve recursively.
    pub fn lookup(&self, name: &str) -> Option<ColourToken> {
        let name = name.to_ascii_lowercase();
        if let Some(token) = self.custom.get(&name) {
            return Some(token.clone());
        }
        palette::named::from_str(&name)
            .map(|c| ColourToken::Triple([c.red as u16, c.green as u16, c.blue as u16]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_css_names() {
        let names = NamedColours::new();
        assert_eq!(names.lookup("red"), Some(ColourToken::Triple([255, 0, 0])));
        assert_eq!(
            names.lookup("white"),
            Some(ColourToken::Triple([255, 255, 255]))
        );
        assert_eq!(names.lookup("no-such-colour"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let names = NamedColours::new();
        assert_eq!(names.lookup("RED"), names.lookup("red"));
    }

    #[test]
    fn test_custom_shadows_builtin() {
        let names = NamedColours::new().with("red", "#AA0000");
        assert_eq!(names.lookup("red"), Some(ColourToken::from("#AA0000")));
    }

    #[test]
    fn test_custom_triple_entry() {
        let names = NamedColours::new().with("glow", [256, 96, 0]);
        assert_eq!(names.lookup("glow"), Some(ColourToken::Triple([256, 96, 0])));
    }
}
