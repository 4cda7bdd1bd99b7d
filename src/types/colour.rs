//! Colour specifications and the token resolver.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, TintError};

use super::named::NamedColours;

/// An RGB tint colour.
///
/// Components are 8-bit-range values stored as `u16`: the resolver passes
/// out-of-range components (e.g. 256) through unchanged, and the duotone
/// map saturates when it writes pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    /// Create a new colour from RGB components.
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl From<[u16; 3]> for Rgb {
    fn from([r, g, b]: [u16; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.r <= 255 && self.g <= 255 && self.b <= 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        }
    }
}

/// A resolved colour specification for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourSpec {
    /// Tint the layer to this colour via the duotone map.
    Tint(Rgb),
    /// Do not tint; the layer keeps its original pixel colours.
    NoTint,
}

impl ColourSpec {
    /// Resolve a palette token to a colour specification.
    ///
    /// Recognized forms, in priority order: `#RRGGBB`, `#RGB` (nibble
    /// duplicated), `rgb(...)` with 0-255 integers or percentages,
    /// the literal `transparent`, a name known to `names`, a bare
    /// already-resolved triple. An absent token resolves to [`ColourSpec::NoTint`].
    pub fn resolve(token: Option<&ColourToken>, names: &NamedColours) -> Result<Self> {
        match token {
            None => Ok(Self::NoTint),
            Some(ColourToken::Triple(t)) => Ok(Self::Tint(Rgb::from(*t))),
            Some(ColourToken::Text(s)) => {
                let mut seen = Vec::new();
                resolve_text(s, names, &mut seen)
            }
        }
    }

    /// The resolved tint colour, if any.
    pub fn tint(self) -> Option<Rgb> {
        match self {
            Self::Tint(rgb) => Some(rgb),
            Self::NoTint => None,
        }
    }
}

impl fmt::Display for ColourSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tint(rgb) => rgb.fmt(f),
            Self::NoTint => write!(f, "transparent"),
        }
    }
}

impl Serialize for ColourSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Tint(rgb) => serializer.serialize_str(&rgb.to_string()),
            Self::NoTint => serializer.serialize_none(),
        }
    }
}

/// An unresolved colour value as read from a palette file: either a token
/// string or a bare RGB triple that needs no resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColourToken {
    Triple([u16; 3]),
    Text(String),
}

impl From<&str> for ColourToken {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<[u16; 3]> for ColourToken {
    fn from(t: [u16; 3]) -> Self {
        Self::Triple(t)
    }
}

/// Resolve a textual token, tracking named-colour hops for cycle detection.
fn resolve_text(token: &str, names: &NamedColours, seen: &mut Vec<String>) -> Result<ColourSpec> {
    let token = token.trim();

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(token, hex).map(ColourSpec::Tint);
    }

    if token.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
        return parse_rgb_func(token).map(ColourSpec::Tint);
    }

    if token == "transparent" {
        return Ok(ColourSpec::NoTint);
    }

    let name = token.to_ascii_lowercase();
    if let Some(next) = names.lookup(&name) {
        if seen.iter().any(|s| s == &name) {
            return Err(TintError::InvalidColourFormat {
                token: token.to_string(),
                help: Some("named colours reference each other in a cycle".to_string()),
            });
        }
        seen.push(name);
        return match next {
            ColourToken::Triple(t) => Ok(ColourSpec::Tint(Rgb::from(t))),
            ColourToken::Text(s) => resolve_text(&s, names, seen),
        };
    }

    Err(TintError::InvalidColourFormat {
        token: token.to_string(),
        help: Some(
            "use #RRGGBB, #RGB, rgb(...), a known colour name, or \"transparent\"".to_string(),
        ),
    })
}

/// Parse `#RRGGBB` or `#RGB`. `full` is the original token for error messages.
fn parse_hex(full: &str, hex: &str) -> Result<Rgb> {
    match hex.len() {
        6 => {
            let r = parse_hex_byte(full, &hex[0..2])?;
            let g = parse_hex_byte(full, &hex[2..4])?;
            let b = parse_hex_byte(full, &hex[4..6])?;
            Ok(Rgb::new(r as u16, g as u16, b as u16))
        }
        3 => {
            let mut nibbles = [0u16; 3];
            for (i, c) in hex.chars().enumerate() {
                let n = c.to_digit(16).ok_or_else(|| TintError::InvalidColourFormat {
                    token: full.to_string(),
                    help: Some(format!("`{}` is not a hex digit", c)),
                })?;
                // #F00 expands to #FF0000: each nibble duplicated, i.e. n * 17
                nibbles[i] = n as u16 * 17;
            }
            Ok(Rgb::new(nibbles[0], nibbles[1], nibbles[2]))
        }
        _ => Err(TintError::InvalidColourFormat {
            token: full.to_string(),
            help: Some("hex colours are #RRGGBB or #RGB".to_string()),
        }),
    }
}

fn parse_hex_byte(full: &str, s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| TintError::InvalidColourFormat {
        token: full.to_string(),
        help: Some(format!("`{}` is not a hex byte", s)),
    })
}

/// Parse `rgb(...)` in integer or percentage form.
fn parse_rgb_func(token: &str) -> Result<Rgb> {
    let invalid = |help: &str| TintError::InvalidColourFormat {
        token: token.to_string(),
        help: Some(help.to_string()),
    };

    let args = token[3..]
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| invalid("rgb colours are rgb(r, g, b)"))?;

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid("rgb(...) takes exactly three components"));
    }

    let mut channels = [0u16; 3];
    if args.contains('%') {
        // Percentage triplet: p% maps to floor(p / 100 * 255)
        for (i, part) in parts.iter().enumerate() {
            let p: f64 = part
                .trim_end_matches('%')
                .trim()
                .parse()
                .map_err(|_| invalid("percentage components must be numbers"))?;
            let value = (p / 100.0 * 255.0).floor();
            if !(0.0..=u16::MAX as f64).contains(&value) {
                return Err(invalid("percentage components must not be negative"));
            }
            channels[i] = value as u16;
        }
    } else {
        for (i, part) in parts.iter().enumerate() {
            channels[i] = part
                .parse()
                .map_err(|_| invalid("components must be 0-255 integers or percentages"))?;
        }
    }

    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}
