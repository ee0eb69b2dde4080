//! Color types for the drawing kernel
//!
//! Colors cross the command boundary in three accepted forms: hex strings
//! (`#rgb`, `#rrggbb`, `#rrggbbaa`), 3- or 4-component channel tuples, or a
//! single gray intensity integer. All of them normalize to the 4-channel
//! [`Rgba`] representation used for comparisons, and back to a canonical hex
//! form when stored on baked fill shapes.
//!
//! # Examples
//!
//! ```
//! use drawkit::{ColorInput, Rgba};
//!
//! let from_hex = ColorInput::Hex("#FF8000".to_string()).resolve().unwrap();
//! let from_tuple = ColorInput::Channels3(255, 128, 0).resolve().unwrap();
//! assert_eq!(from_hex, from_tuple);
//! assert_eq!(from_hex.to_hex(), "#ff8000");
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// RGBA color in normalized 4-channel form
///
/// All channels are 0-255; alpha 255 is fully opaque. Equality used by the
/// fill algorithms is tolerance-based, see [`Rgba::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0 = transparent, 255 = opaque)
  pub a: u8,
}

impl Rgba {
  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
  };

  /// Opaque red, the default pen color
  pub const RED: Self = Self {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
  };

  /// Creates a new opaque color
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Creates a new color with an explicit alpha channel
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Tolerance-based equality
  ///
  /// Two colors match when every channel difference is at most `tol`.
  /// `tol == 0` is exact equality.
  ///
  /// # Examples
  ///
  /// ```
  /// use drawkit::Rgba;
  ///
  /// let a = Rgba::rgb(100, 100, 100);
  /// let b = Rgba::rgb(104, 98, 100);
  /// assert!(a.matches(b, 4));
  /// assert!(!a.matches(b, 3));
  /// ```
  pub fn matches(self, other: Rgba, tol: u8) -> bool {
    self.r.abs_diff(other.r) <= tol
      && self.g.abs_diff(other.g) <= tol
      && self.b.abs_diff(other.b) <= tol
      && self.a.abs_diff(other.a) <= tol
  }

  /// Canonical hex form: `#rrggbb` when opaque, `#rrggbbaa` otherwise
  pub fn to_hex(self) -> String {
    if self.a == 255 {
      format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    } else {
      format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
  }

  /// Parses a hex color string (`#rgb`, `#rrggbb` or `#rrggbbaa`)
  pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
    let hex = s
      .strip_prefix('#')
      .ok_or_else(|| ColorParseError::InvalidHex(s.to_string()))?;
    let invalid = || ColorParseError::InvalidHex(s.to_string());
    if !hex.is_ascii() {
      return Err(invalid());
    }

    let (r, g, b, a) = match hex.len() {
      3 => {
        // #rgb -> #rrggbb
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).map_err(|_| invalid())?;
        (r, g, b, 255)
      }
      6 => {
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
        (r, g, b, 255)
      }
      8 => {
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
        let a = u8::from_str_radix(&hex[6..8], 16).map_err(|_| invalid())?;
        (r, g, b, a)
      }
      _ => return Err(invalid()),
    };

    Ok(Self { r, g, b, a })
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl Serialize for Rgba {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

/// A color as accepted at the command boundary
///
/// Resolved to [`Rgba`] before any scene mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
  /// Hex string, e.g. `"#ff0000"`
  Hex(String),
  /// Opaque (r, g, b) channel tuple
  Channels3(u8, u8, u8),
  /// (r, g, b, a) channel tuple
  Channels4(u8, u8, u8, u8),
  /// Single gray intensity
  Intensity(u8),
}

impl ColorInput {
  /// Normalizes this input to the 4-channel representation
  pub fn resolve(&self) -> Result<Rgba, ColorParseError> {
    match self {
      ColorInput::Hex(s) => Rgba::parse_hex(s),
      ColorInput::Channels3(r, g, b) => Ok(Rgba::rgb(*r, *g, *b)),
      ColorInput::Channels4(r, g, b, a) => Ok(Rgba::new(*r, *g, *b, *a)),
      ColorInput::Intensity(v) => Ok(Rgba::rgb(*v, *v, *v)),
    }
  }
}

impl From<Rgba> for ColorInput {
  fn from(c: Rgba) -> Self {
    ColorInput::Channels4(c.r, c.g, c.b, c.a)
  }
}

/// Error produced when a color input cannot be normalized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
  /// The hex string is malformed or has an unsupported length
  #[error("invalid hex color: {0}")]
  InvalidHex(String),
}
