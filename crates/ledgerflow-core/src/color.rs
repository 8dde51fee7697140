//! Color handling for Ledgerflow charts
//!
//! Two representations are used:
//!
//! - [`Color`] wraps the `DynamicColor` type from the color crate and accepts
//!   any CSS color string (`"white"`, `"#333"`, `"rgb(0, 0, 0)"`). Style
//!   settings such as the background and font colors use it.
//! - [`Rgba`] holds 8-bit channels plus an alpha value. Palette entries are
//!   parsed into it with [`hex_to_rgba`], and every fill written to SVG goes
//!   through it.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use thiserror::Error;

/// Errors raised while parsing colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color `{0}`: expected exactly 6 hex digits after an optional `#`")]
    InvalidHex(String),

    #[error("invalid color `{input}`: {reason}")]
    InvalidCss { input: String, reason: String },
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledgerflow_core::color::Color;
    ///
    /// let white = Color::new("white").unwrap();
    /// assert_eq!(white.to_rgba().red(), 255);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError::InvalidCss {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Converts this color to 8-bit sRGB channels.
    pub fn to_rgba(self) -> Rgba {
        let rgba8 = self.color.to_alpha_color::<Srgb>().to_rgba8();
        Rgba::new(rgba8.r, rgba8.g, rgba8.b, self.alpha())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            color: DynamicColor::from_str("black").expect("'black' is a valid CSS color"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

/// An sRGB color with 8-bit channels and a fractional alpha.
///
/// Displays in CSS functional notation, e.g. `rgba(192, 57, 43, 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    red: u8,
    green: u8,
    blue: u8,
    alpha: f32,
}

impl Rgba {
    pub fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn red(self) -> u8 {
        self.red
    }

    pub fn green(self) -> u8 {
        self.green
    }

    pub fn blue(self) -> u8 {
        self.blue
    }

    pub fn alpha(self) -> f32 {
        self.alpha
    }

    /// Returns the `(red, green, blue)` channel triple.
    pub fn channels(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Opaque `rgb(r, g, b)` form, paired with a separate opacity attribute in SVG.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// Parses a `#RRGGBB` (or bare `RRGGBB`) hex color and attaches `alpha`.
///
/// One leading `#` is stripped. The remainder must be exactly six ASCII hex
/// digits; anything else is rejected.
///
/// # Examples
///
/// ```
/// use ledgerflow_core::color::hex_to_rgba;
///
/// let blue = hex_to_rgba("#4A90D9", 0.5).unwrap();
/// assert_eq!(blue.channels(), (74, 144, 217));
/// assert_eq!(blue.to_string(), "rgba(74, 144, 217, 0.5)");
///
/// assert!(hex_to_rgba("#4A90D", 0.5).is_err());
/// ```
pub fn hex_to_rgba(hex: &str, alpha: f32) -> Result<Rgba, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    Ok(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, alpha))
}

impl From<&Rgba> for svg::node::Value {
    fn from(rgba: &Rgba) -> Self {
        Self::from(rgba.to_rgb_string())
    }
}
