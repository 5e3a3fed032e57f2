use crate::error::{PdfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color used both on the raster surface and in PDF content streams.
///
/// Components are stored as `0.0..=1.0`. In JSON a color is written as a
/// `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// RGB color (red, green, blue) with values from 0.0 to 1.0
    Rgb(f64, f64, f64),
    /// Grayscale color with value from 0.0 (black) to 1.0 (white)
    Gray(f64),
}

impl Color {
    /// Creates an RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Creates an RGB color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Creates a grayscale color with value clamped to 0.0-1.0.
    pub fn gray(value: f64) -> Self {
        Color::Gray(value.clamp(0.0, 1.0))
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PdfError::EncodingError(format!(
                "expected a #rrggbb color, got '{value}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PdfError::EncodingError(format!("invalid hex color '{value}'")))
        };
        Ok(Color::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    pub fn white() -> Self {
        Color::Gray(1.0)
    }

    /// Returns the color as 8-bit RGB channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match *self {
            Color::Rgb(r, g, b) => [to_byte(r), to_byte(g), to_byte(b)],
            Color::Gray(g) => {
                let v = to_byte(g);
                [v, v, v]
            }
        }
    }

    /// Composites this color at `alpha` over `background`.
    pub fn over(&self, background: Color, alpha: f64) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let [fr, fg, fb] = self.to_rgb8();
        let [br, bg, bb] = background.to_rgb8();
        let mix = |f: u8, b: u8| (f as f64 * alpha + b as f64 * (1.0 - alpha)) / 255.0;
        Color::rgb(mix(fr, br), mix(fg, bg), mix(fb, bb))
    }

    /// PDF operator text for this color, stroking or non-stroking.
    pub(crate) fn pdf_operator(&self, stroking: bool) -> String {
        match (*self, stroking) {
            (Color::Rgb(r, g, b), false) => format!("{r:.3} {g:.3} {b:.3} rg"),
            (Color::Rgb(r, g, b), true) => format!("{r:.3} {g:.3} {b:.3} RG"),
            (Color::Gray(g), false) => format!("{g:.3} g"),
            (Color::Gray(g), true) => format!("{g:.3} G"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl TryFrom<String> for Color {
    type Error = PdfError;

    fn try_from(value: String) -> Result<Self> {
        Color::hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
