//! CSS color strings for creature palettes
//!
//! Palettes are carried as CSS text (`#rrggbb` or `hsl(h, s%, l%)`) because
//! that is what the enhancement service returns and what gets serialized back
//! to callers. Drawing needs RGBA, so every palette entry goes through
//! [`parse_color`] once when the palette is built.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex colors (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) take a fast path;
/// everything else (`hsl()`, `rgb()`, named colors) is handed to lightningcss.
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use pixmon::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("hsl(120, 100%, 50%)").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert!(parse_color("not-a-color").is_err());
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_css(s),
    }
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255])),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

fn parse_css(s: &str) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse(format!("cannot convert '{}' to RGB", s)))?;

    match rgb {
        CssColor::RGBA(c) => Ok(Rgba([c.red, c.green, c.blue, c.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(c) => Ok(Rgba([
                unit_to_byte(c.r),
                unit_to_byte(c.g),
                unit_to_byte(c.b),
                unit_to_byte(c.alpha),
            ])),
            _ => Err(ColorError::CssParse(format!("unexpected color space for '{}'", s))),
        },
        _ => Err(ColorError::CssParse(format!("'{}' did not resolve to RGB", s))),
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format an `hsl()` color string.
///
/// Hue wraps into `0..360`; saturation and lightness clamp to `0..=100`.
///
/// ```
/// use pixmon::color::hsl;
///
/// assert_eq!(hsl(400, 120, -5), "hsl(40, 100%, 0%)");
/// ```
pub fn hsl(hue: i32, saturation: i32, lightness: i32) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        hue.rem_euclid(360),
        saturation.clamp(0, 100),
        lightness.clamp(0, 100)
    )
}
