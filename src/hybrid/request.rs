//! Generation request and result types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::remote::Variation;

/// Largest batch a single request may ask for.
pub const MAX_QUANTITY: u8 = 4;

/// Allowed override palette sizes.
const OVERRIDE_COLORS: std::ops::RangeInclusive<usize> = 3..=5;

/// Error type for request validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("quantity must be between 1 and 4, got {0}")]
    Quantity(u8),
    #[error("unsupported pixel size '{0}' (expected 32px, 64px or 128px)")]
    PixelSize(String),
    #[error("palette override needs 3 to 5 colors, got {0}")]
    PaletteSize(usize),
}

/// Output sprite size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelSize {
    #[serde(rename = "32px")]
    Px32,
    #[default]
    #[serde(rename = "64px")]
    Px64,
    #[serde(rename = "128px")]
    Px128,
}

impl PixelSize {
    pub fn pixels(self) -> u32 {
        match self {
            PixelSize::Px32 => 32,
            PixelSize::Px64 => 64,
            PixelSize::Px128 => 128,
        }
    }

    pub fn from_pixels(pixels: u32) -> Result<Self, RequestError> {
        match pixels {
            32 => Ok(PixelSize::Px32),
            64 => Ok(PixelSize::Px64),
            128 => Ok(PixelSize::Px128),
            other => Err(RequestError::PixelSize(other.to_string())),
        }
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.pixels())
    }
}

/// Accepts `64` and `64px`.
impl FromStr for PixelSize {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map_err(|_| RequestError::PixelSize(s.to_string()))
            .and_then(Self::from_pixels)
    }
}

/// A validated request for a batch of creatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    description: String,
    pixel_size: PixelSize,
    quantity: u8,
    palette_override: Option<Vec<String>>,
}

impl GenerationRequest {
    /// Validate and build a request. The description is trimmed.
    pub fn new(
        description: impl Into<String>,
        pixel_size: PixelSize,
        quantity: u8,
    ) -> Result<Self, RequestError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(RequestError::EmptyDescription);
        }
        if quantity == 0 || quantity > MAX_QUANTITY {
            return Err(RequestError::Quantity(quantity));
        }
        Ok(Self { description, pixel_size, quantity, palette_override: None })
    }

    /// Attach a caller-level palette that wins on every path.
    pub fn with_palette(mut self, colors: Vec<String>) -> Result<Self, RequestError> {
        if !OVERRIDE_COLORS.contains(&colors.len()) {
            return Err(RequestError::PaletteSize(colors.len()));
        }
        self.palette_override = Some(colors);
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pixel_size(&self) -> PixelSize {
        self.pixel_size
    }

    pub fn quantity(&self) -> usize {
        usize::from(self.quantity)
    }

    pub fn palette_override(&self) -> Option<&[String]> {
        self.palette_override.as_deref()
    }
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMethod {
    #[serde(rename = "AI-Enhanced + Local Pixel Art")]
    Enhanced,
    #[serde(rename = "Local Fake AI Generator (Fallback)")]
    Local,
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationMethod::Enhanced => "AI-Enhanced + Local Pixel Art",
            GenerationMethod::Local => "Local Fake AI Generator (Fallback)",
        })
    }
}

/// Uniform output of a generation, whichever path ran.
///
/// On success `images` and `audios` are exactly `quantity` long; on failure
/// both are empty and `message` says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub message: String,
    /// `data:image/png` URLs
    pub images: Vec<String>,
    /// `data:audio/wav` URLs
    pub audios: Vec<String>,
    pub prompt: String,
    pub method: GenerationMethod,
    pub ai_enhanced: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_description() {
        assert_eq!(
            GenerationRequest::new("   ", PixelSize::Px64, 1),
            Err(RequestError::EmptyDescription)
        );
    }

    #[test]
    fn test_request_quantity_bounds() {
        assert_eq!(
            GenerationRequest::new("bat", PixelSize::Px64, 0),
            Err(RequestError::Quantity(0))
        );
        assert_eq!(
            GenerationRequest::new("bat", PixelSize::Px64, 5),
            Err(RequestError::Quantity(5))
        );
        for q in 1..=MAX_QUANTITY {
            let request = GenerationRequest::new(" bat ", PixelSize::Px64, q).unwrap();
            assert_eq!(request.quantity(), usize::from(q));
            assert_eq!(request.description(), "bat");
        }
    }

    #[test]
    fn test_request_palette_size() {
        let request = GenerationRequest::new("bat", PixelSize::Px32, 2).unwrap();
        let two = vec!["#fff".to_string(); 2];
        assert_eq!(request.clone().with_palette(two), Err(RequestError::PaletteSize(2)));
        let four = vec!["#fff".to_string(); 4];
        let request = request.with_palette(four).unwrap();
        assert_eq!(request.palette_override().map(<[String]>::len), Some(4));
    }

    #[test]
    fn test_pixel_size_parse() {
        assert_eq!("64px".parse::<PixelSize>(), Ok(PixelSize::Px64));
        assert_eq!("128".parse::<PixelSize>(), Ok(PixelSize::Px128));
        assert_eq!(" 32px ".parse::<PixelSize>(), Ok(PixelSize::Px32));
        assert_eq!("48px".parse::<PixelSize>(), Err(RequestError::PixelSize("48".to_string())));
        assert!("big".parse::<PixelSize>().is_err());
    }

    #[test]
    fn test_pixel_size_wire_format() {
        assert_eq!(serde_json::to_string(&PixelSize::Px64).unwrap(), "\"64px\"");
        assert_eq!(PixelSize::Px128.to_string(), "128px");
    }

    #[test]
    fn test_result_wire_names() {
        let result = GenerationResult {
            success: true,
            message: "ok".to_string(),
            images: vec![],
            audios: vec![],
            prompt: "bat".to_string(),
            method: GenerationMethod::Local,
            ai_enhanced: false,
            variations: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["aiEnhanced"], false);
        assert_eq!(json["method"], "Local Fake AI Generator (Fallback)");
        assert!(json.get("variations").is_none());
    }
}
