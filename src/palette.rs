//! Creature palettes
//!
//! A [`Palette`] is the fixed eight-color set one creature is painted with.
//! It is picked either from keyword families matched against the description,
//! or positionally from caller-supplied override colors (at least three).

use image::Rgba;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::{hsl, parse_color, ColorError};
use crate::seed::SeededRandom;

/// Fixed eye colors, independent of theme.
pub const WHITE: &str = "#ffffff";
pub const BLACK: &str = "#000000";
pub const EYE_HIGHLIGHT: &str = "#ffffff";

/// Outline used when an override list has no fifth entry.
pub const DEFAULT_OUTLINE: &str = "#2a1810";

/// Minimum number of override colors that replaces keyword selection.
pub const MIN_OVERRIDE_COLORS: usize = 3;

/// One palette entry: the CSS text it was given as, and its parsed RGBA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaletteColor {
    css: String,
    rgba: Rgba<u8>,
}

impl PaletteColor {
    /// Parse and validate a CSS color.
    pub fn parse(css: impl Into<String>) -> Result<Self, ColorError> {
        let css = css.into();
        let rgba = parse_color(&css)?;
        Ok(Self { css, rgba })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn rgba(&self) -> Rgba<u8> {
        self.rgba
    }
}

impl TryFrom<String> for PaletteColor {
    type Error = ColorError;

    fn try_from(css: String) -> Result<Self, Self::Error> {
        Self::parse(css)
    }
}

impl From<PaletteColor> for String {
    fn from(color: PaletteColor) -> Self {
        color.css
    }
}

/// The eight colors used to paint one creature.
///
/// All fields are always populated; `white`, `black` and `eye_highlight` are
/// fixed regardless of theme. Built once per synthesis and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub main: PaletteColor,
    pub dark: PaletteColor,
    pub light: PaletteColor,
    pub accent: PaletteColor,
    pub outline: PaletteColor,
    pub white: PaletteColor,
    pub black: PaletteColor,
    pub eye_highlight: PaletteColor,
}

impl Palette {
    /// Build a palette from the five themed colors, appending the fixed eye colors.
    pub fn new(
        main: &str,
        dark: &str,
        light: &str,
        accent: &str,
        outline: &str,
    ) -> Result<Self, ColorError> {
        Ok(Self {
            main: PaletteColor::parse(main)?,
            dark: PaletteColor::parse(dark)?,
            light: PaletteColor::parse(light)?,
            accent: PaletteColor::parse(accent)?,
            outline: PaletteColor::parse(outline)?,
            white: PaletteColor::parse(WHITE)?,
            black: PaletteColor::parse(BLACK)?,
            eye_highlight: PaletteColor::parse(EYE_HIGHLIGHT)?,
        })
    }

    /// Map override colors positionally onto main/dark/light/accent/outline.
    ///
    /// Accent falls back to main and outline to [`DEFAULT_OUTLINE`]. Fewer than
    /// [`MIN_OVERRIDE_COLORS`] entries is not an override and yields `None`.
    pub fn from_overrides(colors: &[String]) -> Option<Result<Self, ColorError>> {
        if colors.len() < MIN_OVERRIDE_COLORS {
            return None;
        }
        let accent = colors.get(3).unwrap_or(&colors[0]);
        let outline = colors.get(4).map(String::as_str).unwrap_or(DEFAULT_OUTLINE);
        Some(Self::new(&colors[0], &colors[1], &colors[2], accent, outline))
    }

    /// RGBA view used by the renderers.
    pub fn inks(&self) -> Inks {
        Inks {
            main: self.main.rgba(),
            dark: self.dark.rgba(),
            light: self.light.rgba(),
            accent: self.accent.rgba(),
            outline: self.outline.rgba(),
            white: self.white.rgba(),
            black: self.black.rgba(),
            eye_highlight: self.eye_highlight.rgba(),
        }
    }

    /// The five themed colors as CSS strings, in override order.
    pub fn themed_css(&self) -> [String; 5] {
        [
            self.main.css().to_string(),
            self.dark.css().to_string(),
            self.light.css().to_string(),
            self.accent.css().to_string(),
            self.outline.css().to_string(),
        ]
    }
}

/// Resolved RGBA colors of a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inks {
    pub main: Rgba<u8>,
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub white: Rgba<u8>,
    pub black: Rgba<u8>,
    pub eye_highlight: Rgba<u8>,
}

/// Hue family matched from description keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueFamily {
    Fire,
    Slime,
    Ice,
    Shadow,
    Wild,
}

impl HueFamily {
    /// First family whose keywords appear in the lower-cased description.
    pub fn detect(description: &str) -> Self {
        const FAMILIES: &[(HueFamily, &[&str])] = &[
            (HueFamily::Fire, &["fire", "red", "火", "红"]),
            (HueFamily::Slime, &["green", "slime", "绿", "史莱姆"]),
            (HueFamily::Ice, &["blue", "ice", "蓝", "冰"]),
            (HueFamily::Shadow, &["purple", "dark", "紫", "暗"]),
        ];

        let desc = description.to_lowercase();
        FAMILIES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
            .map(|(family, _)| *family)
            .unwrap_or(HueFamily::Wild)
    }
}

/// Select the palette for a description.
///
/// Override colors (three or more) win and ignore the description. Otherwise
/// a keyword family picks the hue band, and the seed picks the exact hue plus
/// a variation index in `0..5` that shifts hue, saturation and lightness
/// together. Invalid override colors are logged and fall back to keyword
/// selection, so this never fails.
pub fn select_palette(description: &str, seed: u32, overrides: Option<&[String]>) -> Palette {
    if let Some(result) = overrides.and_then(Palette::from_overrides) {
        match result {
            Ok(palette) => {
                debug!(colors = ?overrides, "using override palette");
                return palette;
            }
            Err(e) => warn!(error = %e, "ignoring invalid override palette"),
        }
    }

    keyword_palette(HueFamily::detect(description), SeededRandom::new(seed))
}

fn keyword_palette(family: HueFamily, rand: SeededRandom) -> Palette {
    let v = rand.pick(999, 5) as i32;
    let r = rand.roll(0) as i32;

    let [main, dark, light, accent, outline] = match family {
        HueFamily::Fire => {
            let (hs, ss) = (v * 10, v * 5);
            let hue = r % 30 + hs;
            [
                hsl(hue, 75 + ss, 50 + v * 3),
                hsl(hue, 70 + ss, 30 + v * 2),
                hsl(hue, 80 + ss, 70 + v * 2),
                hsl(30 + hs * 2, 70 + ss, 60 + v),
                hsl(r % 30, 50, 10 + v * 2),
            ]
        }
        HueFamily::Slime => {
            let (hs, ss) = (v * 15, v * 4);
            let hue = 90 + r % 70 + hs;
            [
                hsl(hue, 60 + ss, 45 + v * 3),
                hsl(hue, 65 + ss, 25 + v * 2),
                hsl(hue, 70 + ss, 65 + v * 2),
                hsl(140 + r % 40 + hs, 55 + ss, 50 + v),
                hsl(120 + hs, 60, 10 + v * 2),
            ]
        }
        HueFamily::Ice => {
            let (hs, ss) = (v * 12, v * 5);
            let hue = 170 + r % 70 + hs;
            [
                hsl(hue, 65 + ss, 50 + v * 3),
                hsl(hue, 70 + ss, 30 + v * 2),
                hsl(hue, 75 + ss, 70 + v * 2),
                hsl(190 + r % 50 + hs, 60 + ss, 55 + v),
                hsl(200 + hs, 70, 8 + v * 2),
            ]
        }
        HueFamily::Shadow => {
            let (hs, ss) = (v * 18, v * 6);
            let hue = 260 + r % 60 + hs;
            [
                hsl(hue, 55 + ss, 40 + v * 3),
                hsl(hue, 60 + ss, 20 + v * 2),
                hsl(hue, 65 + ss, 60 + v * 2),
                hsl(290 + r % 50 + hs, 50 + ss, 45 + v),
                hsl(280 + hs, 50, 8 + v * 2),
            ]
        }
        HueFamily::Wild => {
            let hue = (r * v * 73) % 360;
            let sat = 60 + rand.pick(100, 30) as i32;
            let lit = 45 + rand.pick(200, 20) as i32;
            [
                hsl(hue, sat, lit),
                hsl(hue, sat + 10, lit - 20),
                hsl(hue, sat + 15, lit + 25),
                hsl(hue + 60 + rand.pick(300, 120) as i32, sat - 5, lit + 10),
                hsl(hue, sat, 10 + v * 2),
            ]
        }
    };

    themed(&main, &dark, &light, &accent, &outline)
}

/// Override colors for item `index` of a local batch.
///
/// Items are spread around the hue wheel 90° apart with seeded jitter, and
/// each gets a main/dark/light/accent/outline ramp around its base hue.
pub fn batch_colors(index: usize, rand: SeededRandom) -> Vec<String> {
    let hue = (index as i32 * 90 + rand.pick(600, 60) as i32) % 360;
    let sat = 65 + rand.pick(601, 20) as i32;
    let lit = 50 + rand.pick(602, 10) as i32;

    vec![
        hsl(hue, sat, lit),
        hsl(hue, (sat + 15).min(95), (lit - 25).max(25)),
        hsl(hue, (sat - 10).max(50), (lit + 25).min(85)),
        hsl(hue + 30, sat, lit + 5),
        hsl(hue, sat, 15),
    ]
}

/// Build a palette from generated `hsl()` strings, which always parse.
fn themed(main: &str, dark: &str, light: &str, accent: &str, outline: &str) -> Palette {
    match Palette::new(main, dark, light, accent, outline) {
        Ok(palette) => palette,
        Err(e) => {
            // hsl() output is always valid CSS; keep a usable palette regardless.
            warn!(error = %e, "generated palette failed to parse, using neutral palette");
            neutral_palette()
        }
    }
}

fn neutral_palette() -> Palette {
    let gray = |hex: &'static str| PaletteColor {
        css: hex.to_string(),
        rgba: parse_color(hex).unwrap_or(Rgba([128, 128, 128, 255])),
    };
    Palette {
        main: gray("#8a8a8a"),
        dark: gray("#4a4a4a"),
        light: gray("#c8c8c8"),
        accent: gray("#a0a0a0"),
        outline: gray("#1a1a1a"),
        white: gray(WHITE),
        black: gray(BLACK),
        eye_highlight: gray(EYE_HIGHLIGHT),
    }
}
