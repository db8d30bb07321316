//! Creature synthesis: description in, upscaled sprite out
//!
//! ```
//! use pixmon::synth::synthesize;
//!
//! let creature = synthesize("fire dragon", 64, None).unwrap();
//! assert_eq!(creature.image.dimensions(), (64, 64));
//! ```

use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use crate::canvas::{Canvas, MAX_SCALE, RESOLUTION};
use crate::color::ColorError;
use crate::creature::Archetype;
use crate::output::{encode_png, png_data_url, OutputError};
use crate::palette::{select_palette, Palette};
use crate::seed::SeededRandom;

/// Largest sprite side [`synthesize`] accepts.
pub const MAX_TARGET_PX: u32 = RESOLUTION * MAX_SCALE;

/// Error type for a single synthesis
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// An override color could not be parsed
    #[error("invalid palette color: {0}")]
    Palette(#[from] ColorError),
    /// The requested size is larger than any supported upscale
    #[error("sprite size {0}px exceeds the {max}px limit", max = MAX_TARGET_PX)]
    Size(u32),
    /// The finished image could not be encoded
    #[error("failed to encode sprite: {0}")]
    Encode(#[from] OutputError),
}

/// A synthesized creature and everything that determined its look.
#[derive(Debug, Clone)]
pub struct Creature {
    pub seed: u32,
    pub archetype: Archetype,
    pub palette: Palette,
    /// Upscaled sprite, `RESOLUTION * scale` pixels square
    pub image: RgbaImage,
}

impl Creature {
    /// Encode the sprite as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, SynthesisError> {
        Ok(encode_png(&self.image)?)
    }

    /// Encode the sprite as a `data:image/png` URL.
    pub fn to_data_url(&self) -> Result<String, SynthesisError> {
        Ok(png_data_url(&self.image)?)
    }
}

/// Draw the creature for `description` into a fresh logical canvas.
///
/// Three or more `overrides` replace the keyword palette; if any of them is
/// not a valid CSS color the whole synthesis fails.
pub fn render(
    description: &str,
    overrides: Option<&[String]>,
) -> Result<(Canvas, Archetype, Palette, u32), SynthesisError> {
    let rand = SeededRandom::from_description(description);
    let seed = rand.seed();

    let palette = match overrides.and_then(Palette::from_overrides) {
        Some(result) => result?,
        None => select_palette(description, seed, None),
    };
    let archetype = Archetype::from_seed(rand);

    let mut canvas = Canvas::new(RESOLUTION);
    let center = (RESOLUTION / 2) as i32;
    archetype.render(&mut canvas, center, center, &palette, rand);
    debug!(description, seed, %archetype, pixels = canvas.filled(), "rendered creature");

    Ok((canvas, archetype, palette, seed))
}

/// Synthesize the creature for `description`, upscaled for `target_px`.
pub fn synthesize(
    description: &str,
    target_px: u32,
    overrides: Option<&[String]>,
) -> Result<Creature, SynthesisError> {
    if target_px > MAX_TARGET_PX {
        return Err(SynthesisError::Size(target_px));
    }
    let (canvas, archetype, palette, seed) = render(description, overrides)?;
    Ok(Creature { seed, archetype, palette, image: canvas.rasterize(target_px) })
}

/// Synthesize and encode straight to PNG bytes.
pub fn synthesize_png(
    description: &str,
    target_px: u32,
    overrides: Option<&[String]>,
) -> Result<Vec<u8>, SynthesisError> {
    synthesize(description, target_px, overrides)?.to_png()
}
