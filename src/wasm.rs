//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings for synthesizing creatures in the browser.
//! Only the synchronous synthesizer is exposed; enhancement and audio
//! loading belong to the host page.

use wasm_bindgen::prelude::*;

use crate::palette::select_palette;
use crate::seed::hash_description;
use crate::synth::synthesize;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of synthesizing a creature to RGBA pixels.
#[wasm_bindgen]
pub struct SynthResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    archetype: String,
    error: Option<String>,
}

#[wasm_bindgen]
impl SynthResult {
    /// Width of the sprite in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the sprite in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Body plan name: slime, legged, floating or winged
    #[wasm_bindgen(getter)]
    pub fn archetype(&self) -> String {
        self.archetype.clone()
    }

    /// Why synthesis failed, if it did
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

fn overrides(colors: &[String]) -> Option<&[String]> {
    (!colors.is_empty()).then_some(colors)
}

/// Synthesize a creature to PNG bytes.
///
/// `colors` is an optional 3-5 entry palette override; pass an empty array
/// for the keyword palette. Returns an empty array on failure.
#[wasm_bindgen]
pub fn synthesize_png(description: &str, size: u32, colors: Vec<String>) -> Vec<u8> {
    synthesize(description, size, overrides(&colors))
        .and_then(|creature| creature.to_png())
        .unwrap_or_default()
}

/// Synthesize a creature to raw RGBA pixels.
#[wasm_bindgen]
pub fn synthesize_rgba(description: &str, size: u32, colors: Vec<String>) -> SynthResult {
    match synthesize(description, size, overrides(&colors)) {
        Ok(creature) => SynthResult {
            width: creature.image.width(),
            height: creature.image.height(),
            archetype: creature.archetype.to_string(),
            pixels: creature.image.into_raw(),
            error: None,
        },
        Err(e) => SynthResult {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            archetype: String::new(),
            error: Some(e.to_string()),
        },
    }
}

/// The palette a description maps to, as JSON.
#[wasm_bindgen]
pub fn palette_json(description: &str) -> String {
    let palette = select_palette(description, hash_description(description), None);
    serde_json::to_string(&palette).unwrap_or_default()
}
