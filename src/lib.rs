//! Pixmon - Procedural pixel monsters from a text description
//!
//! This library provides functionality to:
//! - Derive a deterministic seed, palette and body plan from a description
//! - Paint one of four creature archetypes into a 32×32 canvas and upscale it
//! - Pair each creature with a keyword-matched sound effect
//! - Orchestrate a remote enhancement attempt with guaranteed local fallback

pub mod audio;
pub mod canvas;
pub mod color;
pub mod config;
pub mod creature;
pub mod output;
pub mod palette;
pub mod seed;
pub mod synth;

#[cfg(feature = "hybrid")]
pub mod cli;
#[cfg(feature = "hybrid")]
pub mod hybrid;
#[cfg(feature = "wasm")]
pub mod wasm;
