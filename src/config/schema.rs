//! Configuration schema types for `pixmon.toml`
//!
//! Defines the structure and validation rules for pixmon configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio::DEFAULT_ASSET_ROOT;

/// Sprite sizes a request may ask for
pub const PIXEL_SIZES: [u32; 3] = [32, 64, 128];

/// Remote enhancement settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementConfig {
    /// Service URL; absent means local synthesis only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Master switch for the remote attempt
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self { endpoint: None, enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Sound effect settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Directory holding the clip files
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { asset_root: default_asset_root() }
    }
}

fn default_asset_root() -> PathBuf {
    PathBuf::from(DEFAULT_ASSET_ROOT)
}

/// Defaults for requests that don't say otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output sprite size in pixels
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,
    /// Creatures per request
    #[serde(default = "default_quantity")]
    pub quantity: u8,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { pixel_size: default_pixel_size(), quantity: default_quantity() }
    }
}

fn default_pixel_size() -> u32 {
    64
}

fn default_quantity() -> u8 {
    4
}

/// Complete pixmon.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixmonConfig {
    #[serde(default)]
    pub enhancement: EnhancementConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.quantity")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pixmon.toml: '{}' {}", self.field, self.message)
    }
}

impl PixmonConfig {
    /// Validate the configuration and return every problem found
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(endpoint) = &self.enhancement.endpoint {
            if endpoint.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: "enhancement.endpoint".to_string(),
                    message: "must be a non-empty URL when present".to_string(),
                });
            }
        }

        if self.audio.asset_root.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "audio.asset_root".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if !PIXEL_SIZES.contains(&self.defaults.pixel_size) {
            errors.push(ConfigValidationError {
                field: "defaults.pixel_size".to_string(),
                message: "must be one of 32, 64 or 128".to_string(),
            });
        }

        if !(1..=4).contains(&self.defaults.quantity) {
            errors.push(ConfigValidationError {
                field: "defaults.quantity".to_string(),
                message: "must be between 1 and 4".to_string(),
            });
        }

        errors
    }

    /// Endpoint to contact, if enhancement is configured and switched on.
    pub fn enhancement_endpoint(&self) -> Option<&str> {
        if !self.enhancement.enabled {
            return None;
        }
        self.enhancement.endpoint.as_deref().filter(|e| !e.trim().is_empty())
    }
}
