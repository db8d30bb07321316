//! Remote enhancement service client
//!
//! The service takes a description and answers with named variations, each
//! carrying suggested colors and a personality. It is strictly optional:
//! every error here ends in local synthesis, never in a failed generation.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::request::{GenerationRequest, PixelSize};

/// Error type for an enhancement attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error("enhancement is disabled")]
    Disabled,
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("enhancement service returned HTTP {0}")]
    Status(u16),
    #[error("malformed enhancement response: {0}")]
    Malformed(String),
    #[error("enhancement service asked for fallback: {0}")]
    Fallback(String),
    #[error("enhancement service returned no variations")]
    NoVariations,
}

impl From<reqwest::Error> for EnhanceError {
    fn from(err: reqwest::Error) -> Self {
        EnhanceError::Transport(err.to_string())
    }
}

/// Request body sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub description: String,
    pub pixel_size: PixelSize,
    pub quantity: usize,
}

impl From<&GenerationRequest> for EnhanceRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            description: request.description().to_string(),
            pixel_size: request.pixel_size(),
            quantity: request.quantity(),
        }
    }
}

/// One creature concept suggested by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Suggested main/dark/light/accent/outline colors
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub personality: String,
}

impl Variation {
    /// Description fed to the synthesizer: name, description and personality.
    pub fn prompt(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.personality)
    }
}

/// Response body from the service. Missing fields read as a fallback answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub use_fallback: bool,
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl EnhanceResponse {
    /// Accept the response only if it carries usable variations.
    pub fn into_variations(self) -> Result<Vec<Variation>, EnhanceError> {
        if !self.success || self.use_fallback {
            return Err(EnhanceError::Fallback(
                self.message.unwrap_or_else(|| "no reason given".to_string()),
            ));
        }
        if self.variations.is_empty() {
            return Err(EnhanceError::NoVariations);
        }
        Ok(self.variations)
    }
}

/// Source of enhancement responses.
pub trait Enhancer {
    fn enhance(
        &self,
        request: &EnhanceRequest,
    ) -> impl Future<Output = Result<EnhanceResponse, EnhanceError>> + Send;
}

/// Enhancer that always declines, for offline generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Enhancer for Offline {
    async fn enhance(&self, _request: &EnhanceRequest) -> Result<EnhanceResponse, EnhanceError> {
        Err(EnhanceError::Disabled)
    }
}

/// Enhancer backed by an HTTP endpoint.
///
/// One `POST` per generation with no retry and no client-side timeout: a
/// stalled service stalls the generation until the transport gives up.
#[derive(Debug, Clone)]
pub struct HttpEnhancer {
    client: Client,
    endpoint: String,
}

impl HttpEnhancer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }
}

impl Enhancer for HttpEnhancer {
    async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, EnhanceError> {
        debug!(endpoint = %self.endpoint, "requesting enhancement");
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        if !response.status().is_success() {
            return Err(EnhanceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| EnhanceError::Malformed(e.to_string()))
    }
}
