//! Hybrid generation: remote enhancement first, local synthesis always
//!
//! A [`HybridGenerator`] makes one enhancement attempt per request. When the
//! service answers with variations, each variation is synthesized locally
//! with its suggested colors. On any failure, the whole batch is synthesized
//! locally from the description instead. Both paths return the same
//! [`GenerationResult`] shape with `images` and `audios` padded to exactly
//! the requested quantity.

mod remote;
mod request;

pub use remote::{
    EnhanceError, EnhanceRequest, EnhanceResponse, Enhancer, HttpEnhancer, Offline, Variation,
};
pub use request::{
    GenerationMethod, GenerationRequest, GenerationResult, PixelSize, RequestError, MAX_QUANTITY,
};

use tracing::{debug, info, warn};

use crate::audio::{select_audio, AudioClip, AudioLibrary};
use crate::output::{PLACEHOLDER_IMAGE, SILENT_AUDIO};
use crate::palette::batch_colors;
use crate::seed::{hash_description, SeededRandom};
use crate::synth::synthesize;

/// Orchestrates enhancement, synthesis and audio loading for a request.
#[derive(Debug, Clone)]
pub struct HybridGenerator<E> {
    enhancer: E,
    audio: AudioLibrary,
    batch_token: Option<String>,
}

impl HybridGenerator<Offline> {
    /// A generator that never contacts a service.
    pub fn offline(audio: AudioLibrary) -> Self {
        Self::new(Offline, audio)
    }
}

impl<E: Enhancer> HybridGenerator<E> {
    pub fn new(enhancer: E, audio: AudioLibrary) -> Self {
        Self { enhancer, audio, batch_token: None }
    }

    /// Append `token` to every local item's description.
    ///
    /// Without a token, the same description always yields the same batch.
    /// A fresh token per call gives a fresh batch.
    pub fn with_batch_token(mut self, token: impl Into<String>) -> Self {
        self.batch_token = Some(token.into());
        self
    }

    /// Description used for local batch item `index`.
    pub fn item_description(&self, description: &str, index: usize) -> String {
        match &self.batch_token {
            Some(token) => format!("{}#{}{}", description, index, token),
            None => format!("{}#{}", description, index),
        }
    }

    /// Run a request to completion. Never fails; see [`GenerationResult`].
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        info!(
            description = request.description(),
            quantity = request.quantity(),
            size = %request.pixel_size(),
            "generating creatures"
        );

        let attempt = self
            .enhancer
            .enhance(&EnhanceRequest::from(request))
            .await
            .and_then(EnhanceResponse::into_variations);

        match attempt {
            Ok(variations) => {
                info!(count = variations.len(), "enhancement succeeded");
                self.enhanced(request, variations).await
            }
            Err(EnhanceError::Disabled) => {
                debug!("enhancement disabled, synthesizing locally");
                self.local(request).await
            }
            Err(e) => {
                warn!(error = %e, "enhancement unavailable, falling back to local synthesis");
                self.local(request).await
            }
        }
    }

    async fn enhanced(
        &self,
        request: &GenerationRequest,
        variations: Vec<Variation>,
    ) -> GenerationResult {
        let quantity = request.quantity();
        let used = &variations[..quantity.min(variations.len())];

        let mut images = Vec::with_capacity(quantity);
        let mut clips = Vec::with_capacity(quantity);
        let mut failed = Vec::new();
        for (index, variation) in used.iter().enumerate() {
            let prompt = variation.prompt();
            let colors = request.palette_override().or(Some(variation.colors.as_slice()));
            match self.synthesize_item(index, &prompt, request, colors) {
                Some(image) => {
                    debug!(index, name = %variation.name, "variation synthesized");
                    images.push(image);
                }
                None => {
                    failed.push(index);
                    images.push(PLACEHOLDER_IMAGE.to_string());
                }
            }
            clips.push(select_audio(&prompt, hash_description(&prompt)));
        }

        // A failed variation gets the placeholder pair, not a real clip.
        let mut audios = self.audio.load_all(&clips).await;
        for &index in &failed {
            if let Some(slot) = audios.get_mut(index) {
                *slot = SILENT_AUDIO.to_string();
            }
        }
        let synthesized = used.len() - failed.len();
        pad(&mut images, quantity, PLACEHOLDER_IMAGE, "image");
        pad(&mut audios, quantity, SILENT_AUDIO, "audio");

        GenerationResult {
            success: true,
            message: format!("AI-enhanced generation succeeded ({} variations)", synthesized),
            images,
            audios,
            prompt: used.iter().map(|v| v.name.as_str()).collect::<Vec<_>>().join(", "),
            method: GenerationMethod::Enhanced,
            ai_enhanced: true,
            variations,
        }
    }

    async fn local(&self, request: &GenerationRequest) -> GenerationResult {
        let quantity = request.quantity();
        let description = request.description();

        let mut images = Vec::with_capacity(quantity);
        let mut clips: Vec<AudioClip> = Vec::with_capacity(quantity);
        let mut failures = 0;
        for index in 0..quantity {
            let item = self.item_description(description, index);
            let rand = SeededRandom::from_description(&item);
            let colors = match request.palette_override() {
                Some(colors) => colors.to_vec(),
                None => batch_colors(index, rand),
            };
            match self.synthesize_item(index, &item, request, Some(colors.as_slice())) {
                Some(image) => images.push(image),
                None => {
                    failures += 1;
                    images.push(PLACEHOLDER_IMAGE.to_string());
                }
            }
            clips.push(select_audio(&item, rand.seed()));
        }

        if failures == quantity {
            warn!(quantity, "every local synthesis failed");
            return GenerationResult {
                success: false,
                message: "Generation failed: every image failed to synthesize".to_string(),
                images: Vec::new(),
                audios: Vec::new(),
                prompt: description.to_string(),
                method: GenerationMethod::Local,
                ai_enhanced: false,
                variations: Vec::new(),
            };
        }

        let mut audios = self.audio.load_all(&clips).await;
        pad(&mut images, quantity, PLACEHOLDER_IMAGE, "image");
        pad(&mut audios, quantity, SILENT_AUDIO, "audio");

        GenerationResult {
            success: true,
            message: format!("Generated {} creatures", quantity - failures),
            images,
            audios,
            prompt: description.to_string(),
            method: GenerationMethod::Local,
            ai_enhanced: false,
            variations: Vec::new(),
        }
    }

    /// Synthesize one item as a PNG data URL, or `None` after logging why not.
    fn synthesize_item(
        &self,
        index: usize,
        description: &str,
        request: &GenerationRequest,
        colors: Option<&[String]>,
    ) -> Option<String> {
        let result = synthesize(description, request.pixel_size().pixels(), colors)
            .and_then(|creature| creature.to_data_url());
        match result {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(index, error = %e, "synthesis failed, using placeholder");
                None
            }
        }
    }
}

/// Extend `items` with `filler` up to `len`.
fn pad(items: &mut Vec<String>, len: usize, filler: &str, kind: &str) {
    if items.len() < len {
        debug!(kind, have = items.len(), want = len, "padding with placeholders");
        items.resize(len, filler.to_string());
    }
}
