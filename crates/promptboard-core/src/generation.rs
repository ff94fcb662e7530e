//! Interface to the external image generator.
//!
//! The core never performs the call itself. It builds a [`GenerationRequest`],
//! the host runs it through an [`ImageGenerator`], and the result comes back
//! as an event.

use crate::items::GenerationType;
use crate::lineage::Lineage;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GenerationError {
    #[error("No image returned by the generator")]
    MissingImage,
    #[error("Generator error: {0}")]
    Backend(String),
}

/// Result type for generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A prompt ready to be sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt as typed by the user.
    pub prompt: String,
    /// Generation type tag.
    pub kind: GenerationType,
    /// Root prompt when iterating on an existing image.
    pub base_prompt: Option<String>,
    /// Lineage of the image being iterated on. Empty for a fresh prompt.
    pub history: Lineage,
}

impl GenerationRequest {
    /// Request for a fresh lineage.
    pub fn new(prompt: impl Into<String>, kind: GenerationType) -> Self {
        Self {
            prompt: prompt.into(),
            kind,
            base_prompt: None,
            history: Lineage::new(),
        }
    }

    /// Iterate on an existing lineage.
    pub fn with_history(mut self, base_prompt: Option<String>, history: Lineage) -> Self {
        self.base_prompt = base_prompt;
        self.history = history;
        self
    }

    /// The prompt identifying the lineage the result will join.
    pub fn lineage_key(&self) -> &str {
        self.base_prompt.as_deref().unwrap_or(&self.prompt)
    }

    /// The text actually sent to the generator, with the prior versions prepended.
    pub fn full_prompt(&self) -> String {
        self.history.contextual_prompt(&self.prompt)
    }
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Pixel source reference.
    pub src: String,
    /// Prompt echoed by the generator.
    pub prompt: String,
    /// Type tag echoed by the generator.
    pub kind: GenerationType,
}

impl GeneratedImage {
    /// Reject results that carry no image reference.
    pub fn validate(self) -> GenerationResult<Self> {
        if self.src.trim().is_empty() {
            Err(GenerationError::MissingImage)
        } else {
            Ok(self)
        }
    }
}

/// Trait for image generation backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the request.
    fn generate(&self, request: &GenerationRequest) -> BoxFuture<'_, GenerationResult<GeneratedImage>>;
}

/// Trait for image generation backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait ImageGenerator {
    /// Generate one image for the request.
    fn generate(&self, request: &GenerationRequest) -> BoxFuture<'_, GenerationResult<GeneratedImage>>;
}
