mod extract;
mod gemini;

pub use extract::{extract_json, ExtractError};
pub use gemini::{GeminiModel, SafetyRating};

use async_trait::async_trait;

/// One-shot text generation request against a generative model.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Base64-encoded JPEG attached as an inline part.
    pub image_b64: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image_b64: None,
            temperature: None,
            top_p: None,
            max_output_tokens: None,
        }
    }

    pub fn with_image(mut self, image_b64: impl Into<String>) -> Self {
        self.image_b64 = Some(image_b64.into());
        self
    }

    pub fn with_sampling(mut self, temperature: f32, top_p: f32, max_output_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.top_p = Some(top_p);
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Raw output of a generation call, before any structure is recovered.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub text: String,
    /// Upstream safety ratings the client should be warned about
    /// (probability above NEGLIGIBLE).
    pub safety_warnings: Vec<SafetyRating>,
}

/// Seam between the API handlers and the upstream generative service.
///
/// Calls are one-shot: no retry, no backoff, no response caching.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<ModelOutput>;
}
