use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{GenerateRequest, GenerativeModel, ModelOutput};
use crate::config::GeminiConfig;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: Blob },
}

#[derive(Debug, Serialize, Deserialize)]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "safetyRatings")]
    safety_ratings: Option<Vec<SafetyRating>>,
}

/// Safety rating attached to a response candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
}

impl SafetyRating {
    pub fn is_negligible(&self) -> bool {
        self.probability == "NEGLIGIBLE"
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Client for Google's Generative Language REST API.
pub struct GeminiModel {
    api_key: String,
    client: Client,
}

impl GeminiModel {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            client: Client::new(),
        }
    }

    fn build_url(&self, model: &str) -> String {
        format!("{API_BASE_URL}/models/{model}:generateContent?key={}", self.api_key)
    }

    fn build_request(req: &GenerateRequest) -> GeminiRequest {
        let mut parts = vec![Part::Text {
            text: req.prompt.clone(),
        }];
        if let Some(image) = &req.image_b64 {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: "image/jpeg".into(),
                    data: image.clone(),
                },
            });
        }

        let generation_config = if req.temperature.is_some()
            || req.top_p.is_some()
            || req.max_output_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: req.temperature,
                top_p: req.top_p,
                max_output_tokens: req.max_output_tokens,
            })
        } else {
            None
        };

        GeminiRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts,
            }],
            generation_config,
        }
    }

    /// Concatenated text of the first candidate.
    fn candidate_text(response: &GeminiResponse) -> String {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| match p {
                        Part::Text { text } => Some(text.as_str()),
                        Part::InlineData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    fn candidate_warnings(response: &GeminiResponse) -> Vec<SafetyRating> {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.safety_ratings.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.is_negligible())
            .collect()
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<ModelOutput> {
        let url = self.build_url(&req.model);
        let body = Self::build_request(req);

        debug!(model = %req.model, "sending generateContent request");

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            // Surface the upstream message when the error body is parseable.
            let message = serde_json::from_str::<GeminiResponse>(&response_text)
                .ok()
                .and_then(|r| r.error)
                .map_or_else(|| response_text.clone(), |e| e.message);
            error!(%status, %message, "Gemini API error");
            anyhow::bail!("Gemini API error ({status}): {message}");
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "unreadable Gemini response body");
            anyhow::anyhow!("unreadable Gemini response body: {e}")
        })?;

        if let Some(error) = parsed.error {
            anyhow::bail!("Gemini API error: {}", error.message);
        }

        let text = Self::candidate_text(&parsed);
        if text.is_empty() {
            anyhow::bail!("empty response from Gemini API");
        }

        Ok(ModelOutput {
            text,
            safety_warnings: Self::candidate_warnings(&parsed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_includes_image_part_and_sampling() {
        let req = GenerateRequest::new("gemini-pro-vision", "describe this")
            .with_image("aGVsbG8=")
            .with_sampling(0.5, 0.95, 2000);
        let body = GeminiModel::build_request(&req);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "describe this");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/jpeg"
        );
        assert_eq!(json["generation_config"]["temperature"], 0.5);
        assert_eq!(json["generation_config"]["max_output_tokens"], 2000);
    }

    #[test]
    fn request_without_sampling_omits_generation_config() {
        let req = GenerateRequest::new("gemini-1.5-pro", "plan a week of meals");
        let body = GeminiModel::build_request(&req);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generation_config").is_none());
    }

    #[test]
    fn candidate_text_joins_text_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(GeminiModel::candidate_text(&parsed), "{\"a\":1}");
    }

    #[test]
    fn candidate_warnings_filter_negligible_ratings() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "ok"}]},
                "safetyRatings": [
                    {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "NEGLIGIBLE"},
                    {"category": "HARM_CATEGORY_HARASSMENT", "probability": "LOW"}
                ]
            }]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let warnings = GeminiModel::candidate_warnings(&parsed);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, "HARM_CATEGORY_HARASSMENT");
    }
}
