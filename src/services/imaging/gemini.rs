//! HTTP client for a Gemini-style `generateContent` image endpoint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::artifact::Artifact;
use crate::config::ImageServiceSettings;
use crate::error::GenerationError;

use super::{Hotspot, ImageTransformService, UpscaleFactor, prompts};

/// Finish reasons that mean the model refused on policy grounds
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "IMAGE_SAFETY", "SPII"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

pub struct GeminiImageService {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiImageService {
    /// Build a client, reading the API key from the configured environment variable.
    pub fn from_settings(settings: &ImageServiceSettings) -> Self {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            bevy::log::warn!(
                "{} is not set; image requests will fail until it is",
                settings.api_key_env
            );
        }

        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        }
    }

    fn request(&self, label: &str, instruction: String, images: &[&Artifact]) -> Result<Artifact, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Service("no API key configured".to_string()))?;

        let mut parts: Vec<Part> = images.iter().map(|image| Part::image(image)).collect();
        parts.push(Part::text(instruction));

        let body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        bevy::log::info!("Requesting {} from {}", label, self.model);

        let response = match self
            .agent
            .post(&url)
            .set("x-goog-api-key", api_key)
            .send_json(&body)
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                return Err(GenerationError::Service(format!(
                    "HTTP {}: {}",
                    code,
                    summarize(&detail)
                )));
            }
            Err(e) => return Err(GenerationError::Service(e.to_string())),
        };

        let parsed: GenerateResponse = response
            .into_json()
            .map_err(|e| GenerationError::Service(format!("malformed response: {}", e)))?;

        parse_response(label, parsed)
    }
}

impl ImageTransformService for GeminiImageService {
    fn generate_from_text(&self, prompt: &str) -> Result<Artifact, GenerationError> {
        self.request("generate", prompts::generate(prompt), &[])
    }

    fn edit_at_point(
        &self,
        source: &Artifact,
        instruction: &str,
        point: Hotspot,
    ) -> Result<Artifact, GenerationError> {
        let dimensions = source.dimensions()?;
        self.request(
            "edit",
            prompts::edit_at_point(instruction, point, dimensions),
            &[source],
        )
    }

    fn apply_global_adjustment(
        &self,
        source: &Artifact,
        instruction: &str,
    ) -> Result<Artifact, GenerationError> {
        self.request("adjust", prompts::global_adjustment(instruction), &[source])
    }

    fn apply_filter(&self, source: &Artifact, instruction: &str) -> Result<Artifact, GenerationError> {
        self.request("filter", prompts::filter(instruction), &[source])
    }

    fn apply_style(&self, source: &Artifact, instruction: &str) -> Result<Artifact, GenerationError> {
        self.request("style", prompts::style(instruction), &[source])
    }

    fn remove_background(&self, source: &Artifact) -> Result<Artifact, GenerationError> {
        self.request("cutout", prompts::remove_background(), &[source])
    }

    fn inpaint_masked(&self, source: &Artifact, mask: &Artifact) -> Result<Artifact, GenerationError> {
        self.request("inpaint", prompts::inpaint(), &[source, mask])
    }

    fn upscale(&self, source: &Artifact, factor: UpscaleFactor) -> Result<Artifact, GenerationError> {
        let dimensions = source.dimensions()?;
        self.request(
            "upscale",
            prompts::upscale(factor.factor(), dimensions),
            &[source],
        )
    }
}

/// Turn a decoded response into an artifact or a classified error.
pub(crate) fn parse_response(label: &str, response: GenerateResponse) -> Result<Artifact, GenerationError> {
    if let Some(feedback) = response.prompt_feedback
        && let Some(reason) = feedback.block_reason
    {
        let message = match feedback.block_reason_message {
            Some(msg) => format!("{} ({})", reason, msg),
            None => reason,
        };
        return Err(GenerationError::Blocked(message));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::NoResult("service returned no candidates".to_string()));
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let mut text = Vec::new();
    for part in parts {
        if let Some(inline) = part.inline_data {
            let bytes = STANDARD
                .decode(inline.data.as_bytes())
                .map_err(|e| GenerationError::NoResult(format!("undecodable image data: {}", e)))?;
            return Ok(Artifact::generated(bytes, inline.mime_type, label));
        }
        if let Some(t) = part.text {
            text.push(t);
        }
    }

    if let Some(reason) = candidate.finish_reason
        && BLOCKING_FINISH_REASONS.contains(&reason.as_str())
    {
        return Err(GenerationError::Blocked(reason));
    }

    let detail = if text.is_empty() {
        "response contained no image".to_string()
    } else {
        summarize(&text.join(" "))
    };
    Err(GenerationError::NoResult(detail))
}

fn summarize(text: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = text.trim();
    match trimmed.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

// Wire format

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
    pub block_reason_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn image(artifact: &Artifact) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: artifact.content_type().to_string(),
                data: STANDARD.encode(artifact.bytes()),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}
