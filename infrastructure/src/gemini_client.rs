use anyhow::anyhow;
use domain::providers::ChatModel;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;

pub const TEMPERATURE: f32 = 0.7;

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// `model` may be given with or without the `models/` prefix.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.trim_start_matches("models/").to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }

    pub async fn generate_response(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!("Gemini API error ({status}): {text}"));
        }
        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        extract_text(parsed)
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(anyhow!("Gemini blocked the prompt: {reason}"));
    }
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;
    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(anyhow!(
            "Gemini returned an empty completion (finish reason: {reason})"
        ));
    }
    Ok(text)
}

impl ChatModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate_response(prompt).await
    }
}
