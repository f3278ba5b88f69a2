use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GeminiSettings;
use crate::errors::GenerationError;

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

pub fn generate_content_url(settings: &GeminiSettings) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        settings.base_url.trim_end_matches('/'),
        settings.model
    )
}

pub async fn query_gemini(
    http: &reqwest::Client,
    settings: &GeminiSettings,
    prompt: &str,
) -> Result<String, GenerationError> {
    let request = GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
    };

    let response = http
        .post(generate_content_url(settings))
        .header("x-goog-api-key", &settings.api_key)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        warn!(status = status.as_u16(), body = %text, "gemini returned an error status");
        return Err(GenerationError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: GeminiResponse = serde_json::from_str(&text)
        .map_err(|e| GenerationError::Decode(format!("{}; raw body: {}", e, text)))?;

    let joined: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if joined.trim().is_empty() {
        debug!(body = %text, "gemini response carried no text");
        return Err(GenerationError::EmptyResponse);
    }

    Ok(joined)
}
