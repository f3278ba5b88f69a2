use async_trait::async_trait;
use tracing::debug;

use crate::clients::gemini_client;
use crate::config::GeminiSettings;
use crate::errors::GenerationError;

/// A text-generation backend. One call per prompt, no retries.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct GeminiService {
    http: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiService {
    pub fn new(settings: GeminiSettings) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }
}

#[async_trait]
impl ModelClient for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(model = %self.settings.model, prompt, "sending prompt to gemini");
        let text = gemini_client::query_gemini(&self.http, &self.settings, prompt).await?;
        debug!(response = %text, "raw response from gemini");
        Ok(text)
    }
}
