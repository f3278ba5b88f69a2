use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{GenerationError, PipelineError};
use crate::models::artifact::StoredArtifact;
use crate::models::schedule::ScheduleRequest;
use crate::service::artifact_store::ArtifactStore;
use crate::service::extractor::extract_calendar;
use crate::service::model_service::ModelClient;
use crate::service::prompt::{build_prompt, current_time_in};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Prompted,
    Generated,
    Extracted,
    Stored,
    Responded,
    Failed,
}

/// Prompt, generate, extract, store. Stops at the first failing stage.
pub struct SchedulePipeline {
    model: Arc<dyn ModelClient>,
    store: Arc<dyn ArtifactStore>,
}

impl SchedulePipeline {
    pub fn new(model: Arc<dyn ModelClient>, store: Arc<dyn ArtifactStore>) -> Self {
        Self { model, store }
    }

    pub async fn run(&self, request: &ScheduleRequest) -> Result<StoredArtifact, PipelineError> {
        self.run_at(request, Utc::now()).await
    }

    pub async fn run_at(
        &self,
        request: &ScheduleRequest,
        now: DateTime<Utc>,
    ) -> Result<StoredArtifact, PipelineError> {
        let span = info_span!("create_event", request_id = %Uuid::new_v4(), time_zone = %request.time_zone);
        async move {
            match self.advance(request, now).await {
                Ok(stored) => {
                    info!(url = %stored.locator.url, "schedule stored");
                    Ok(stored)
                }
                Err(err) => {
                    warn!(stage = ?PipelineStage::Failed, error = %err, "schedule request failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn advance(
        &self,
        request: &ScheduleRequest,
        now: DateTime<Utc>,
    ) -> Result<StoredArtifact, PipelineError> {
        info!(stage = ?PipelineStage::Received, "schedule request received");

        let current_time = current_time_in(&request.time_zone, now);
        let prompt = build_prompt(&request.user_input, current_time, &request.time_zone);
        info!(stage = ?PipelineStage::Prompted, prompt_len = prompt.len());

        let response = self.model.generate(&prompt).await?;
        if response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }
        info!(stage = ?PipelineStage::Generated, response_len = response.len());

        let calendar = extract_calendar(&response)?;
        info!(stage = ?PipelineStage::Extracted, payload_len = calendar.len());

        let stored = self.store.store(calendar).await?;
        info!(stage = ?PipelineStage::Stored, id = %stored.artifact.id);

        Ok(stored)
    }
}
