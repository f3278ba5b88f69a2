use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::ServiceConfig;
use crate::handlers::cors::CorsPolicy;
use crate::handlers::http;
use crate::service::artifact_store::FileArtifactStore;
use crate::service::model_service::GeminiService;
use crate::service::pipeline::SchedulePipeline;

pub fn build_pipeline(config: &ServiceConfig) -> anyhow::Result<SchedulePipeline> {
    let model = GeminiService::new(config.gemini.clone())
        .context("Error creating Gemini client")?;
    let store = FileArtifactStore::new(config.public_root.clone(), config.public_base());
    Ok(SchedulePipeline::new(Arc::new(model), Arc::new(store)))
}

pub async fn run_api(config: ServiceConfig) -> anyhow::Result<()> {
    let pipeline = Arc::new(build_pipeline(&config)?);

    tokio::fs::create_dir_all(&config.public_root)
        .await
        .with_context(|| format!("Unable to create {}", config.public_root.display()))?;

    let cors = CorsPolicy {
        frontend_url: config.frontend_url.clone(),
    };
    let routes = http::routes(pipeline, config.public_root.clone(), cors);

    info!(
        addr = %config.bind_addr,
        public_root = %config.public_root.display(),
        hosted = config.vercel_url.is_some(),
        "dayPlanner listening"
    );
    warp::serve(routes).run(config.bind_addr).await;
    Ok(())
}
