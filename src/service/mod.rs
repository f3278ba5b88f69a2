pub mod artifact_store;
pub mod extractor;
pub mod model_service;
pub mod pipeline;
pub mod prompt;
