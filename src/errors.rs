use std::path::PathBuf;

/// Failure talking to the generation service. Every variant collapses to
/// "generation failed" once it reaches the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request to generation service failed: {0}")]
    Transport(String),

    #[error("generation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse generation response: {0}")]
    Decode(String),

    #[error("generation service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Could not extract .ics content from model response: no BEGIN:VCALENDAR marker")]
    MissingBegin,

    #[error("Could not extract .ics content from model response: BEGIN:VCALENDAR is never closed by END:VCALENDAR")]
    MissingEnd,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to create artifact directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}
