use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ARTIFACT_SUFFIX: &str = ".ics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub bytes: String,
}

impl GeneratedArtifact {
    pub fn new(bytes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bytes: bytes.into(),
        }
    }

    /// Storage key: `<uuid>.ics`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.id, ARTIFACT_SUFFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLocator {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub artifact: GeneratedArtifact,
    pub path: PathBuf,
    pub locator: ArtifactLocator,
}
