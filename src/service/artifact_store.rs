use std::net::SocketAddr;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::StorageError;
use crate::models::artifact::{ArtifactLocator, GeneratedArtifact, StoredArtifact};

/// Where stored artifacts are reachable from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicBase {
    /// Hosted deployment; files are served from the site root.
    Hosted(String),
    /// Local process; files are served under `/public`.
    Local(SocketAddr),
}

impl PublicBase {
    pub fn locator_for(&self, file_name: &str) -> ArtifactLocator {
        let url = match self {
            PublicBase::Hosted(host) => {
                let host = host.trim_end_matches('/');
                if host.starts_with("http://") || host.starts_with("https://") {
                    format!("{}/{}", host, file_name)
                } else {
                    format!("https://{}/{}", host, file_name)
                }
            }
            PublicBase::Local(addr) => format!("http://{}/public/{}", addr, file_name),
        };
        ArtifactLocator { url }
    }
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn store(&self, payload: &str) -> Result<StoredArtifact, StorageError>;
}

/// Flat-file store: one `<uuid>.ics` per artifact under `root`.
pub struct FileArtifactStore {
    root: PathBuf,
    base: PublicBase,
}

impl FileArtifactStore {
    pub fn new(root: impl Into<PathBuf>, base: PublicBase) -> Self {
        Self {
            root: root.into(),
            base,
        }
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn store(&self, payload: &str) -> Result<StoredArtifact, StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.root.clone(),
                source,
            })?;

        let artifact = GeneratedArtifact::new(payload);
        let path = self.root.join(artifact.file_name());
        let write_err = |source: std::io::Error| StorageError::Write {
            path: path.clone(),
            source,
        };

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_err)?;
        file.write_all(artifact.bytes.as_bytes())
            .await
            .map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;

        let locator = self.base.locator_for(&artifact.file_name());
        debug!(path = %path.display(), url = %locator.url, "artifact written");

        Ok(StoredArtifact {
            artifact,
            path,
            locator,
        })
    }
}
