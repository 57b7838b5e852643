//! # Artifact Storage
//!
//! Names and persists rendered documents, handing back a stable reference.

use crate::types::DocumentType;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Where a stored artifact lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRef {
    pub file_name: String,
    pub url: String,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create artifact directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write artifact '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Persistence for rendered documents: write bytes, get back a reference.
#[async_trait]
pub trait ArtifactStore: Send + Sync + Debug {
    async fn store(&self, doc_type: DocumentType, bytes: Vec<u8>)
        -> Result<ArtifactRef, StorageError>;
}

/// `{type-slug}-{unix-millis}.pdf`, e.g. `offer-letter-1718000000000.pdf`.
pub fn artifact_file_name(doc_type: DocumentType, unix_millis: i64) -> String {
    format!("{}-{unix_millis}.pdf", doc_type.slug())
}

/// Writes artifacts into a local directory served under `url_prefix`.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(
        &self,
        doc_type: DocumentType,
        bytes: Vec<u8>,
    ) -> Result<ArtifactRef, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let file_name = artifact_file_name(doc_type, Utc::now().timestamp_millis());
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = bytes.len(), "Stored artifact.");
        Ok(ArtifactRef {
            url: format!("{}/{file_name}", self.url_prefix),
            file_name,
        })
    }
}
