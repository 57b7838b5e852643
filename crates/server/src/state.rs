//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state owns one [`DocumentPipeline`], whose
//! fingerprint cache is shared by every request.

use crate::config::AppConfig;
use draftsmith::{
    create_provider, ContractGenerator, DocumentPipeline, InMemoryContractCache,
    LocalArtifactStore, LocalDate,
};
use draftsmith_pdf::PdfRenderer;
use std::{sync::Arc, time::Duration};
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Generates, renders and stores contracts.
    pub pipeline: Arc<DocumentPipeline>,
}

/// Builds the shared application state from the configuration.
///
/// This instantiates the configured AI provider, the in-memory contract cache,
/// the PDF renderer and the local uploads store.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider = create_provider(&config.provider)?;
    let cache_ttl = Duration::from_secs(config.cache_ttl_secs);
    info!(
        provider = %config.provider.provider,
        uploads_dir = %config.uploads_dir,
        cache_ttl_secs = config.cache_ttl_secs,
        "Building document pipeline."
    );

    let pipeline = DocumentPipeline::builder()
        .generator(Arc::new(ContractGenerator::new(provider)))
        .cache(Arc::new(InMemoryContractCache::new(cache_ttl)))
        .renderer(Arc::new(PdfRenderer::new()))
        .store(Arc::new(LocalArtifactStore::new(
            &config.uploads_dir,
            config.uploads_url_prefix.clone(),
        )))
        .date_provider(Arc::new(LocalDate::new(config.date_format.clone())?))
        .styles(config.styles.clone())
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
    })
}
