//! # Document Pipeline
//!
//! Wires the stages together for one request:
//! cache → generator → normalizer → segmenter → assembler → renderer → store.

use crate::{
    cache::{ContractCache, InMemoryContractCache},
    errors::PromptError,
    generator::TextGenerator,
    layout::{assemble, Block, StyleSheet},
    normalize::normalize,
    render::{DocumentRenderer, RenderError},
    segment::segment,
    storage::{ArtifactRef, ArtifactStore, StorageError},
    types::{DocumentType, FieldRecord},
};
use chrono::{
    format::{Item, StrftimeItems},
    Local,
};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

// --- Render date ---

/// Supplies the date substituted into placeholders and signature blocks.
pub trait DateProvider: Send + Sync + Debug {
    fn today(&self) -> String;
}

/// The local calendar date in a `chrono` format string.
#[derive(Debug, Clone)]
pub struct LocalDate {
    format: String,
}

impl LocalDate {
    /// Fails on a format `chrono` cannot render.
    pub fn new(format: impl Into<String>) -> Result<Self, PipelineBuildError> {
        let format = format.into();
        validate_date_format(&format)?;
        Ok(Self { format })
    }
}

impl Default for LocalDate {
    fn default() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Rejects strftime strings containing unknown or malformed specifiers.
pub fn validate_date_format(format: &str) -> Result<(), PipelineBuildError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(PipelineBuildError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

impl DateProvider for LocalDate {
    fn today(&self) -> String {
        Local::now().format(&self.format).to_string()
    }
}

/// Always the same date. Useful for reproducible output.
#[derive(Debug, Clone)]
pub struct FixedDate(pub String);

impl DateProvider for FixedDate {
    fn today(&self) -> String {
        self.0.clone()
    }
}

// --- Errors & results ---

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not produce document text: {0}")]
    Generation(#[from] PromptError),
    #[error("Could not render document: {source}")]
    Render {
        text: String,
        #[source]
        source: RenderError,
    },
    #[error("Could not store document: {source}")]
    Persistence {
        text: String,
        #[source]
        source: StorageError,
    },
}

impl PipelineError {
    /// The generated text, when generation succeeded but a later stage failed.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            PipelineError::Generation(_) => None,
            PipelineError::Render { text, .. } | PipelineError::Persistence { text, .. } => {
                Some(text)
            }
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineBuildError {
    #[error("Document pipeline is missing its {0}")]
    MissingComponent(&'static str),
    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub text: String,
    pub artifact: ArtifactRef,
    /// Whether the text was served from the fingerprint cache.
    pub from_cache: bool,
}

// --- Pipeline ---

pub struct DocumentPipeline {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<dyn ContractCache>,
    renderer: Arc<dyn DocumentRenderer>,
    store: Arc<dyn ArtifactStore>,
    dates: Arc<dyn DateProvider>,
    styles: StyleSheet,
}

impl Debug for DocumentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentPipeline")
            .field("generator", &self.generator)
            .field("cache", &self.cache)
            .field("store", &self.store)
            .field("dates", &self.dates)
            .finish_non_exhaustive()
    }
}

impl DocumentPipeline {
    pub fn builder() -> DocumentPipelineBuilder {
        DocumentPipelineBuilder::new()
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Produces, renders and stores one document.
    ///
    /// Generation failures carry no text. Render and persistence failures keep
    /// the generated text so callers can still show it.
    #[instrument(skip(self, fields), fields(doc_type = %doc_type))]
    pub async fn generate(
        &self,
        doc_type: DocumentType,
        fields: &FieldRecord,
    ) -> Result<GeneratedDocument, PipelineError> {
        let (text, from_cache) = self.fetch_text(doc_type, fields).await?;
        let blocks = self.build_layout(doc_type, fields, &text);

        let bytes = match self.render(doc_type, blocks).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(PipelineError::Render { text, source }),
        };

        let artifact = match self.store.store(doc_type, bytes).await {
            Ok(artifact) => artifact,
            Err(source) => return Err(PipelineError::Persistence { text, source }),
        };

        info!(url = %artifact.url, from_cache, "Document generated.");
        Ok(GeneratedDocument {
            text,
            artifact,
            from_cache,
        })
    }

    /// Normalizes, segments and assembles `raw_text` into blocks.
    pub fn build_layout(
        &self,
        doc_type: DocumentType,
        fields: &FieldRecord,
        raw_text: &str,
    ) -> Vec<Block> {
        let normalized = normalize(raw_text);
        let sections = segment(&normalized.text);
        debug!(sections = sections.len(), "Segmented document text.");
        assemble(
            &sections,
            fields,
            doc_type,
            normalized.date.as_deref(),
            normalized.location.as_deref(),
            &self.dates.today(),
        )
    }

    /// Runs the renderer on the blocking pool.
    async fn render(
        &self,
        doc_type: DocumentType,
        blocks: Vec<Block>,
    ) -> Result<Vec<u8>, RenderError> {
        let renderer = Arc::clone(&self.renderer);
        let styles = self.styles.clone();
        tokio::task::spawn_blocking(move || renderer.render(doc_type.label(), &blocks, &styles))
            .await
            .map_err(|e| RenderError::Document(format!("render task failed: {e}")))?
    }

    /// Cached text for the request, generating and caching it on a miss.
    async fn fetch_text(
        &self,
        doc_type: DocumentType,
        fields: &FieldRecord,
    ) -> Result<(String, bool), PromptError> {
        if let Some(text) = self.cache.get(doc_type, fields) {
            info!("Serving document text from cache.");
            return Ok((text, true));
        }

        let text = self.generator.generate(doc_type, fields).await?;
        self.cache.put(doc_type, fields, text.clone());
        Ok((text, false))
    }
}

// --- Builder ---

/// Assembles a [`DocumentPipeline`]. The generator, renderer and store are
/// required; the cache, date provider and styles have defaults.
#[derive(Default)]
pub struct DocumentPipelineBuilder {
    generator: Option<Arc<dyn TextGenerator>>,
    cache: Option<Arc<dyn ContractCache>>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    store: Option<Arc<dyn ArtifactStore>>,
    dates: Option<Arc<dyn DateProvider>>,
    styles: Option<StyleSheet>,
}

impl DocumentPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn ContractCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn date_provider(mut self, dates: Arc<dyn DateProvider>) -> Self {
        self.dates = Some(dates);
        self
    }

    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn build(self) -> Result<DocumentPipeline, PipelineBuildError> {
        Ok(DocumentPipeline {
            generator: self
                .generator
                .ok_or(PipelineBuildError::MissingComponent("text generator"))?,
            renderer: self
                .renderer
                .ok_or(PipelineBuildError::MissingComponent("renderer"))?,
            store: self
                .store
                .ok_or(PipelineBuildError::MissingComponent("artifact store"))?,
            cache: self
                .cache
                .unwrap_or_else(|| Arc::new(InMemoryContractCache::default())),
            dates: self.dates.unwrap_or_else(|| Arc::new(LocalDate::default())),
            styles: self.styles.unwrap_or_default(),
        })
    }
}
