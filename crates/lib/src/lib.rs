//! # Draftsmith
//!
//! This crate turns loosely structured generated prose (a legal document draft
//! returned by an AI provider) into a styled block tree ready for rendering,
//! and caches the expensive generation calls by request fingerprint.
//!
//! The pieces compose into a [`DocumentPipeline`]:
//!
//! 1. [`cache`] deduplicates generation requests.
//! 2. [`normalize`] strips inline markup and recovers the date and location.
//! 3. [`segment`] splits the plain text into sections, paragraphs and bullets.
//! 4. [`layout`] maps the sections and the caller's fields to [`Block`]s.
//! 5. A [`DocumentRenderer`] turns the blocks into bytes and an
//!    [`ArtifactStore`] persists them.

pub mod cache;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod segment;
pub mod storage;
pub mod types;

pub use cache::{fingerprint, ContractCache, InMemoryContractCache};
pub use errors::PromptError;
pub use generator::{ContractGenerator, TextGenerator};
pub use layout::{assemble, Alignment, Block, StyleSheet, TextStyle};
pub use normalize::{normalize, NormalizedText};
pub use pipeline::{
    DateProvider, DocumentPipeline, DocumentPipelineBuilder, FixedDate, GeneratedDocument,
    LocalDate, PipelineBuildError, PipelineError,
};
pub use providers::factory::{create_provider, ProviderConfig};
pub use render::{DocumentRenderer, RenderError};
pub use segment::{segment, ContentItem, Section};
pub use storage::{ArtifactRef, ArtifactStore, LocalArtifactStore, StorageError};
pub use types::{DocumentType, DocumentTypeError, FieldRecord, FieldValue, ImageRef};
