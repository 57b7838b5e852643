//! # Contract Generator
//!
//! Produces the raw document text for a request by prompting an [`AiProvider`].

use crate::{
    errors::PromptError,
    prompts::contract::{build_user_prompt, CONTRACT_SYSTEM_PROMPT},
    providers::ai::AiProvider,
    types::{DocumentType, FieldRecord},
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{info, warn};

/// The external text generator: `(type, fields) -> raw text`.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(
        &self,
        doc_type: DocumentType,
        fields: &FieldRecord,
    ) -> Result<String, PromptError>;
}

/// A [`TextGenerator`] backed by any configured [`AiProvider`].
#[derive(Clone, Debug)]
pub struct ContractGenerator {
    provider: Box<dyn AiProvider>,
}

impl ContractGenerator {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TextGenerator for ContractGenerator {
    async fn generate(
        &self,
        doc_type: DocumentType,
        fields: &FieldRecord,
    ) -> Result<String, PromptError> {
        let user_prompt = build_user_prompt(doc_type, fields);
        info!(doc_type = %doc_type, "Requesting document text from AI provider.");

        let text = self
            .provider
            .generate(CONTRACT_SYSTEM_PROMPT, &user_prompt)
            .await?;

        if text.trim().is_empty() {
            warn!(doc_type = %doc_type, "AI provider returned an empty document.");
            return Err(PromptError::AiApi(
                "The AI provider returned an empty document.".to_string(),
            ));
        }
        Ok(text)
    }
}
