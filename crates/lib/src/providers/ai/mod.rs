pub mod gemini;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Sampling settings shared by the providers. Drafting favours low temperature.
pub const TEMPERATURE: f32 = 0.2;
pub const TOP_K: u32 = 40;
pub const TOP_P: f32 = 0.8;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating text from a system
/// and a user prompt using different Large Language Models (e.g., Gemini,
/// local OpenAI-compatible models).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result should be a string containing the AI's response.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
