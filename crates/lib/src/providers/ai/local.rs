//! Client for self-hosted drafting models behind an OpenAI-style
//! `/chat/completions` endpoint (llama.cpp, Ollama, vLLM and the like).

use super::{AiProvider, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::errors::PromptError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One completion call: the drafting instructions, then the filled-in request.
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: [ChatTurn<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Reply,
}

/// Some servers send `"content": null` for an empty completion.
#[derive(Deserialize)]
struct Reply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletion {
    /// The draft from the first choice. An answer without choices is an empty
    /// draft, which the generator rejects further up.
    fn into_draft(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// Drafts documents with a locally hosted, OpenAI-compatible chat model.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LocalAiProvider {
    /// `api_url` is the full completions URL. The key is sent as a bearer
    /// token when present; without a model name the server picks its default.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, PromptError> {
        Ok(Self {
            client: Client::builder()
                .build()
                .map_err(PromptError::ReqwestClientBuild)?,
            endpoint: api_url,
            api_key,
            model,
        })
    }

    fn completion_request<'a>(
        &'a self,
        instructions: &'a str,
        request: &'a str,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: self.model.as_deref(),
            messages: [
                ChatTurn {
                    role: "system",
                    content: instructions,
                },
                ChatTurn {
                    role: "user",
                    content: request,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
            stream: false,
        }
    }

    fn post(&self) -> RequestBuilder {
        let builder = self.client.post(&self.endpoint);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl AiProvider for LocalAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let body = self.completion_request(system_prompt, user_prompt);
        debug!(
            endpoint = %self.endpoint,
            model = self.model.as_deref().unwrap_or("<server default>"),
            prompt_chars = user_prompt.len(),
            "Requesting draft from local model."
        );

        let response = self
            .post()
            .json(&body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "Local model rejected the drafting request.");
            return Err(PromptError::AiApi(format!("HTTP {status}: {detail}")));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;
        Ok(completion.into_draft())
    }
}
