use async_trait::async_trait;
use draftsmith::errors::PromptError;
use draftsmith::providers::ai::AiProvider;
use draftsmith::{
    ArtifactRef, ArtifactStore, Block, DocumentRenderer, DocumentType, RenderError, StorageError,
    StyleSheet,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A 1x1 transparent PNG as a data URL.
pub const TINY_PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system or the user prompt,
    /// e.g. a document type label such as `"Rental Contract"`.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Makes every following call fail with `AiApi(message)`. `None` clears it.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(String::from);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(PromptError::AiApi(message));
        }

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) || user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for prompt. Got: '{user_prompt}'"
        )))
    }
}

// --- In-memory artifact store ---

/// Keeps stored artifacts in memory, or fails every write when built with
/// [`MemoryArtifactStore::failing`].
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Arc<Mutex<Vec<(ArtifactRef, Vec<u8>)>>>,
    fail: bool,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Vec<(ArtifactRef, Vec<u8>)> {
        self.artifacts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn store(
        &self,
        doc_type: DocumentType,
        bytes: Vec<u8>,
    ) -> Result<ArtifactRef, StorageError> {
        if self.fail {
            return Err(StorageError::Write {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        let mut artifacts = self.artifacts.lock().unwrap();
        let file_name = format!("{}-{}.pdf", doc_type.slug(), artifacts.len());
        let artifact = ArtifactRef {
            url: format!("/uploads/{file_name}"),
            file_name,
        };
        artifacts.push((artifact.clone(), bytes));
        Ok(artifact)
    }
}

// --- Recording renderer ---

/// Captures the blocks it is asked to render and returns a fixed byte stream.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    rendered: Arc<Mutex<Vec<(String, Vec<Block>)>>>,
    fail: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(title, blocks)` for every render call, in order.
    pub fn rendered(&self) -> Vec<(String, Vec<Block>)> {
        self.rendered.lock().unwrap().clone()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn render(
        &self,
        title: &str,
        blocks: &[Block],
        _styles: &StyleSheet,
    ) -> Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::Document("renderer is disabled".to_string()));
        }
        self.rendered
            .lock()
            .unwrap()
            .push((title.to_string(), blocks.to_vec()));
        Ok(b"%PDF-recorded".to_vec())
    }
}
