//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `draftsmith-server`
//! integration tests. `TestApp` spawns a real server on a random port, with its
//! AI provider pointed at an `httpmock::MockServer` and its uploads written to
//! a temporary directory.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use draftsmith_server::{
    config, router,
    state::{build_app_state, AppState},
};
use httpmock::{Method::POST, Mock, MockServer};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub const OFFER_LETTER_TEXT: &str = "Dear Jo,\n\nOFFER OF EMPLOYMENT:\nWe are pleased to offer you the position.\nPlease review the terms below.\n• Salary: $100,000\n• Start date: July 1\n• Location: Remote\n\nAUTHORIZED SIGNATURE\nSignature: ______";

/// Knobs for the configuration a `TestApp` is started with.
#[derive(Debug, Clone, Default)]
pub struct TestAppOptions {
    pub expose_error_details: bool,
    /// Makes the uploads directory unusable so that storing a PDF fails.
    pub broken_uploads_dir: bool,
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub uploads_dir: PathBuf,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the default options.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(TestAppOptions::default()).await
    }

    pub async fn spawn_with(options: TestAppOptions) -> Result<Self> {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let uploads_dir = if options.broken_uploads_dir {
            // A regular file where the directory should be.
            let path = config_dir.path().join("not-a-directory");
            fs::write(&path, b"occupied")?;
            path
        } else {
            config_dir.path().join("uploads")
        };

        let config_value = json!({
            "port": 0,
            "uploads_dir": uploads_dir.to_string_lossy(),
            "uploads_url_prefix": "/uploads",
            "cache_ttl_secs": 60,
            "expose_error_details": options.expose_error_details,
            "provider": {
                "provider": "local",
                "api_url": mock_server.url(CHAT_COMPLETIONS_PATH),
                "api_key": null,
                "model_name": "mock-chat-model"
            }
        });
        let config_path = config_dir.path().join("config.yml");
        fs::write(&config_path, serde_yaml::to_string(&config_value)?)?;

        let config = config::get_config(config_path.to_str())?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Give the server a moment to start up.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            uploads_dir,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Mocks the chat completions endpoint to answer with `content`.
    pub fn mock_completion(&self, content: &str) -> Mock<'_> {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        self.mock_server.mock(|when, then| {
            when.method(POST).path(CHAT_COMPLETIONS_PATH);
            then.status(200).json_body(body);
        })
    }

    /// Mocks the chat completions endpoint to fail with a server error.
    pub fn mock_completion_failure(&self) -> Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(POST).path(CHAT_COMPLETIONS_PATH);
            then.status(500).body("model overloaded");
        })
    }

    /// Posts `body` to `/generate-contract`.
    pub async fn generate(&self, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/generate-contract", self.address))
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Mock Data Helpers ---

/// A complete Offer Letter request body.
pub fn offer_letter_request() -> Value {
    json!({
        "type": "Offer Letter",
        "fields": {
            "companyName": "Acme Corp",
            "recipientName": "Jo",
            "position": "Engineer",
            "startDate": "July 1, 2024",
            "compensation": "$100,000",
            "workingHours": "40 hours per week"
        }
    })
}
