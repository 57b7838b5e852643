//! # Application Configuration
//!
//! This module defines the configuration structure for the `draftsmith-server`
//! and provides the logic for loading it from a `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use draftsmith::{
    pipeline::{validate_date_format, DEFAULT_DATE_FORMAT},
    ProviderConfig, StyleSheet,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_UPLOADS_URL_PREFIX: &str = "/uploads";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory rendered PDFs are written to.
    pub uploads_dir: String,
    /// Public URL prefix the uploads directory is served under.
    pub uploads_url_prefix: String,
    /// How long generated contract text stays cached.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// `chrono` format of the date printed into documents.
    pub date_format: String,
    /// Include underlying error messages in `details` of error responses.
    #[serde(default)]
    pub expose_error_details: bool,
    /// The AI provider that drafts the contract text.
    pub provider: ProviderConfig,
    /// Overrides for the document styles.
    #[serde(default)]
    pub styles: StyleSheet,
}

fn default_port() -> u16 {
    5000
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - `${VAR}` placeholders in the YAML file are replaced from the environment.
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `DRAFTSMITH_...` variables (e.g.,
///   `DRAFTSMITH_PROVIDER__API_KEY`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("uploads_dir", DEFAULT_UPLOADS_DIR)?
        .set_default("uploads_url_prefix", DEFAULT_UPLOADS_URL_PREFIX)?
        .set_default("date_format", DEFAULT_DATE_FORMAT)?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "local".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('local' or 'gemini').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        // Layer 3: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("DRAFTSMITH")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate_date_format(&config.date_format).map_err(|e| ConfigError::General(e.to_string()))?;
    Ok(config)
}
