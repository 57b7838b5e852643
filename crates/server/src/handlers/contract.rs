//! # Contract Generation Handler
//!
//! Validates a generation request and hands it to the document pipeline.

use super::{AppError, AppState};
use crate::types::{GenerateContractRequest, GenerateContractResponse};
use axum::{extract::State, Json};
use draftsmith::DocumentType;
use tracing::info;

/// The handler for `POST /generate-contract`.
///
/// Responds with the generated text and the URL of the stored PDF.
pub async fn generate_contract_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateContractRequest>,
) -> Result<Json<GenerateContractResponse>, AppError> {
    let contract_type = payload
        .contract_type
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Contract type is required".to_string()))?;
    let fields = payload
        .fields
        .ok_or_else(|| AppError::BadRequest("Contract fields are required".to_string()))?;
    let doc_type: DocumentType = contract_type.parse()?;

    let missing = fields.missing_required(doc_type);
    if !missing.is_empty() {
        return Err(AppError::MissingFields {
            doc_type: doc_type.label().to_string(),
            fields: missing,
        });
    }

    info!(%doc_type, fields = fields.len(), "Received contract generation request.");
    let document = app_state
        .pipeline
        .generate(doc_type, &fields)
        .await
        .map_err(|error| AppError::Pipeline {
            error,
            expose_details: app_state.config.expose_error_details,
        })?;

    Ok(Json(GenerateContractResponse {
        contract: document.text,
        file_url: document.artifact.url,
    }))
}
