use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use draftsmith::{DocumentTypeError, PipelineError};
use serde_json::{json, Map, Value};
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur within
/// the server, allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body lacks a required member.
    BadRequest(String),
    /// The requested contract type is not one of the supported ones.
    UnknownDocumentType(DocumentTypeError),
    /// The record lacks fields the contract type requires.
    MissingFields {
        doc_type: String,
        fields: Vec<&'static str>,
    },
    /// A stage of the document pipeline failed.
    Pipeline {
        error: PipelineError,
        expose_details: bool,
    },
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<DocumentTypeError> for AppError {
    fn from(err: DocumentTypeError) -> Self {
        AppError::UnknownDocumentType(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        let status_code = match self {
            AppError::BadRequest(message) => {
                warn!("Rejected request: {message}");
                body.insert("error".into(), Value::from(message));
                StatusCode::BAD_REQUEST
            }
            AppError::UnknownDocumentType(err) => {
                warn!("Rejected request: {err}");
                let DocumentTypeError::Unknown { valid, .. } = &err;
                body.insert("error".into(), Value::from(err.to_string()));
                body.insert("validTypes".into(), json!(valid));
                StatusCode::BAD_REQUEST
            }
            AppError::MissingFields { doc_type, fields } => {
                warn!(?fields, "Rejected {doc_type} request with missing fields.");
                body.insert(
                    "error".into(),
                    Value::from(format!("Missing required fields for {doc_type}")),
                );
                body.insert("missingFields".into(), json!(fields));
                StatusCode::BAD_REQUEST
            }
            AppError::Pipeline {
                error,
                expose_details,
            } => {
                error!("PipelineError: {:?}", error);
                let status_code = match &error {
                    PipelineError::Generation(_) => {
                        body.insert("error".into(), Value::from("Failed to generate contract"));
                        StatusCode::BAD_GATEWAY
                    }
                    PipelineError::Render { .. } | PipelineError::Persistence { .. } => {
                        body.insert("error".into(), Value::from("Failed to generate document"));
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                if let Some(text) = error.raw_text() {
                    body.insert("contract".into(), Value::from(text));
                }
                if expose_details {
                    body.insert("details".into(), Value::from(error.to_string()));
                }
                status_code
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                body.insert("error".into(), Value::from("An unexpected error occurred"));
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, Json(Value::Object(body))).into_response()
    }
}
