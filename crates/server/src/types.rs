//! # API Payloads
//!
//! Request and response bodies of the HTTP API.

use draftsmith::FieldRecord;
use serde::{Deserialize, Serialize};

/// The body of `POST /generate-contract`.
///
/// Both members are optional here so that a missing one is reported with a
/// specific message instead of a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContractRequest {
    #[serde(rename = "type", default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub fields: Option<FieldRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContractResponse {
    pub contract: String,
    pub file_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
