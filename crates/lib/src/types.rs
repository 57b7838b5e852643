//! # Core Types
//!
//! The document-type selector and the caller-supplied field record.

use crate::constants::IMAGE_FIELDS;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- Document Types ---

/// The kinds of documents the pipeline knows how to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    OfferLetter,
    EmploymentContract,
    RentalContract,
    FreelanceContract,
    JobContract,
}

/// Raised when a caller names a document type that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentTypeError {
    #[error("Unknown contract type: {given}")]
    Unknown {
        given: String,
        valid: Vec<&'static str>,
    },
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::OfferLetter,
        DocumentType::JobContract,
        DocumentType::RentalContract,
        DocumentType::FreelanceContract,
        DocumentType::EmploymentContract,
    ];

    /// The human-readable label, as accepted from callers.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::OfferLetter => "Offer Letter",
            DocumentType::EmploymentContract => "Employment Contract",
            DocumentType::RentalContract => "Rental Contract",
            DocumentType::FreelanceContract => "Freelance Contract",
            DocumentType::JobContract => "Job Contract",
        }
    }

    /// Lowercased, hyphen-separated label used in artifact file names.
    pub fn slug(&self) -> String {
        self.label()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn valid_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(DocumentType::label).collect()
    }

    /// Fields the document cannot be drafted without.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::OfferLetter
            | DocumentType::EmploymentContract
            | DocumentType::JobContract => &[
                "companyName",
                "recipientName",
                "position",
                "startDate",
                "compensation",
                "workingHours",
            ],
            DocumentType::RentalContract => &[
                "ownerName",
                "ownerAddress",
                "recipientName",
                "propertyAddress",
                "rentAmount",
                "duration",
            ],
            DocumentType::FreelanceContract => &[
                "companyName",
                "recipientName",
                "projectScope",
                "deliverables",
                "paymentTerms",
            ],
        }
    }

    /// Whether the signature section carries a counter-signature for the recipient.
    pub fn requires_acceptance(&self) -> bool {
        matches!(
            self,
            DocumentType::OfferLetter
                | DocumentType::EmploymentContract
                | DocumentType::FreelanceContract
        )
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentType {
    type Err = DocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let given = s.trim();
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.label() == given)
            .ok_or_else(|| DocumentTypeError::Unknown {
                given: given.to_string(),
                valid: Self::valid_labels(),
            })
    }
}

// --- Field Record ---

/// An opaque reference to an embedded image, usually a `data:image/...;base64,` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Image(ImageRef),
}

impl FieldValue {
    /// The raw string behind the value, used for fingerprinting.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Image(image) => image.as_str(),
        }
    }
}

/// The structured fields a caller supplies alongside the document type.
///
/// Deserialized from a JSON object. Keys listed in [`IMAGE_FIELDS`] become
/// [`FieldValue::Image`] (blank ones are dropped), `null` values are dropped,
/// and other non-string scalars are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct FieldRecord {
    fields: HashMap<String, FieldValue>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.into(), FieldValue::Text(value.into()));
        self
    }

    pub fn with_image(mut self, key: impl Into<String>, image: ImageRef) -> Self {
        self.fields.insert(key.into(), FieldValue::Image(image));
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Missing optional fields render as empty text.
    pub fn text_or_empty(&self, key: &str) -> &str {
        self.text(key).unwrap_or_default()
    }

    pub fn image(&self, key: &str) -> Option<&ImageRef> {
        match self.fields.get(key) {
            Some(FieldValue::Image(image)) => Some(image),
            _ => None,
        }
    }

    /// Interprets checkbox-style values (`true`, `yes`, `on`, `1`).
    pub fn is_truthy(&self, key: &str) -> bool {
        self.text(key).is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            )
        })
    }

    /// Required fields for `doc_type` that are absent or blank.
    pub fn missing_required(&self, doc_type: DocumentType) -> Vec<&'static str> {
        doc_type
            .required_fields()
            .iter()
            .copied()
            .filter(|key| match self.fields.get(*key) {
                Some(value) => value.as_str().trim().is_empty(),
                None => true,
            })
            .collect()
    }

    /// The fields in lexicographic key order, independent of insertion order.
    pub fn canonical(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    /// Compact JSON object of [`FieldRecord::canonical`], keys sorted.
    pub fn canonical_json(&self) -> String {
        let object: serde_json::Map<String, Value> = self
            .canonical()
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        Value::Object(object).to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, Value>> for FieldRecord {
    fn from(raw: HashMap<String, Value>) -> Self {
        let mut fields = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                other => other.to_string(),
            };
            let value = if IMAGE_FIELDS.contains(&key.as_str()) {
                if text.trim().is_empty() {
                    continue;
                }
                FieldValue::Image(ImageRef(text))
            } else {
                FieldValue::Text(text)
            };
            fields.insert(key, value);
        }
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |record, (key, value)| record.with_text(key, value))
    }
}
