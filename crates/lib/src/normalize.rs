//! # Markup Normalizer
//!
//! Generated drafts sometimes arrive wrapped in presentational `<div>`/`<span>`
//! markup with the date and location tucked into spans. This module pulls those
//! two values out and reduces the rest to plain text.

use crate::constants::{DATE_LABEL, LOCATION_LABEL};
use regex::Regex;
use scraper::Html;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

/// Plain text plus the metadata recovered from its markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    pub date: Option<String>,
    pub location: Option<String>,
    pub text: String,
}

impl NormalizedText {
    fn passthrough(raw: &str) -> Self {
        Self {
            date: None,
            location: None,
            text: raw.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Invalid markup pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Normalization only applies to text carrying `<div` or `<span` markup.
pub fn has_markup(text: &str) -> bool {
    text.contains("<div") || text.contains("<span")
}

/// Normalizes `raw`, falling back to the untouched input on any internal fault.
pub fn normalize(raw: &str) -> NormalizedText {
    match try_normalize(raw) {
        Ok(normalized) => normalized,
        Err(e) => {
            warn!(error = %e, "Markup normalization failed; using the raw text.");
            NormalizedText::passthrough(raw)
        }
    }
}

pub fn try_normalize(raw: &str) -> Result<NormalizedText, NormalizeError> {
    if !has_markup(raw) {
        return Ok(NormalizedText::passthrough(raw));
    }

    let span_re = Regex::new(r"(?s)<span[^>]*>(.*?)</span>")?;
    let mut date = None;
    let mut location = None;
    let mut consumed: Vec<Range<usize>> = Vec::new();

    for caps in span_re.captures_iter(raw) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let content = span_text(inner.as_str());

        if let Some(rest) = content.strip_prefix(DATE_LABEL) {
            if date.is_none() {
                date = Some(rest.trim().to_string());
                consumed.push(whole.range());
            }
        } else if let Some(pos) = content.find(LOCATION_LABEL) {
            if location.is_none() {
                location = Some(content[pos + LOCATION_LABEL.len()..].trim().to_string());
                consumed.push(whole.range());
            }
        }
    }

    // Metadata spans leave the body together with their content.
    let mut body = String::with_capacity(raw.len());
    let mut cursor = 0;
    for range in consumed {
        body.push_str(&raw[cursor..range.start]);
        cursor = range.end;
    }
    body.push_str(&raw[cursor..]);

    let tag_re = Regex::new(r"<div[^>]*>|</div>|<span[^>]*>|</span>")?;
    let stripped = tag_re.replace_all(&body, "");
    let blank_run_re = Regex::new(r"\n\s*\n")?;
    let collapsed = blank_run_re.replace_all(&stripped, "\n\n");

    debug!(
        has_date = date.is_some(),
        has_location = location.is_some(),
        "Normalized marked-up text."
    );

    Ok(NormalizedText {
        date,
        location,
        text: collapsed.trim().to_string(),
    })
}

/// Decoded, trimmed text content of a span's inner HTML.
fn span_text(inner_html: &str) -> String {
    let fragment = Html::parse_fragment(inner_html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}
