//! The seam between layout and output formats.

use crate::layout::{Block, StyleSheet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load font: {0}")]
    Font(String),
    #[error("Failed to produce document: {0}")]
    Document(String),
}

/// Turns an ordered block list into the bytes of a finished document.
pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        title: &str,
        blocks: &[Block],
        styles: &StyleSheet,
    ) -> Result<Vec<u8>, RenderError>;
}
