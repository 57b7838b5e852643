//! # draftsmith-pdf: PDF Renderer
//!
//! This crate implements the [`DocumentRenderer`] seam from `draftsmith` on top
//! of `printpdf`. Blocks are laid out top to bottom on A4 pages in Helvetica,
//! with greedy word wrapping, two-column rows, and images decoded from
//! `data:` URLs.

mod text;
mod writer;

use base64::{engine::general_purpose, Engine as _};
use draftsmith::{Block, DocumentRenderer, RenderError, StyleSheet};
use printpdf::{
    BuiltinFont, FontId, Layer, Mm, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, RawImage,
    XObjectId,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use writer::{PageWriter, Region};

pub use text::{text_width, wrap};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

// --- Resources ---

/// The regular and bold Helvetica faces registered with the document.
pub(crate) struct Fonts {
    regular: FontId,
    bold: FontId,
}

impl Fonts {
    fn load(doc: &mut PdfDocument) -> Result<Self, RenderError> {
        Ok(Self {
            regular: Self::builtin(doc, BuiltinFont::Helvetica, "Helvetica")?,
            bold: Self::builtin(doc, BuiltinFont::HelveticaBold, "Helvetica-Bold")?,
        })
    }

    fn builtin(
        doc: &mut PdfDocument,
        font: BuiltinFont,
        name: &str,
    ) -> Result<FontId, RenderError> {
        let font_bytes = font.get_subset_font().bytes;
        let parsed = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
            .ok_or_else(|| RenderError::Font(format!("Failed to parse built-in font {name}")))?;
        Ok(doc.add_font(&parsed))
    }

    pub(crate) fn pick(&self, bold: bool) -> &FontId {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

pub(crate) struct LoadedImage {
    pub id: XObjectId,
    pub pixel_width: f32,
    pub pixel_height: f32,
}

impl LoadedImage {
    /// Height that keeps the aspect ratio at `width`.
    pub fn height_for(&self, width: f32) -> f32 {
        width * self.pixel_height / self.pixel_width
    }
}

/// Decoded images keyed by their source reference.
#[derive(Default)]
pub(crate) struct LoadedImages {
    images: HashMap<String, LoadedImage>,
}

impl LoadedImages {
    /// Decodes every image referenced by `blocks` once. Images that fail to
    /// decode are logged and left out, and the layout draws blank space instead.
    fn load(doc: &mut PdfDocument, blocks: &[Block]) -> Self {
        let mut sources = Vec::new();
        collect_images(blocks, &mut sources);

        let mut loaded = Self::default();
        for source in sources {
            if loaded.images.contains_key(source) {
                continue;
            }
            match decode_image(source) {
                Ok(raw) if raw.width > 0 && raw.height > 0 => {
                    let image = LoadedImage {
                        pixel_width: raw.width as f32,
                        pixel_height: raw.height as f32,
                        id: doc.add_image(&raw),
                    };
                    loaded.images.insert(source.to_string(), image);
                }
                Ok(_) => warn!("Skipping empty image."),
                Err(e) => warn!(error = %e, "Skipping undecodable image."),
            }
        }
        loaded
    }

    pub(crate) fn get(&self, source: &str) -> Option<&LoadedImage> {
        self.images.get(source)
    }
}

fn collect_images<'b>(blocks: &'b [Block], out: &mut Vec<&'b str>) {
    for block in blocks {
        match block {
            Block::Image { image, .. } => out.push(image.as_str()),
            Block::TwoColumn { left, right } => {
                collect_images(std::slice::from_ref(left.as_ref()), out);
                collect_images(std::slice::from_ref(right.as_ref()), out);
            }
            Block::HeadingStack { children, .. } | Block::Stack { children } => {
                collect_images(children, out)
            }
            _ => {}
        }
    }
}

/// Decodes a `data:<mime>;base64,<payload>` URL, or a bare base64 payload.
fn decode_image(source: &str) -> Result<RawImage, String> {
    let payload = match source.split_once("base64,") {
        Some((_, payload)) => payload,
        None => source,
    };
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64: {e}"))?;
    RawImage::decode_from_bytes(&bytes, &mut Vec::new())
}

// --- Renderer ---

/// Renders block trees to PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        title: &str,
        blocks: &[Block],
        styles: &StyleSheet,
    ) -> Result<Vec<u8>, RenderError> {
        let mut doc = PdfDocument::new(title);
        let fonts = Fonts::load(&mut doc)?;
        let images = LoadedImages::load(&mut doc, blocks);
        let layer_id = doc.add_layer(&Layer::new("Content"));

        let page_height = PAGE_HEIGHT_MM * PT_PER_MM;
        let region = Region {
            left: styles.page_margins[0],
            width: PAGE_WIDTH_MM * PT_PER_MM - styles.page_margins[0] - styles.page_margins[2],
        };

        let mut writer = PageWriter::new(&fonts, &images, styles, layer_id, page_height);
        for block in blocks {
            writer.block(block, region);
        }

        for ops in writer.finish() {
            let mut page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), vec![]);
            page.ops = ops;
            doc.pages.push(page);
        }
        debug!(pages = doc.pages.len(), "Laid out document.");

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!("PDF generation warnings: {warnings:?}");
        }
        if bytes.is_empty() {
            return Err(RenderError::Document(
                "printpdf produced an empty document".to_string(),
            ));
        }

        info!(title, bytes = bytes.len(), "Rendered PDF.");
        Ok(bytes)
    }
}
