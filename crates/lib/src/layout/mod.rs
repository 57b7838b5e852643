//! # Layout Assembler
//!
//! Maps segmented sections and the caller's fields to an ordered list of
//! [`Block`]s: logo, date/location header, title, the generated body, and a
//! signature section chosen by document type.
//!
//! Generated text is untrusted for anything signature-related. The first line
//! that looks like a signature label ends the body; the layout always draws its
//! own signature blocks instead.

mod block;
pub mod signature;
mod style;

pub use block::{Alignment, Block, TextStyle};
pub use style::{Style, StyleSheet};

use crate::constants::{
    BULLET_MARKERS, DATE_LABEL, DATE_PLACEHOLDERS, LOCATION_LABEL, LOGO_IMAGE, LOGO_WIDTH,
    REMOVED_PLACEHOLDERS,
};
use crate::segment::{ContentItem, Section};
use crate::types::{DocumentType, FieldRecord};
use tracing::debug;

const SUPPRESSING_PREFIXES: [&str; 3] = ["Owner:", "Tenant:", "Witness:"];

/// Builds the full block list for one document. Never fails; absent fields
/// render as empty text.
pub fn assemble(
    sections: &[Section],
    fields: &FieldRecord,
    doc_type: DocumentType,
    extracted_date: Option<&str>,
    extracted_location: Option<&str>,
    render_date: &str,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(logo) = fields.image(LOGO_IMAGE) {
        blocks.push(Block::Image {
            image: logo.clone(),
            width: LOGO_WIDTH,
            align: Alignment::Center,
        });
    }

    if extracted_date.is_some() || extracted_location.is_some() {
        let date = extracted_date
            .map(|date| format!("{DATE_LABEL} {date}"))
            .unwrap_or_default();
        let location = extracted_location
            .map(|location| format!("{LOCATION_LABEL} {location}"))
            .unwrap_or_default();
        blocks.push(Block::TwoColumn {
            left: Box::new(Block::styled(date, TextStyle::Small, Alignment::Left)),
            right: Box::new(Block::styled(location, TextStyle::Small, Alignment::Right)),
        });
    }

    blocks.push(Block::Title {
        text: doc_type.label().to_uppercase(),
    });

    let mut body = BodyBuilder::new(render_date);
    for section in sections {
        body.push_section(section);
        if body.suppressed {
            debug!(section = %section.title, "Signature content reached; dropping the rest of the body.");
            break;
        }
    }
    blocks.extend(body.blocks);

    blocks.extend(signature::signature_blocks(doc_type, fields, render_date));
    blocks
}

/// Applies placeholder substitution to one line of generated text.
pub fn substitute_placeholders(line: &str, render_date: &str) -> String {
    let mut text = line.to_string();
    for placeholder in DATE_PLACEHOLDERS {
        text = text.replace(placeholder, render_date);
    }
    for placeholder in REMOVED_PLACEHOLDERS {
        text = text.replace(placeholder, "");
    }
    text.trim().to_string()
}

/// Whether a line marks the start of generator-written signature content.
pub fn is_signature_line(line: &str) -> bool {
    line.contains("SIGNATURE")
        || SUPPRESSING_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

/// A non-bullet line ending in `:` introduces a sub-heading.
pub fn is_colon_heading(line: &str) -> bool {
    line.ends_with(':') && !line.starts_with(&BULLET_MARKERS[..])
}

struct BodyBuilder<'a> {
    render_date: &'a str,
    blocks: Vec<Block>,
    suppressed: bool,
}

/// Section children plus an optionally open colon sub-heading.
#[derive(Default)]
struct SectionChildren {
    children: Vec<Block>,
    open: Option<(String, Vec<Block>)>,
}

impl SectionChildren {
    fn push(&mut self, block: Block) {
        match &mut self.open {
            Some((_, nested)) => nested.push(block),
            None => self.children.push(block),
        }
    }

    fn open_subheading(&mut self, heading: String) {
        self.close_subheading();
        self.open = Some((heading, Vec::new()));
    }

    fn close_subheading(&mut self) {
        if let Some((heading, nested)) = self.open.take() {
            self.children
                .push(Block::heading_stack(heading, TextStyle::Subheading, nested));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_subheading();
        self.children
    }
}

impl<'a> BodyBuilder<'a> {
    fn new(render_date: &'a str) -> Self {
        Self {
            render_date,
            blocks: Vec::new(),
            suppressed: false,
        }
    }

    /// Substitutes placeholders; `None` for lines that end up empty.
    fn clean(&self, line: &str) -> Option<String> {
        let text = substitute_placeholders(line, self.render_date);
        (!text.is_empty()).then_some(text)
    }

    fn push_section(&mut self, section: &Section) {
        let title = substitute_placeholders(&section.title, self.render_date);
        if is_signature_line(&title) {
            self.suppressed = true;
            return;
        }

        let mut children = SectionChildren::default();
        for item in &section.content {
            match item {
                ContentItem::Text(value) => {
                    let Some(line) = self.clean(value) else {
                        continue;
                    };
                    if is_signature_line(&line) {
                        self.suppressed = true;
                        break;
                    }
                    if is_colon_heading(&line) {
                        children.open_subheading(line);
                    } else {
                        children.push(Block::paragraph(line));
                    }
                }
                ContentItem::Bullets(items) => {
                    let mut kept = Vec::with_capacity(items.len());
                    for item in items {
                        let Some(text) = self.clean(item) else {
                            continue;
                        };
                        if is_signature_line(&text) {
                            self.suppressed = true;
                            break;
                        }
                        kept.push(text);
                    }
                    if !kept.is_empty() {
                        children.push(Block::BulletList { items: kept });
                    }
                    if self.suppressed {
                        break;
                    }
                }
            }
        }

        let children = children.finish();
        if title.is_empty() {
            self.blocks.extend(children);
        } else {
            self.blocks
                .push(Block::heading_stack(title, TextStyle::Heading, children));
        }
    }
}
