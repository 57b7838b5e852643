//! Type-specific signature blocks appended after the generated body.

use super::{Alignment, Block, TextStyle};
use crate::constants::{
    COMPANY_NAME, DATE_LABEL, INCLUDE_WITNESS, OWNER_NAME, OWNER_SIGNATURE, RECIPIENT_NAME,
    SIGNATURE_IMAGE, SIGNATURE_SPACER, SIGNATURE_WIDTH, TENANT_SIGNATURE,
};
use crate::types::{DocumentType, FieldRecord, ImageRef};

pub const SIGNATURES_HEADING: &str = "SIGNATURES";

/// The `SIGNATURES` heading followed by the blocks for `doc_type`.
pub fn signature_blocks(
    doc_type: DocumentType,
    fields: &FieldRecord,
    render_date: &str,
) -> Vec<Block> {
    let mut blocks = vec![Block::styled(
        SIGNATURES_HEADING,
        TextStyle::Heading,
        Alignment::Center,
    )];

    match doc_type {
        DocumentType::RentalContract => {
            blocks.push(Block::TwoColumn {
                left: Box::new(party_column(
                    "Owner's Signature",
                    fields.image(OWNER_SIGNATURE),
                    fields.text_or_empty(OWNER_NAME),
                    render_date,
                )),
                right: Box::new(party_column(
                    "Tenant's Signature",
                    fields.image(TENANT_SIGNATURE),
                    fields.text_or_empty(RECIPIENT_NAME),
                    render_date,
                )),
            });
            if fields.is_truthy(INCLUDE_WITNESS) {
                blocks.push(witness_block());
            }
        }
        DocumentType::OfferLetter
        | DocumentType::EmploymentContract
        | DocumentType::FreelanceContract
        | DocumentType::JobContract => {
            blocks.push(Block::Stack {
                children: vec![
                    centered("Authorized Signatory:", TextStyle::Subheading),
                    signature_image(fields.image(SIGNATURE_IMAGE), Alignment::Center),
                    centered(fields.text_or_empty(COMPANY_NAME), TextStyle::Paragraph),
                    centered(format!("{DATE_LABEL} {render_date}"), TextStyle::Paragraph),
                ],
            });
            if doc_type.requires_acceptance() {
                blocks.push(accepted_by_block(fields));
            }
        }
    }

    blocks
}

fn party_column(
    label: &str,
    image: Option<&ImageRef>,
    name: &str,
    render_date: &str,
) -> Block {
    Block::Stack {
        children: vec![
            centered(label, TextStyle::Subheading),
            signature_image(image, Alignment::Center),
            centered(name, TextStyle::Paragraph),
            centered(render_date, TextStyle::Paragraph),
        ],
    }
}

/// Every line of a signature block is centered.
fn centered(text: impl Into<String>, style: TextStyle) -> Block {
    Block::styled(text, style, Alignment::Center)
}

fn signature_image(image: Option<&ImageRef>, align: Alignment) -> Block {
    match image {
        Some(image) => Block::Image {
            image: image.clone(),
            width: SIGNATURE_WIDTH,
            align,
        },
        None => Block::Spacer {
            height: SIGNATURE_SPACER,
        },
    }
}

fn witness_block() -> Block {
    Block::Stack {
        children: vec![
            centered("Witness (Optional):", TextStyle::Subheading),
            Block::signature_line("Name"),
            Block::signature_line("Signature"),
            Block::signature_line("Date"),
        ],
    }
}

fn accepted_by_block(fields: &FieldRecord) -> Block {
    Block::Stack {
        children: vec![
            centered("Accepted By:", TextStyle::Subheading),
            centered(fields.text_or_empty(RECIPIENT_NAME), TextStyle::Paragraph),
            Block::signature_line("Signature"),
            Block::signature_line("Date"),
        ],
    }
}
