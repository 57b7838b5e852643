//! # Layout Assembler Tests
//!
//! Exercises the assembler on segmented text: body mapping, placeholder
//! substitution, signature suppression and the per-type signature blocks.

mod common;

use common::{offer_letter_fields, rental_fields, OFFER_LETTER_TEXT};
use draftsmith::layout::{
    assemble, is_colon_heading, is_signature_line, signature::SIGNATURES_HEADING,
    substitute_placeholders, Alignment, Block, TextStyle,
};
use draftsmith::segment::segment;
use draftsmith::{DocumentType, FieldRecord, ImageRef};

const RENDER_DATE: &str = "6/1/2024";

fn layout(text: &str, fields: &FieldRecord, doc_type: DocumentType) -> Vec<Block> {
    assemble(&segment(text), fields, doc_type, None, None, RENDER_DATE)
}

fn index_of_signatures(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .position(|block| block.text() == Some(SIGNATURES_HEADING))
        .expect("layout should contain the SIGNATURES heading")
}

/// Verifies the Offer Letter scenario end to end.
#[test]
fn test_offer_letter_scenario() {
    // --- Arrange ---
    let fields = offer_letter_fields();
    let text = "OFFER OF EMPLOYMENT:\nWe are pleased to offer you the role.\nYou start on 1 July.\n- Salary\n- Insurance\n- Leave";

    // --- Act ---
    let blocks = layout(text, &fields, DocumentType::OfferLetter);

    // --- Assert ---
    assert_eq!(
        blocks[0],
        Block::Title {
            text: "OFFER LETTER".to_string()
        }
    );

    let heading_stacks: Vec<&Block> = blocks
        .iter()
        .filter(|block| matches!(block, Block::HeadingStack { .. }))
        .collect();
    assert_eq!(heading_stacks.len(), 1);
    assert_eq!(heading_stacks[0].text(), Some("OFFER OF EMPLOYMENT:"));

    let children = heading_stacks[0].children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], Block::paragraph("We are pleased to offer you the role."));
    assert_eq!(children[1], Block::paragraph("You start on 1 July."));
    assert_eq!(
        children[2],
        Block::BulletList {
            items: vec!["Salary".into(), "Insurance".into(), "Leave".into()]
        }
    );

    // Non-rental signature section: authorized signatory, then accepted by.
    let signatures = index_of_signatures(&blocks);
    assert_eq!(blocks.len(), signatures + 3);
    assert_eq!(blocks[signatures + 1].children()[0].text(), Some("Authorized Signatory:"));
    assert_eq!(blocks[signatures + 1].children()[2].text(), Some("Acme Corp"));
    assert_eq!(blocks[signatures + 2].children()[0].text(), Some("Accepted By:"));
    assert_eq!(blocks[signatures + 2].children()[1].text(), Some("Jo"));
}

/// Verifies leading untitled content is emitted at the top level.
#[test]
fn test_untitled_section_children_are_top_level() {
    let blocks = layout(OFFER_LETTER_TEXT, &offer_letter_fields(), DocumentType::OfferLetter);

    assert_eq!(blocks[1], Block::paragraph("Dear Jo,"));
    assert!(matches!(blocks[2], Block::HeadingStack { .. }));
}

/// Verifies that everything after the first signature-like line is dropped.
#[test]
fn test_signature_suppression() {
    let text = "TERMS OF SERVICE\nThe work is described below.\nSIGNATURE OF PARTIES\nOwner: ____\nThis line must vanish.\nFINAL PROVISIONS\nAlso gone.";

    let blocks = layout(text, &FieldRecord::new(), DocumentType::JobContract);

    let signatures = index_of_signatures(&blocks);
    let body = &blocks[1..signatures];
    assert_eq!(
        body,
        &[Block::heading_stack(
            "TERMS OF SERVICE",
            TextStyle::Heading,
            vec![Block::paragraph("The work is described below.")],
        )]
    );
}

/// Verifies suppression triggered inside a section keeps the earlier content.
#[test]
fn test_suppression_mid_section_and_in_bullets() {
    let text = "PARTIES INVOLVED\nFirst paragraph.\n- Landlord details\n- Tenant: Tim\n- never shown\nGone too.";

    let blocks = layout(text, &rental_fields(), DocumentType::RentalContract);

    let signatures = index_of_signatures(&blocks);
    assert_eq!(signatures, 2);
    assert_eq!(
        blocks[1].children(),
        &[
            Block::paragraph("First paragraph."),
            Block::BulletList {
                items: vec!["Landlord details".into()]
            },
        ]
    );
}

/// Verifies the rental signature block ends with the owner/tenant columns.
#[test]
fn test_rental_signature_block_shape() {
    let fields = rental_fields().with_image("ownerSignature", ImageRef::new("data:image/png;base64,AAAA"));

    let blocks = layout("LEASE AGREEMENT\nRent is due monthly.", &fields, DocumentType::RentalContract);

    let Some(Block::TwoColumn { left, right }) = blocks.last() else {
        panic!("Rental layout should end with a two-column block, got {:?}", blocks.last());
    };
    let left = left.children();
    assert_eq!(left[0].text(), Some("Owner's Signature"));
    assert!(matches!(left[1], Block::Image { width, .. } if width == 150.0));
    assert_eq!(left[2].text(), Some("Olive Owner"));
    assert_eq!(left[3].text(), Some(RENDER_DATE));

    let right = right.children();
    assert_eq!(right[0].text(), Some("Tenant's Signature"));
    assert_eq!(right[1], Block::Spacer { height: 40.0 });
    assert_eq!(right[2].text(), Some("Tim Tenant"));
}

/// Verifies the witness block is opt-in and follows the columns.
#[test]
fn test_rental_witness_block_when_requested() {
    let fields = rental_fields().with_text("includeWitness", "true");

    let blocks = layout("LEASE AGREEMENT\nRent is due monthly.", &fields, DocumentType::RentalContract);

    let witness = blocks.last().expect("layout is never empty");
    assert_eq!(witness.children()[0].text(), Some("Witness (Optional):"));
    assert_eq!(witness.children()[1], Block::signature_line("Name"));
    assert_eq!(witness.children()[2], Block::signature_line("Signature"));
    assert_eq!(witness.children()[3], Block::signature_line("Date"));
    assert!(matches!(blocks[blocks.len() - 2], Block::TwoColumn { .. }));
}

/// Verifies the employment signature section ends with signatory then acceptance.
#[test]
fn test_employment_signature_block_shape() {
    let fields = FieldRecord::new()
        .with_text("companyName", "Acme Corp")
        .with_text("recipientName", "Jo");

    let blocks = layout("EMPLOYMENT TERMS\nFull time.", &fields, DocumentType::EmploymentContract);

    let [.., signatory, accepted] = blocks.as_slice() else {
        panic!("layout too short");
    };
    assert_eq!(
        signatory.children(),
        &[
            Block::styled("Authorized Signatory:", TextStyle::Subheading, Alignment::Center),
            Block::Spacer { height: 40.0 },
            Block::styled("Acme Corp", TextStyle::Paragraph, Alignment::Center),
            Block::styled(format!("Date: {RENDER_DATE}"), TextStyle::Paragraph, Alignment::Center),
        ]
    );
    assert_eq!(accepted.children()[0].text(), Some("Accepted By:"));
}

/// Verifies job contracts carry only the company signature.
#[test]
fn test_job_contract_has_no_acceptance_block() {
    let blocks = layout("JOB DESCRIPTION\nBuild things.", &FieldRecord::new(), DocumentType::JobContract);

    let signatures = index_of_signatures(&blocks);
    assert_eq!(blocks.len(), signatures + 2);
    // Missing fields render as empty text.
    assert_eq!(
        blocks[signatures + 1].children()[2],
        Block::styled("", TextStyle::Paragraph, Alignment::Center)
    );
}

/// Verifies every labelled line of the signature stacks is centered, images included.
#[test]
fn test_signature_stacks_are_centered() {
    // Arrange
    let offer = offer_letter_fields()
        .with_image("signatureImage", ImageRef::new("data:image/png;base64,AAAA"));
    let rental = rental_fields().with_text("includeWitness", "true");

    // Act
    let offer_blocks = layout("OFFER TERMS
Welcome aboard.", &offer, DocumentType::OfferLetter);
    let rental_blocks = layout("LEASE AGREEMENT
Rent is due monthly.", &rental, DocumentType::RentalContract);

    // Assert
    let [.., signatory, accepted] = offer_blocks.as_slice() else {
        panic!("layout too short");
    };
    let witness = rental_blocks.last().expect("layout is never empty");
    for stack in [signatory, accepted, witness] {
        for child in stack.children() {
            match child {
                Block::Paragraph { align, .. } | Block::Image { align, .. } => {
                    assert_eq!(*align, Alignment::Center, "{child:?} should be centered")
                }
                Block::SignatureLine { .. } | Block::Spacer { .. } => {}
                other => panic!("unexpected block in signature stack: {other:?}"),
            }
        }
    }
    assert!(matches!(signatory.children()[1], Block::Image { .. }));
}

/// Verifies logo and date/location header precede the title.
#[test]
fn test_logo_and_header_row() {
    let fields = FieldRecord::new().with_image("logoImage", ImageRef::new("data:image/png;base64,AAAA"));

    let blocks = assemble(
        &segment("GENERAL TERMS\nText."),
        &fields,
        DocumentType::FreelanceContract,
        Some("March 1"),
        None,
        RENDER_DATE,
    );

    assert!(matches!(
        &blocks[0],
        Block::Image { width, align: Alignment::Center, .. } if *width == 200.0
    ));
    assert_eq!(
        blocks[1],
        Block::TwoColumn {
            left: Box::new(Block::styled("Date: March 1", TextStyle::Small, Alignment::Left)),
            right: Box::new(Block::styled("", TextStyle::Small, Alignment::Right)),
        }
    );
    assert_eq!(blocks[2].text(), Some("FREELANCE CONTRACT"));
}

/// Verifies no header row is emitted without extracted metadata.
#[test]
fn test_no_header_row_without_metadata() {
    let blocks = layout("GENERAL TERMS\nText.", &FieldRecord::new(), DocumentType::FreelanceContract);

    assert!(matches!(blocks[0], Block::Title { .. }));
}

/// Verifies placeholder substitution and removal.
#[test]
fn test_placeholder_substitution() {
    assert_eq!(substitute_placeholders("Dated [Date].", RENDER_DATE), "Dated 6/1/2024.");
    assert_eq!(
        substitute_placeholders("[Current Date] at HQ", RENDER_DATE),
        "6/1/2024 at HQ"
    );
    assert_eq!(substitute_placeholders("  [SIGNATURE_IMAGE] ", RENDER_DATE), "");
    assert_eq!(substitute_placeholders("[LOGO_IMAGE]", RENDER_DATE), "");

    // A placeholder-only heading empties out and its content joins the top level.
    let text = "LETTER OF INTENT\nIssued on [Date].\n[LOGO_IMAGE]\nClosing line.";
    let blocks = layout(text, &FieldRecord::new(), DocumentType::OfferLetter);
    assert_eq!(
        blocks[1].children(),
        &[Block::paragraph("Issued on 6/1/2024.")]
    );
    assert_eq!(blocks[2], Block::paragraph("Closing line."));
}

/// Verifies colon-suffixed lines open nested sub-headings.
#[test]
fn test_colon_lines_open_subheadings() {
    let text = "COMPENSATION AND BENEFITS\nOverview line.\nSalary:\nPaid monthly.\n- Bonus eligible\nBenefits:\nStandard package.";

    let blocks = layout(text, &FieldRecord::new(), DocumentType::EmploymentContract);

    assert!(is_colon_heading("Salary:"));
    assert!(!is_colon_heading("- Perks:"));
    assert_eq!(
        blocks[1].children(),
        &[
            Block::paragraph("Overview line."),
            Block::heading_stack(
                "Salary:",
                TextStyle::Subheading,
                vec![
                    Block::paragraph("Paid monthly."),
                    Block::BulletList {
                        items: vec!["Bonus eligible".into()]
                    },
                ],
            ),
            Block::heading_stack(
                "Benefits:",
                TextStyle::Subheading,
                vec![Block::paragraph("Standard package.")],
            ),
        ]
    );
}

/// Verifies the suppression predicate.
#[test]
fn test_signature_line_predicate() {
    assert!(is_signature_line("AUTHORIZED SIGNATURE"));
    assert!(is_signature_line("Witness: ________"));
    assert!(is_signature_line("Tenant: Tim"));
    assert!(!is_signature_line("The owner: Olive"));
    assert!(!is_signature_line("signature required"));
}
