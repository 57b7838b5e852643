//! # Contract Drafting Prompts
//!
//! One system prompt shared by every document type, and a user prompt built
//! per type from the fields the caller actually supplied.

use crate::types::{DocumentType, FieldRecord};

/// The system prompt for every drafting request.
pub const CONTRACT_SYSTEM_PROMPT: &str = r#"You are a meticulous legal drafter. You write formal business and legal documents in plain text only: no HTML, no Markdown, no code fences. Put each section heading on its own line in UPPERCASE. Write list items on their own lines starting with "- ". Never invent signature blocks; the document layout adds them."#;

/// Format requirements appended to every user prompt.
const FORMAT_REQUIREMENTS: &str = "FORMAT REQUIREMENTS:\n\
    - Plain text only\n\
    - Clear section headings on their own lines\n\
    - A blank line between sections\n\
    - Numbered or bulleted clauses where they aid clarity\n\
    - Professional language a non-lawyer can follow";

/// Builds the user prompt for `doc_type` from the supplied fields.
pub fn build_user_prompt(doc_type: DocumentType, fields: &FieldRecord) -> String {
    let (intro, data, structure) = match doc_type {
        DocumentType::OfferLetter => (
            "Draft a professional employment offer letter. It should make the candidate feel valued while stating every term clearly.",
            employment_data(fields, "Candidate"),
            &[
                "Current date ([Current Date])",
                "Candidate name and address",
                "Subject line naming the position",
                "Welcoming introduction",
                "Position details and reporting structure",
                "Start date and location",
                "Compensation package",
                "Benefits summary",
                "Working hours and conditions",
                "Employment terms such as probation",
                "Acceptance instructions",
                "Closing",
            ][..],
        ),
        DocumentType::EmploymentContract | DocumentType::JobContract => (
            "Draft a comprehensive employment contract that protects the employer while staying fair and transparent to the employee.",
            employment_data(fields, "Employee"),
            &[
                "Parties",
                "Position and duties",
                "Term and probationary period",
                "Compensation and payment schedule",
                "Benefits and time off",
                "Work schedule and location",
                "Confidentiality",
                "Intellectual property",
                "Non-compete and non-solicitation, if applicable",
                "Termination and notice periods",
                "Governing law",
                "Dispute resolution",
            ][..],
        ),
        DocumentType::RentalContract => (
            "Draft a residential lease agreement in plain English that remains legally sound.",
            data_block(
                fields,
                &[
                    ("Landlord", "ownerName"),
                    ("Landlord Address", "ownerAddress"),
                    ("Tenant", "recipientName"),
                    ("Property Address", "propertyAddress"),
                    ("Lease Start Date", "startDate"),
                    ("Lease Duration", "duration"),
                    ("Monthly Rent", "rentAmount"),
                    ("Security Deposit", "securityDeposit"),
                    ("Tenant Utilities", "utilities"),
                    ("Governing State", "state"),
                ],
            ),
            &[
                "Parties",
                "Leased premises and residential use",
                "Lease term and month-to-month conversion",
                "Rent, due date, grace period and late fee",
                "Security deposit and its return",
                "Utilities and maintenance",
                "Landlord access",
                "Tenant obligations",
                "Termination",
                "Legal provisions and governing law",
            ][..],
        ),
        DocumentType::FreelanceContract => (
            "Draft a freelance service agreement that protects both the client and the contractor.",
            data_block(
                fields,
                &[
                    ("Client", "companyName"),
                    ("Client Address", "companyAddress"),
                    ("Contractor", "recipientName"),
                    ("Project Scope", "projectScope"),
                    ("Deliverables", "deliverables"),
                    ("Timeline", "duration"),
                    ("Payment Terms", "paymentTerms"),
                    ("Compensation", "compensation"),
                    ("Additional Terms", "additionalTerms"),
                ],
            ),
            &[
                "Parties and independent contractor status",
                "Scope of work",
                "Deliverables and acceptance",
                "Timeline and milestones",
                "Payment terms and invoicing",
                "Intellectual property",
                "Confidentiality",
                "Revisions and change requests",
                "Termination",
                "Limitation of liability",
                "Governing law",
            ][..],
        ),
    };

    let structure = structure
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{intro}\n\nDOCUMENT TYPE: {label}\n\nDATA:\n{data}\n\nDOCUMENT STRUCTURE:\n{structure}\n\n{FORMAT_REQUIREMENTS}",
        label = doc_type.label(),
    )
}

fn employment_data(fields: &FieldRecord, person_label: &'static str) -> String {
    data_block(
        fields,
        &[
            ("Employer", "companyName"),
            ("Employer Address", "companyAddress"),
            (person_label, "recipientName"),
            ("Position", "position"),
            ("Location", "location"),
            ("Start Date", "startDate"),
            ("Term", "duration"),
            ("Working Days", "workingDays"),
            ("Hours", "workingHours"),
            ("Compensation", "compensation"),
            ("Benefits", "benefits"),
            ("Additional Terms", "additionalTerms"),
        ],
    )
}

/// `Label: value` lines for each non-blank field, in the given order.
fn data_block(fields: &FieldRecord, labels: &[(&str, &str)]) -> String {
    labels
        .iter()
        .filter_map(|(label, key)| {
            fields
                .text(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| format!("{label}: {value}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
