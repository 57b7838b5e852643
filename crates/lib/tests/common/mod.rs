#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared fixtures for the library tests: tracing setup and sample drafts.

use draftsmith::FieldRecord;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// An offer letter as a generator typically returns it.
pub const OFFER_LETTER_TEXT: &str = "Dear Jo,\n\
\n\
OFFER OF EMPLOYMENT:\n\
We are pleased to offer you the position of Engineer.\n\
Your start date will be 1 July.\n\
- Salary of 100k\n\
- Health insurance\n\
- 25 days of leave\n";

pub fn offer_letter_fields() -> FieldRecord {
    FieldRecord::new()
        .with_text("companyName", "Acme Corp")
        .with_text("recipientName", "Jo")
        .with_text("position", "Engineer")
        .with_text("startDate", "1 July")
        .with_text("compensation", "100k")
        .with_text("workingHours", "9-5")
}

pub fn rental_fields() -> FieldRecord {
    FieldRecord::new()
        .with_text("ownerName", "Olive Owner")
        .with_text("ownerAddress", "1 Main St")
        .with_text("recipientName", "Tim Tenant")
        .with_text("propertyAddress", "2 Side St, Springfield")
        .with_text("rentAmount", "1200")
        .with_text("duration", "12 months")
}
