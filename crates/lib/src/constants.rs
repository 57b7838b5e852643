//! Field names and literal markers shared by the normalizer, the assembler
//! and the prompt catalog.

// --- Field names ---

pub const LOGO_IMAGE: &str = "logoImage";
pub const SIGNATURE_IMAGE: &str = "signatureImage";
pub const OWNER_SIGNATURE: &str = "ownerSignature";
pub const TENANT_SIGNATURE: &str = "tenantSignature";

/// Fields whose values are image references rather than text.
pub const IMAGE_FIELDS: [&str; 4] = [LOGO_IMAGE, SIGNATURE_IMAGE, OWNER_SIGNATURE, TENANT_SIGNATURE];

pub const COMPANY_NAME: &str = "companyName";
pub const RECIPIENT_NAME: &str = "recipientName";
pub const OWNER_NAME: &str = "ownerName";
pub const INCLUDE_WITNESS: &str = "includeWitness";

// --- Markers ---

pub const DATE_LABEL: &str = "Date:";
pub const LOCATION_LABEL: &str = "Location:";

/// Placeholders replaced by the render date.
pub const DATE_PLACEHOLDERS: [&str; 2] = ["[Date]", "[Current Date]"];

/// Placeholders removed outright; the layout draws its own signature and logo blocks.
pub const REMOVED_PLACEHOLDERS: [&str; 4] = [
    "[OWNER_SIGNATURE]",
    "[TENANT_SIGNATURE]",
    "[SIGNATURE_IMAGE]",
    "[LOGO_IMAGE]",
];

pub const BULLET_MARKERS: [char; 2] = ['•', '-'];

// --- Layout dimensions (points) ---

pub const LOGO_WIDTH: f32 = 200.0;
pub const SIGNATURE_WIDTH: f32 = 150.0;
pub const SIGNATURE_SPACER: f32 = 40.0;
