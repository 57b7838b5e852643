//! # Section Segmenter Tests
//!
//! Covers heading detection, bullet grouping and the untitled leading section.

use draftsmith::segment::{bullet_text, is_heading, segment, ContentItem, Section};

fn text(value: &str) -> ContentItem {
    ContentItem::Text(value.to_string())
}

fn bullets(items: &[&str]) -> ContentItem {
    ContentItem::Bullets(items.iter().map(|item| item.to_string()).collect())
}

/// Verifies the heading length boundary and the uppercase rule.
#[test]
fn test_heading_boundary() {
    assert!(!is_heading("ABCDEFGHIJ"), "Ten characters is not enough.");
    assert!(is_heading("ABCDEFGHIJK"), "Eleven uppercase characters is a heading.");
    assert!(is_heading("   PAYMENT TERMS:  "));
    assert!(!is_heading("Payment TERMS AND CONDITIONS"));
    assert!(!is_heading("ABCDEFGHIJk"));
}

/// Verifies bullet markers are stripped along with following whitespace.
#[test]
fn test_bullet_text() {
    assert_eq!(bullet_text("  •   Health insurance"), Some("Health insurance"));
    assert_eq!(bullet_text("-Remote work"), Some("Remote work"));
    assert_eq!(bullet_text("Plain line"), None);
}

/// Verifies that content before the first heading becomes an untitled first section.
#[test]
fn test_leading_content_becomes_untitled_section() {
    let input = "Dear Jo,\nWelcome aboard.\nTERMS AND CONDITIONS\nYou will work hard.";

    let sections = segment(input);

    assert_eq!(
        sections,
        vec![
            Section {
                title: String::new(),
                content: vec![text("Dear Jo,"), text("Welcome aboard.")],
            },
            Section {
                title: "TERMS AND CONDITIONS".to_string(),
                content: vec![text("You will work hard.")],
            },
        ]
    );
}

/// Verifies that text starting with a heading has no untitled section.
#[test]
fn test_no_untitled_section_without_leading_content() {
    let input = "\n\nCOMPENSATION DETAILS\nPaid monthly.\n\nBENEFITS SUMMARY\n";

    let sections = segment(input);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "COMPENSATION DETAILS");
    assert_eq!(sections[1].title, "BENEFITS SUMMARY");
    assert!(sections[1].content.is_empty());
}

/// Verifies one `Bullets` item per contiguous run, split by blank or text lines.
#[test]
fn test_bullet_runs_are_grouped() {
    let input = "RESPONSIBILITIES\n- one\n• two\n\n- three\nBetween runs.\n- four\n- five";

    let sections = segment(input);

    assert_eq!(sections.len(), 1);
    assert_eq!(
        sections[0].content,
        vec![
            bullets(&["one", "two"]),
            bullets(&["three"]),
            text("Between runs."),
            bullets(&["four", "five"]),
        ]
    );
}

/// Verifies the heading check runs before the bullet check.
#[test]
fn test_uppercase_bullet_line_is_a_heading() {
    let input = "- SECTION HEADING\n- item";

    let sections = segment(input);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "- SECTION HEADING");
    assert_eq!(sections[0].content, vec![bullets(&["item"])]);
}

/// Verifies every non-blank line survives exactly once, in order.
#[test]
fn test_structure_round_trip() {
    let headings = ["FIRST SECTION", "SECOND SECTION", "THIRD SECTION"];
    let mut input = String::from("Preamble line\n");
    for (i, heading) in headings.iter().enumerate() {
        input.push_str(&format!("{heading}\nParagraph {i}\n- bullet {i}a\n- bullet {i}b\n\n"));
    }

    let sections = segment(&input);

    assert_eq!(sections.len(), headings.len() + 1);
    assert_eq!(sections[0].title, "");
    let titles: Vec<&str> = sections[1..].iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, headings);

    let mut flattened = Vec::new();
    for section in &sections {
        if !section.title.is_empty() {
            flattened.push(section.title.clone());
        }
        for item in &section.content {
            match item {
                ContentItem::Text(value) => flattened.push(value.clone()),
                ContentItem::Bullets(items) => flattened.extend(items.iter().cloned()),
            }
        }
    }
    let expected: Vec<String> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| bullet_text(line).unwrap_or(line).to_string())
        .collect();
    assert_eq!(flattened, expected);
}
